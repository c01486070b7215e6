use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "chroniton", bin_name = "chroniton", version)]
#[command(about = "Keep track of recurring chores and when they are due", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (default: $CHRONITON_DATA, then the OS data directory)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List categories and their events
    #[command(alias = "ls")]
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Manage categories
    #[command(subcommand, alias = "cat")]
    Category(CategoryCommands),

    /// Manage events
    #[command(subcommand, alias = "ev")]
    Event(EventCommands),

    /// Show events that are due
    Due {
        /// Also include events due within this many days
        #[arg(short, long, default_value_t = 0)]
        days: u32,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Print the badge count (nothing when badges are disabled)
    Badge,

    /// Check and repair ordering consistency
    Doctor,

    /// Show configuration
    Config {
        /// Print a commented sample chroniton.toml instead
        #[arg(long)]
        template: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Create a category
    Add {
        /// Name (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,

        /// Position to insert at (1-based, default: last)
        #[arg(long, value_name = "POS")]
        at: Option<usize>,
    },

    /// Delete a category and all of its events
    #[command(alias = "delete")]
    Rm {
        /// Category position or name
        category: String,
    },

    /// Move a category to another position
    Mv {
        /// Category position or name
        category: String,

        /// Target position (1-based)
        to: usize,
    },

    /// Rename a category
    Rename {
        /// Category position or name
        category: String,

        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum EventCommands {
    /// Create an event in a category
    Add {
        /// Category position or name
        category: String,

        /// Title (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        /// Position to insert at within the category (1-based, default: last)
        #[arg(long, value_name = "POS")]
        at: Option<usize>,

        #[arg(long)]
        notes: Option<String>,

        #[command(flatten)]
        dates: DateArgs,
    },

    /// Delete an event
    #[command(alias = "delete")]
    Rm {
        /// Event path, e.g. 2.3
        event: String,
    },

    /// Move an event within its category
    Mv {
        /// Event path, e.g. 2.3
        event: String,

        /// Target position within the category (1-based)
        to: usize,
    },

    /// Move an event into another category
    MoveTo {
        /// Event path, e.g. 2.3
        event: String,

        /// Destination category position or name
        category: String,

        /// Position within the destination (1-based, default: last)
        #[arg(long, value_name = "POS")]
        at: Option<usize>,
    },

    /// Edit an event's fields
    Edit {
        /// Event path, e.g. 2.3
        event: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, conflicts_with = "clear_notes")]
        notes: Option<String>,

        #[arg(long)]
        clear_notes: bool,

        #[command(flatten)]
        dates: DateArgs,

        #[arg(long, conflicts_with = "last")]
        clear_last: bool,

        #[arg(long, conflicts_with = "next")]
        clear_next: bool,

        /// Attach an image file
        #[arg(long, value_name = "FILE", conflicts_with = "clear_image")]
        image: Option<PathBuf>,

        #[arg(long)]
        clear_image: bool,
    },

    /// Mark an event as done
    Done {
        /// Event path, e.g. 2.3
        event: String,

        /// Date it was done (default: now)
        #[arg(long, value_name = "DATE")]
        on: Option<String>,
    },

    /// Show one event in full
    Show {
        /// Event path, e.g. 2.3
        event: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
}

#[derive(Args, Debug, Default)]
pub struct DateArgs {
    /// When it was last done (date in the configured format, or "today")
    #[arg(long, value_name = "DATE")]
    pub last: Option<String>,

    /// When it is next due (date in the configured format, or "today")
    #[arg(long, value_name = "DATE")]
    pub next: Option<String>,
}
