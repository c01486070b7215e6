use super::logging;
use super::render::{print_due, print_event, print_messages, print_outline};
use super::setup::{CategoryCommands, Cli, Commands, DateArgs, EventCommands, OutputFormat};
use anyhow::{bail, ensure, Context, Result};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use chronitonapp::api::ReminderModel;
use chronitonapp::config::ChronitonConfig;
use chronitonapp::index::EventPath;
use chronitonapp::init::initialize;
use chronitonapp::model::{EventDraft, EventPatch};
use chronitonapp::session::Session;
use chronitonapp::store::fs::FileStore;
use clap::Parser;
use std::path::PathBuf;

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

struct AppContext {
    session: Session<FileStore>,
    config: ChronitonConfig,
    data_dir: PathBuf,
}

impl AppContext {
    fn model(&self) -> &ReminderModel<FileStore> {
        self.session.model()
    }

    fn model_mut(&mut self) -> &mut ReminderModel<FileStore> {
        self.session.model_mut()
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Some(Commands::Config { template: true }) = &cli.command {
        print!("{}", ChronitonConfig::template());
        return Ok(());
    }

    let mut ctx = init_context(&cli)?;
    tracing::debug!(command = ?cli.command, data_dir = %ctx.data_dir.display(), "dispatch");

    match cli.command {
        Some(Commands::List { output }) => handle_list(&ctx, output),
        Some(Commands::Category(cmd)) => match cmd {
            CategoryCommands::Add { name, at } => handle_category_add(&mut ctx, name, at),
            CategoryCommands::Rm { category } => handle_category_rm(&mut ctx, &category),
            CategoryCommands::Mv { category, to } => handle_category_mv(&mut ctx, &category, to),
            CategoryCommands::Rename { category, name } => {
                handle_category_rename(&mut ctx, &category, name)
            }
        },
        Some(Commands::Event(cmd)) => match cmd {
            EventCommands::Add {
                category,
                title,
                at,
                notes,
                dates,
            } => handle_event_add(&mut ctx, &category, title, at, notes, dates),
            EventCommands::Rm { event } => handle_event_rm(&mut ctx, &event),
            EventCommands::Mv { event, to } => handle_event_mv(&mut ctx, &event, to),
            EventCommands::MoveTo {
                event,
                category,
                at,
            } => handle_event_move_to(&mut ctx, &event, &category, at),
            EventCommands::Edit {
                event,
                title,
                notes,
                clear_notes,
                dates,
                clear_last,
                clear_next,
                image,
                clear_image,
            } => {
                let edit = EditArgs {
                    title,
                    notes,
                    clear_notes,
                    dates,
                    clear_last,
                    clear_next,
                    image,
                    clear_image,
                };
                handle_event_edit(&mut ctx, &event, edit)
            }
            EventCommands::Done { event, on } => handle_event_done(&mut ctx, &event, on),
            EventCommands::Show { event, output } => handle_event_show(&ctx, &event, output),
        },
        Some(Commands::Due { days, output }) => handle_due(&ctx, days, output),
        Some(Commands::Badge) => handle_badge(&ctx),
        Some(Commands::Doctor) => handle_doctor(&mut ctx),
        Some(Commands::Config { .. }) => handle_config(&ctx),
        None => handle_list(&ctx, OutputFormat::Text),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let ctx = initialize(cli.data.clone()).context("Failed to open chroniton data")?;
    Ok(AppContext {
        session: ctx.session,
        config: ctx.config,
        data_dir: ctx.data_dir,
    })
}

fn handle_list(ctx: &AppContext, output: OutputFormat) -> Result<()> {
    let outline = ctx.model().outline()?;
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outline)?),
        OutputFormat::Text => print_outline(&outline, &ctx.config.date_format),
    }
    Ok(())
}

fn handle_category_add(ctx: &mut AppContext, name: Vec<String>, at: Option<usize>) -> Result<()> {
    let at = at.map(to_index).transpose()?;
    let result = ctx
        .model_mut()
        .create_category_with_result(&name.join(" "), at)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_category_rm(ctx: &mut AppContext, selector: &str) -> Result<()> {
    let id = ctx.model().resolve_category(selector)?;
    let result = ctx.session.delete_category(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_category_mv(ctx: &mut AppContext, selector: &str, to: usize) -> Result<()> {
    let id = ctx.model().resolve_category(selector)?;
    let result = ctx.model_mut().move_category(id, to_index(to)?)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_category_rename(ctx: &mut AppContext, selector: &str, name: Vec<String>) -> Result<()> {
    let id = ctx.model().resolve_category(selector)?;
    let result = ctx.model_mut().rename_category(id, &name.join(" "))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_event_add(
    ctx: &mut AppContext,
    category: &str,
    title: Vec<String>,
    at: Option<usize>,
    notes: Option<String>,
    dates: DateArgs,
) -> Result<()> {
    let category = ctx.model().resolve_category(category)?;
    let at = at.map(to_index).transpose()?;
    let format = ctx.config.date_format.clone();

    let mut draft = EventDraft::new(title.join(" "));
    draft.notes = notes;
    if let Some(last) = dates.last {
        draft = draft.with_last_date(parse_date(&last, &format)?);
    }
    if let Some(next) = dates.next {
        draft = draft.with_next_date(parse_date(&next, &format)?);
    }

    let result = ctx.model_mut().create_event_with(draft, category, at)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_event_rm(ctx: &mut AppContext, selector: &str) -> Result<()> {
    let id = ctx.model().resolve_event(selector)?;
    let result = ctx.session.delete_event(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_event_mv(ctx: &mut AppContext, selector: &str, to: usize) -> Result<()> {
    let id = ctx.model().resolve_event(selector)?;
    let result = ctx.model_mut().move_event(id, to_index(to)?)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_event_move_to(
    ctx: &mut AppContext,
    selector: &str,
    category: &str,
    at: Option<usize>,
) -> Result<()> {
    let id = ctx.model().resolve_event(selector)?;
    let destination = ctx.model().resolve_category(category)?;
    let at = at.map(to_index).transpose()?;
    let result = ctx
        .model_mut()
        .move_event_to_category(id, destination, at)?;
    print_messages(&result.messages);
    Ok(())
}

struct EditArgs {
    title: Option<String>,
    notes: Option<String>,
    clear_notes: bool,
    dates: DateArgs,
    clear_last: bool,
    clear_next: bool,
    image: Option<PathBuf>,
    clear_image: bool,
}

fn handle_event_edit(ctx: &mut AppContext, selector: &str, edit: EditArgs) -> Result<()> {
    let id = ctx.model().resolve_event(selector)?;
    let format = ctx.config.date_format.clone();

    let mut patch = EventPatch {
        title: edit.title,
        ..Default::default()
    };
    if edit.clear_notes {
        patch.notes = Some(None);
    } else if let Some(notes) = edit.notes {
        patch.notes = Some(Some(notes));
    }
    if edit.clear_last {
        patch.last_date = Some(None);
    } else if let Some(last) = edit.dates.last {
        patch.last_date = Some(Some(parse_date(&last, &format)?));
    }
    if edit.clear_next {
        patch.next_date = Some(None);
    } else if let Some(next) = edit.dates.next {
        patch.next_date = Some(Some(parse_date(&next, &format)?));
    }
    if edit.clear_image {
        patch.image_data = Some(None);
    } else if let Some(path) = edit.image {
        let bytes = std::fs::read(&path)
            .with_context(|| format!("Could not read image {}", path.display()))?;
        patch.image_data = Some(Some(bytes));
    }

    if patch.is_empty() {
        bail!("Nothing to change; pass at least one field to edit");
    }

    let result = ctx.model_mut().update_event(id, patch)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_event_done(ctx: &mut AppContext, selector: &str, on: Option<String>) -> Result<()> {
    let id = ctx.model().resolve_event(selector)?;
    let on = match on {
        Some(date) => parse_date(&date, &ctx.config.date_format)?,
        None => Utc::now(),
    };
    let result = ctx.model_mut().mark_done(id, on)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_event_show(ctx: &AppContext, selector: &str, output: OutputFormat) -> Result<()> {
    let id = ctx.model().resolve_event(selector)?;
    let event = ctx.model().get_event(id)?;
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&event)?),
        OutputFormat::Text => {
            let category = ctx.model().get_category(event.category_id)?;
            let path = EventPath::from_zero_based(ctx.model().event_path(id)?);
            print_event(&category, &event, &path, &ctx.config.date_format);
        }
    }
    Ok(())
}

fn handle_due(ctx: &AppContext, days: u32, output: OutputFormat) -> Result<()> {
    let due = ctx.model().due_events_at(days, &Local::now())?;
    let paths = due
        .iter()
        .map(|(_, event)| {
            ctx.model()
                .event_path(event.id)
                .map(EventPath::from_zero_based)
        })
        .collect::<chronitonapp::error::Result<Vec<_>>>()?;

    match output {
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = due
                .iter()
                .zip(&paths)
                .map(|((category, event), path)| {
                    serde_json::json!({
                        "path": path.to_string(),
                        "category": category.name,
                        "event": event,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => print_due(&due, &paths, &ctx.config.date_format),
    }
    Ok(())
}

fn handle_badge(ctx: &AppContext) -> Result<()> {
    if let Some(count) = ctx.session.badge_count(&ctx.config)? {
        println!("{}", count);
    }
    Ok(())
}

fn handle_doctor(ctx: &mut AppContext) -> Result<()> {
    let report = ctx.model_mut().doctor()?;
    print_messages(&report.messages());
    Ok(())
}

fn handle_config(ctx: &AppContext) -> Result<()> {
    println!("data_dir = {}", ctx.data_dir.display());
    for (key, value) in ctx.config.entries() {
        println!("{} = {}", key, value);
    }
    Ok(())
}

/// 1-based CLI position to 0-based index.
fn to_index(position: usize) -> Result<usize> {
    ensure!(position >= 1, "Positions start at 1");
    Ok(position - 1)
}

/// A calendar date (or "today") at local midnight.
fn parse_date(input: &str, format: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    let day = if input.eq_ignore_ascii_case("today") {
        Local::now().date_naive()
    } else {
        NaiveDate::parse_from_str(input, format)
            .or_else(|_| NaiveDate::parse_from_str(input, FALLBACK_DATE_FORMAT))
            .with_context(|| format!("Invalid date '{}', expected {}", input, format))?
    };
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .context("Could not build midnight")?;
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|d| d.with_timezone(&Utc))
        .with_context(|| format!("{} has no local midnight", input))
}
