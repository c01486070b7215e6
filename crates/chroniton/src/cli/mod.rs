//! # CLI Layer
//!
//! This module is **one possible UI client** for chroniton; it is not the application
//! itself. It is the only place that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Installs a `tracing` subscriber
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - [`setup`]: clap definitions
//! - [`commands`]: `run()` dispatch and per-command `handle_*` functions
//! - [`render`]: turning model data and `CmdResult`s into terminal output
//! - [`logging`]: subscriber setup

mod commands;
mod logging;
mod render;
mod setup;

pub use commands::run;
