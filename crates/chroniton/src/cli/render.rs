use chrono::{DateTime, Local, Utc};
use chronitonapp::commands::list::CategoryOutline;
use chronitonapp::commands::{CmdMessage, MessageLevel};
use chronitonapp::due::is_due_at;
use chronitonapp::index::EventPath;
use chronitonapp::model::{Category, Event};
use colored::Colorize;
use std::fmt::Write;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const DATE_WIDTH: usize = 12;
const TIME_WIDTH: usize = 16;
const DUE_MARKER: &str = "●";
const SOON_DAYS: u32 = 7;
const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_outline(outline: &[CategoryOutline], date_format: &str) {
    if outline.is_empty() {
        println!("No categories yet. Create one with `chroniton category add <name>`.");
        return;
    }

    let now = Local::now();
    for (ci, entry) in outline.iter().enumerate() {
        if ci > 0 {
            println!();
        }
        println!(
            "{} {}",
            format!("{}.", ci + 1).yellow(),
            entry.category.name.bold()
        );
        if entry.events.is_empty() {
            println!("    {}", "(no events)".dimmed());
        }
        for (ei, event) in entry.events.iter().enumerate() {
            let path = EventPath::from_zero_based((ci, ei));
            println!("{}", event_line(&path, event, &now, date_format));
        }
    }
}

fn event_line(path: &EventPath, event: &Event, now: &DateTime<Local>, date_format: &str) -> String {
    let marker = if is_due_at(event, 0, now) {
        DUE_MARKER.red().to_string()
    } else if is_due_at(event, SOON_DAYS, now) {
        DUE_MARKER.yellow().to_string()
    } else {
        " ".to_string()
    };

    let idx = format!("{}. ", path);
    let next = event
        .next_date
        .map(|d| format_date(d, date_format))
        .unwrap_or_default();
    let last = format_last_done(event.last_date);

    let prefix_width = 2 + 1 + 1 + idx.width();
    let fixed = prefix_width + DATE_WIDTH + TIME_WIDTH;
    let available = LINE_WIDTH.saturating_sub(fixed);
    let title = truncate_to_width(&event.title, available);
    let padding = available.saturating_sub(title.width());

    format!(
        "  {} {}{}{}{:>date_w$}{}",
        marker,
        idx,
        title,
        " ".repeat(padding),
        next,
        format!("{:>time_w$}", last, time_w = TIME_WIDTH).dimmed(),
        date_w = DATE_WIDTH,
    )
}

pub(super) fn print_due(due: &[(Category, Event)], paths: &[EventPath], date_format: &str) {
    if due.is_empty() {
        println!("Nothing is due.");
        return;
    }
    for ((category, event), path) in due.iter().zip(paths) {
        let next = event
            .next_date
            .map(|d| format_date(d, date_format))
            .unwrap_or_default();
        println!(
            "  {} {} {} {}",
            format!("{}.", path).yellow(),
            event.title.bold(),
            format!("({})", category.name).dimmed(),
            next
        );
    }
}

pub(super) fn print_event(category: &Category, event: &Event, path: &EventPath, date_format: &str) {
    println!("{} {}", format!("{}.", path).yellow(), event.title.bold());
    println!("--------------------------------");
    println!("{:<10}{}", "Category", category.name);
    println!(
        "{:<10}{}",
        "Next",
        event
            .next_date
            .map(|d| format_date(d, date_format))
            .unwrap_or_else(|| "-".to_string())
    );
    println!(
        "{:<10}{}",
        "Last",
        event
            .last_date
            .map(|d| format!("{} ({})", format_date(d, date_format), time_ago(d)))
            .unwrap_or_else(|| "never".to_string())
    );
    if is_due_at(event, 0, &Local::now()) {
        println!("{:<10}{}", "Status", "due".red());
    }
    if let Some(bytes) = event.image_data.as_ref().filter(|b| !b.is_empty()) {
        println!("{:<10}{} bytes", "Image", bytes.len());
    }
    if let Some(notes) = &event.notes {
        println!();
        println!("{}", notes);
    }
}

pub(super) fn format_date(date: DateTime<Utc>, format: &str) -> String {
    let local = date.with_timezone(&Local);
    let mut out = String::new();
    if write!(out, "{}", local.format(format)).is_err() {
        return local.format(FALLBACK_DATE_FORMAT).to_string();
    }
    out
}

fn format_last_done(last: Option<DateTime<Utc>>) -> String {
    match last {
        Some(date) => time_ago(date),
        None => "never done".to_string(),
    }
}

fn time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
