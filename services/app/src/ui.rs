//! services/app/src/ui.rs
//!
//! The presentation event contract: terminal commands parsed into intents,
//! and plain-text rendering of the controller's state snapshots. This layer
//! never touches the ports directly; everything goes through the controller.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use summarizer_core::domain::SummaryItem;

use crate::workflow::{ActiveView, WorkflowState};

/// A user intent, as issued by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SelectFile(PathBuf),
    Deselect,
    Submit,
    /// 1-based position in the rendered history list.
    ViewHistoryItem(usize),
    RemoveHistoryItem(usize),
    ClearAllHistory,
    SwitchView(ActiveView),
    /// Save a history item's original bytes to a path, if still available.
    SaveOriginal(usize, PathBuf),
    Help,
    Quit,
}

/// Maps one input line to an intent. `None` means the line was not a
/// recognized command.
pub fn parse_intent(line: &str) -> Option<Intent> {
    let line = line.trim();
    let mut words = line.split_whitespace();
    let command = words.next()?;
    let rest = line[command.len()..].trim();

    match command {
        "select" | "open" if !rest.is_empty() => Some(Intent::SelectFile(PathBuf::from(rest))),
        "deselect" => Some(Intent::Deselect),
        "submit" | "summarize" => Some(Intent::Submit),
        "history" => Some(Intent::SwitchView(ActiveView::History)),
        "main" => Some(Intent::SwitchView(ActiveView::Summarize)),
        "view" => rest.parse().ok().map(Intent::ViewHistoryItem),
        "remove" => rest.parse().ok().map(Intent::RemoveHistoryItem),
        "clear" => Some(Intent::ClearAllHistory),
        "save" => {
            let index: usize = words.next()?.parse().ok()?;
            let path = words.next()?;
            Some(Intent::SaveOriginal(index, PathBuf::from(path)))
        }
        "help" => Some(Intent::Help),
        "quit" | "exit" => Some(Intent::Quit),
        _ => None,
    }
}

pub const HELP: &str = "\
commands:
  select <path>     choose a PDF to summarize
  deselect          drop the current selection
  submit            summarize the selected PDF
  main | history    switch views
  view <n>          load history item n back into the main view
  remove <n>        delete history item n
  clear             delete the whole history
  save <n> <path>   save a copy of item n's original PDF (if still available)
  help | quit";

/// Renders the summarize view from a state snapshot.
pub fn render_summarize(state: &WorkflowState) -> String {
    let mut out = String::from("-- Summarize PDF --\n");
    match &state.selected_file {
        Some(file) => {
            out.push_str(&format!("file: {} ({})\n", file.name, format_file_size(file.size())));
        }
        None => out.push_str("file: none selected\n"),
    }
    if state.is_submitting {
        out.push_str("summarizing...\n");
    }
    if let Some(error) = &state.error_message {
        out.push_str(&format!("error: {error}\n"));
    }
    if !state.current_summary.is_empty() {
        out.push('\n');
        out.push_str(&state.current_summary);
        out.push('\n');
    }
    out
}

/// Renders the history view, newest first, 1-based indices.
pub fn render_history(items: &[SummaryItem], now: DateTime<Utc>) -> String {
    if items.is_empty() {
        return "-- History --\nNo summary history yet\n".to_string();
    }
    let mut out = format!("-- History ({} items) --\n", items.len());
    for (position, item) in items.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {} ({}, {})\n",
            position + 1,
            item.pdf_name,
            format_file_size(item.pdf_size),
            format_age(item.timestamp, now),
        ));
    }
    out
}

/// Human-readable byte count, same thresholds as the original view.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} bytes")
    } else if bytes < 1_048_576 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    }
}

/// Coarse "how long ago" label for history rows.
pub fn format_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let seconds = elapsed.num_seconds().max(0);
    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3600 {
        let minutes = seconds / 60;
        format!("{minutes} minute{} ago", plural(minutes))
    } else if seconds < 86_400 {
        let hours = seconds / 3600;
        format!("{hours} hour{} ago", plural(hours))
    } else {
        let days = seconds / 86_400;
        format!("{days} day{} ago", plural(days))
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
