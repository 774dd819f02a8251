//! Terminal display adapter.
//!
//! Prints every menu snapshot to a writer, either as an indexed text menu
//! or as one JSON object per line.

use std::fmt::Write as _;
use std::io::Write;

use serde_json::json;
use shownet::status::{CyclePhase, DisplaySink, MenuEntry, MenuSnapshot};

/// How snapshots and copy results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable menu.
    Text,
    /// One JSON object per line.
    Json,
}

impl OutputFormat {
    /// Picks the format from the `--json` flag.
    pub const fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// A [`DisplaySink`] writing to any [`Write`] implementation.
pub struct TerminalDisplay<W> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> TerminalDisplay<W> {
    pub const fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> DisplaySink for TerminalDisplay<W> {
    fn render(&mut self, snapshot: MenuSnapshot) {
        let text = format_snapshot(&snapshot, self.format);
        if let Err(e) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            tracing::warn!("Failed to write menu: {e}");
        }
    }
}

/// Formats a snapshot without a trailing newline.
pub fn format_snapshot(snapshot: &MenuSnapshot, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_text(snapshot),
        OutputFormat::Json => serde_json::to_string(snapshot).unwrap_or_else(|e| {
            tracing::warn!("Failed to serialize menu: {e}");
            String::from("{}")
        }),
    }
}

/// Formats the outcome of a copy request.
pub fn format_copy(index: usize, text: Option<&str>, format: OutputFormat) -> String {
    match (format, text) {
        (OutputFormat::Text, Some(text)) => format!("Copied: {text}"),
        (OutputFormat::Text, None) => format!("Nothing to copy at row {index}"),
        (OutputFormat::Json, text) => json!({ "index": index, "copied": text }).to_string(),
    }
}

fn format_text(snapshot: &MenuSnapshot) -> String {
    let mut out = String::new();
    let status = match snapshot.phase {
        CyclePhase::Idle => "idle",
        CyclePhase::Discovering => "refreshing...",
        CyclePhase::Partial => "looking up public addresses...",
        CyclePhase::Complete => "up to date",
    };
    let _ = write!(out, "Network status #{} ({status})", snapshot.cycle);

    for (index, entry) in snapshot.entries.iter().enumerate() {
        match entry {
            MenuEntry::Row(row) if row.enabled => {
                let _ = write!(out, "\n  [{index}] {}", row.label);
            }
            MenuEntry::Row(row) => {
                let _ = write!(out, "\n      {}", row.label);
            }
            MenuEntry::Separator => out.push_str("\n      ----"),
        }
    }

    out
}
