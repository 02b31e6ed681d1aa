//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! When `--json` is enabled, results are printed as pretty JSON instead of
//! the human-readable forms below.

use std::fmt::{Display, Write};

use serde::Serialize;

use crate::core::model::{BranchSet, BranchStatus, ChangedFiles, LogEntry, StatusReport, StatusTag};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print a value as pretty JSON (always shown).
pub fn json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One-line summary of a changeset: `rev:short branch author: first line`.
pub fn format_entry(entry: &LogEntry) -> String {
    let subject = entry.message.lines().next().unwrap_or_default();
    let mut line = format!(
        "{}:{} {} {} {}",
        entry.revision,
        entry.short_id(),
        entry.branch,
        entry.timestamp.format("%Y-%m-%d %H:%M"),
        entry.author
    );
    if !entry.tags.is_empty() {
        let _ = write!(line, " [{}]", entry.tags.join(", "));
    }
    let _ = write!(line, "\n    {subject}");
    line
}

/// Render entries one after another, newest first as given.
pub fn format_entries(entries: &[LogEntry]) -> String {
    entries
        .iter()
        .map(format_entry)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a status report the way the tool does (`A path`).
pub fn format_status(report: &StatusReport) -> String {
    let tags = [
        (StatusTag::Modified, 'M'),
        (StatusTag::Added, 'A'),
        (StatusTag::Removed, 'R'),
        (StatusTag::Missing, '!'),
        (StatusTag::NotVersioned, '?'),
    ];
    tags.iter()
        .flat_map(|(tag, c)| report.bucket(*tag).iter().map(move |path| format!("{c} {path}")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render branches grouped by status.
pub fn format_branches(set: &BranchSet) -> String {
    let mut out = String::new();
    for status in [BranchStatus::Active, BranchStatus::Inactive, BranchStatus::Closed] {
        let names = set.bucket(status);
        if names.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "{status}:");
        out.push_str(&format_list(names, "  "));
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// Render changed files per changeset.
pub fn format_changed_files(changed: &[ChangedFiles]) -> String {
    changed
        .iter()
        .map(|c| {
            if c.files.is_empty() {
                c.node.short().to_string()
            } else {
                format!("{}\n{}", c.node.short(), format_list(&c.files, "  "))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}
