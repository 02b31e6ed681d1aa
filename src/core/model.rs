//! core::model
//!
//! Structured results produced by adapter operations.
//!
//! Every value here is derived from a single command's output and is
//! read-only afterwards. Nothing is cached between calls.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::types::NodeId;

/// Branch name used when the tool output does not name one.
pub const DEFAULT_BRANCH: &str = "default";

/// One historical change record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Repository-local revision ordinal
    pub revision: u64,
    /// Full node id
    pub node: NodeId,
    /// Branch the change was committed on
    pub branch: String,
    /// `Name <email>`
    pub author: String,
    /// Commit message, newlines preserved
    pub message: String,
    /// Commit time with the committer's offset
    pub timestamp: DateTime<FixedOffset>,
    /// Touched paths, in tool order
    #[serde(default)]
    pub files: Vec<String>,
    /// Tags attached to this node
    #[serde(default)]
    pub tags: Vec<String>,
}

impl LogEntry {
    /// Abbreviated node id (always 12 characters).
    pub fn short_id(&self) -> &str {
        self.node.short()
    }
}

/// Render an author as `Name <email>`, mirroring the name when the email
/// is missing.
///
/// # Example
///
/// ```
/// use dvcswrap::core::model::format_author;
///
/// assert_eq!(format_author("Jan", Some("jan@example.com")), "Jan <jan@example.com>");
/// assert_eq!(format_author("brogrammer", None), "brogrammer <brogrammer>");
/// ```
pub fn format_author(name: &str, email: Option<&str>) -> String {
    let name = name.trim();
    match email.map(str::trim).filter(|e| !e.is_empty()) {
        Some(email) => format!("{name} <{email}>"),
        None => format!("{name} <{name}>"),
    }
}

/// A parsed log: entries in source order plus a per-branch grouping.
///
/// Each entry belongs to exactly one branch bucket, so the number of
/// entries always equals the sum of the bucket lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Log {
    /// Entries in the order the tool reported them
    pub entries: Vec<LogEntry>,
    /// Entries grouped by branch name, source order kept within a bucket
    pub by_branch: BTreeMap<String, Vec<LogEntry>>,
}

impl Log {
    /// Build a log from entries, deriving the per-branch grouping.
    pub fn from_entries(entries: Vec<LogEntry>) -> Self {
        let mut by_branch: BTreeMap<String, Vec<LogEntry>> = BTreeMap::new();
        for entry in &entries {
            by_branch
                .entry(entry.branch.clone())
                .or_default()
                .push(entry.clone());
        }
        Self { entries, by_branch }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries on one branch (empty slice if the branch never appears).
    pub fn branch(&self, name: &str) -> &[LogEntry] {
        self.by_branch.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Consume the log, keeping the flat list.
    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

/// Status of a named branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchStatus {
    /// Branch has a head that is not merged elsewhere
    Active,
    /// Branch heads are all merged into other branches
    Inactive,
    /// Branch was explicitly closed
    Closed,
}

impl BranchStatus {
    /// Parse the parenthesized suffix printed by the tool.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "active" => Some(BranchStatus::Active),
            "inactive" => Some(BranchStatus::Inactive),
            "closed" => Some(BranchStatus::Closed),
            _ => None,
        }
    }
}

impl std::fmt::Display for BranchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BranchStatus::Active => write!(f, "active"),
            BranchStatus::Inactive => write!(f, "inactive"),
            BranchStatus::Closed => write!(f, "closed"),
        }
    }
}

/// Branch names partitioned by status.
///
/// A name lands in exactly one of `active`, `inactive`, `closed` and is
/// always also in `all`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSet {
    pub active: Vec<String>,
    pub inactive: Vec<String>,
    pub closed: Vec<String>,
    pub all: Vec<String>,
}

impl BranchSet {
    /// Record one observed branch.
    pub fn insert(&mut self, name: impl Into<String>, status: BranchStatus) {
        let name = name.into();
        match status {
            BranchStatus::Active => self.active.push(name.clone()),
            BranchStatus::Inactive => self.inactive.push(name.clone()),
            BranchStatus::Closed => self.closed.push(name.clone()),
        }
        self.all.push(name);
    }

    /// Sort every bucket lexicographically.
    pub fn sort(&mut self) {
        self.active.sort();
        self.inactive.sort();
        self.closed.sort();
        self.all.sort();
    }

    /// Bucket for one status.
    pub fn bucket(&self, status: BranchStatus) -> &[String] {
        match status {
            BranchStatus::Active => &self.active,
            BranchStatus::Inactive => &self.inactive,
            BranchStatus::Closed => &self.closed,
        }
    }
}

/// Working-copy status tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTag {
    /// `A`
    Added,
    /// `!`
    Missing,
    /// `M`
    Modified,
    /// `R`
    Removed,
    /// `?`
    NotVersioned,
}

impl StatusTag {
    /// Look up a tag character in the fixed alphabet.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(StatusTag::Added),
            '!' => Some(StatusTag::Missing),
            'M' => Some(StatusTag::Modified),
            'R' => Some(StatusTag::Removed),
            '?' => Some(StatusTag::NotVersioned),
            _ => None,
        }
    }
}

/// Changed paths partitioned by status tag.
///
/// All five buckets always exist, empty or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub added: Vec<String>,
    pub missing: Vec<String>,
    pub modified: Vec<String>,
    pub removed: Vec<String>,
    pub not_versioned: Vec<String>,
}

impl StatusReport {
    /// Append a path to the bucket for `tag`.
    pub fn push(&mut self, tag: StatusTag, path: impl Into<String>) {
        self.bucket_mut(tag).push(path.into());
    }

    /// Paths recorded under `tag`.
    pub fn bucket(&self, tag: StatusTag) -> &[String] {
        match tag {
            StatusTag::Added => &self.added,
            StatusTag::Missing => &self.missing,
            StatusTag::Modified => &self.modified,
            StatusTag::Removed => &self.removed,
            StatusTag::NotVersioned => &self.not_versioned,
        }
    }

    fn bucket_mut(&mut self, tag: StatusTag) -> &mut Vec<String> {
        match tag {
            StatusTag::Added => &mut self.added,
            StatusTag::Missing => &mut self.missing,
            StatusTag::Modified => &mut self.modified,
            StatusTag::Removed => &mut self.removed,
            StatusTag::NotVersioned => &mut self.not_versioned,
        }
    }

    /// Whether no bucket holds a path.
    pub fn is_clean(&self) -> bool {
        self.added.is_empty()
            && self.missing.is_empty()
            && self.modified.is_empty()
            && self.removed.is_empty()
            && self.not_versioned.is_empty()
    }
}

/// Counts reported by a push or pull.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub changesets: u64,
    pub changes: u64,
    pub files: u64,
}

impl ChangeSummary {
    /// Nothing was transferred.
    pub const ZERO: ChangeSummary = ChangeSummary {
        changesets: 0,
        changes: 0,
        files: 0,
    };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl std::fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} changesets with {} changes to {} files",
            self.changesets, self.changes, self.files
        )
    }
}

/// Files touched by one changeset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedFiles {
    pub node: NodeId,
    pub files: Vec<String>,
}
