//! parse::branches
//!
//! Parsing of `branches -c` listings.
//!
//! Each line is `<name> <rev>:<hash>` optionally followed by a
//! parenthesized status (`inactive` or `closed`). Names may contain spaces
//! and even parentheses, so the line is anchored on its trailing head
//! descriptor rather than split on the first whitespace.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::model::{BranchSet, BranchStatus};
use crate::error::DvcsError;

static BRANCH_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.*?)\s+(?P<head>-?\d+:[0-9a-fA-F]+)(?:\s+\((?P<status>[^()]*)\))?\s*$")
        .expect("branch line pattern is valid")
});

/// Parse a branch listing into status buckets.
///
/// Lines without a suffix are active. Buckets keep the tool's order;
/// callers that want sorted output call [`BranchSet::sort`].
///
/// # Errors
///
/// [`DvcsError::Parse`] for a line that has no head descriptor, an empty
/// name, or an unknown status suffix.
///
/// # Example
///
/// ```
/// use dvcswrap::parse::parse_branches;
///
/// let set = parse_branches("default    3:a1b2c3d4e5f6\nold stuff   1:0123456789ab (closed)\n").unwrap();
/// assert_eq!(set.active, vec!["default"]);
/// assert_eq!(set.closed, vec!["old stuff"]);
/// ```
pub fn parse_branches(out: &str) -> Result<BranchSet, DvcsError> {
    let mut set = BranchSet::default();

    for line in out.lines().map(|l| l.trim_end_matches('\r')) {
        if line.trim().is_empty() {
            continue;
        }

        let caps = BRANCH_LINE
            .captures(line)
            .ok_or_else(|| DvcsError::parse("branches", format!("unrecognized line {line:?}")))?;

        let name = caps["name"].trim();
        if name.is_empty() {
            return Err(DvcsError::parse(
                "branches",
                format!("missing branch name in line {line:?}"),
            ));
        }

        let status = match caps.name("status") {
            Some(m) => BranchStatus::parse(m.as_str()).ok_or_else(|| {
                DvcsError::parse(
                    "branches",
                    format!("unknown branch status '{}' in line {line:?}", m.as_str()),
                )
            })?,
            None => BranchStatus::Active,
        };

        set.insert(name, status);
    }

    Ok(set)
}
