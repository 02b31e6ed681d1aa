//! parse::status
//!
//! Parsing of `status` output: one tag character, one space, one path.

use crate::core::model::{StatusReport, StatusTag};
use crate::error::DvcsError;

/// Parse status lines into a [`StatusReport`].
///
/// Paths are taken verbatim after the separating space, so paths with
/// spaces survive. All five buckets are present even for empty output.
///
/// # Errors
///
/// [`DvcsError::Parse`] for a tag outside the `A ! M R ?` alphabet or a
/// line that is not `<tag> <path>`.
///
/// # Example
///
/// ```
/// use dvcswrap::parse::parse_status;
///
/// let report = parse_status("A asd\n? test_file.txt").unwrap();
/// assert_eq!(report.added, vec!["asd"]);
/// assert_eq!(report.not_versioned, vec!["test_file.txt"]);
/// assert!(report.modified.is_empty());
/// ```
pub fn parse_status(out: &str) -> Result<StatusReport, DvcsError> {
    let mut report = StatusReport::default();

    for line in out.lines().map(|l| l.trim_end_matches('\r')) {
        if line.trim().is_empty() {
            continue;
        }

        let mut chars = line.chars();
        let (tag, sep) = (chars.next(), chars.next());
        let (Some(tag), Some(' ')) = (tag, sep) else {
            return Err(DvcsError::parse(
                "status",
                format!("malformed line {line:?}"),
            ));
        };

        let tag = StatusTag::from_char(tag).ok_or_else(|| {
            DvcsError::parse("status", format!("unknown status tag '{tag}' in line {line:?}"))
        })?;

        report.push(tag, chars.as_str());
    }

    Ok(report)
}
