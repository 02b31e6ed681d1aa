//! parse::summary
//!
//! Push/pull confirmation text.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::model::ChangeSummary;

static ADDED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"added (?P<changesets>\d+) changesets? with (?P<changes>\d+) changes? to (?P<files>\d+) files?")
        .expect("summary pattern is valid")
});

/// Extract transfer counts from push/pull output.
///
/// Output without a confirmation line means nothing was transferred and
/// yields [`ChangeSummary::ZERO`]; this is never an error. Counts too large
/// for a `u64` saturate at `u64::MAX`.
///
/// # Example
///
/// ```
/// use dvcswrap::parse::parse_change_summary;
/// use dvcswrap::core::model::ChangeSummary;
///
/// let s = parse_change_summary("added 1 changesets with 1 changes to 1 files");
/// assert_eq!((s.changesets, s.changes, s.files), (1, 1, 1));
/// assert_eq!(parse_change_summary("no changes found"), ChangeSummary::ZERO);
/// ```
pub fn parse_change_summary(out: &str) -> ChangeSummary {
    let Some(caps) = ADDED.captures(out) else {
        return ChangeSummary::ZERO;
    };
    let count = |name: &str| caps[name].parse::<u64>().unwrap_or(u64::MAX);
    ChangeSummary {
        changesets: count("changesets"),
        changes: count("changes"),
        files: count("files"),
    }
}
