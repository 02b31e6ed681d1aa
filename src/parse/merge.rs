//! parse::merge
//!
//! Merge-tool reports embedded in merge output.
//!
//! The merge operation returns its output verbatim; this helper is for
//! callers that want the conflict records as values. Each conflicting file
//! produces one JSON object (written by `dvcs-mergetool`), interleaved with
//! the tool's own progress lines.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::DvcsError;

/// One conflicting file as reported by the merge tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConflict {
    /// Copy of the common ancestor version
    pub base: PathBuf,
    /// Copy of the local version
    pub local: PathBuf,
    /// Copy of the other version
    pub other: PathBuf,
    /// Where the resolved file must be written
    pub tar: PathBuf,
}

/// Extract every merge-tool object from merge output, in order.
///
/// # Errors
///
/// [`DvcsError::Parse`] when an object starts like a report but is not
/// valid JSON with the four expected keys.
pub fn parse_conflicts(out: &str) -> Result<Vec<MergeConflict>, DvcsError> {
    const MARKER: &str = "{\"base\"";

    let mut conflicts = Vec::new();
    let mut rest = out;
    while let Some(start) = rest.find(MARKER) {
        let mut stream =
            serde_json::Deserializer::from_str(&rest[start..]).into_iter::<MergeConflict>();
        let conflict = stream
            .next()
            .ok_or_else(|| DvcsError::parse("merge", "truncated merge-tool report"))?
            .map_err(|e| DvcsError::parse("merge", e))?;
        conflicts.push(conflict);
        rest = &rest[start + stream.byte_offset()..];
    }

    Ok(conflicts)
}
