//! tools::merge_tool
//!
//! The merge tool invoked by the tool during `merge`.
//!
//! It is called with four paths (`$base $local $other $output`), snapshots
//! the three input versions into persistent temporary files, and reports
//! them as one JSON object on stdout. The resolution itself is left to
//! whoever consumes the report.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::parse::MergeConflict;

/// Errors from the merge tool.
#[derive(Debug, Error)]
pub enum MergeToolError {
    /// An input version could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot could not be written or kept.
    #[error("failed to snapshot {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Copy `source` into a new temporary file that outlives the process.
///
/// Returns the snapshot path.
pub fn snapshot(source: &Path, dir: Option<&Path>) -> Result<PathBuf, MergeToolError> {
    let contents = fs::read(source).map_err(|e| MergeToolError::Read {
        path: source.to_path_buf(),
        source: e,
    })?;

    let snapshot_err = |e: std::io::Error| MergeToolError::Snapshot {
        path: source.to_path_buf(),
        source: e,
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix("dvcs-merge-");
    let file = match dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
    .map_err(snapshot_err)?;

    fs::write(file.path(), contents).map_err(snapshot_err)?;
    let (_, path) = file.keep().map_err(|e| snapshot_err(e.error))?;
    Ok(path)
}

/// Snapshot the three versions and build the report.
///
/// `tar` is passed through untouched.
pub fn record_conflict(
    base: &Path,
    local: &Path,
    other: &Path,
    tar: &Path,
    dir: Option<&Path>,
) -> Result<MergeConflict, MergeToolError> {
    Ok(MergeConflict {
        base: snapshot(base, dir)?,
        local: snapshot(local, dir)?,
        other: snapshot(other, dir)?,
        tar: tar.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn snapshots_copy_contents() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let base = write(src.path(), "base", "common\n");
        let local = write(src.path(), "local", "mine\n");
        let other = write(src.path(), "other", "theirs\n");
        let tar = src.path().join("file.txt");

        let conflict = record_conflict(&base, &local, &other, &tar, Some(out.path())).unwrap();

        assert_eq!(fs::read_to_string(&conflict.base).unwrap(), "common\n");
        assert_eq!(fs::read_to_string(&conflict.local).unwrap(), "mine\n");
        assert_eq!(fs::read_to_string(&conflict.other).unwrap(), "theirs\n");
        assert_eq!(conflict.tar, tar);
        assert!(conflict.base.starts_with(out.path()));
        assert_ne!(conflict.base, base);
    }

    #[test]
    fn report_is_parseable_from_merge_output() {
        let src = TempDir::new().unwrap();
        let file = write(src.path(), "f", "x");
        let conflict = record_conflict(&file, &file, &file, &file, Some(src.path())).unwrap();

        let json = serde_json::to_string(&conflict).unwrap();
        let output = format!("merging f\n{json}\n0 files updated, 1 files merged\n");
        let parsed = crate::parse::parse_conflicts(&output).unwrap();
        assert_eq!(parsed, vec![conflict]);
    }

    #[test]
    fn missing_input_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = snapshot(&dir.path().join("nope"), Some(dir.path())).unwrap_err();
        assert!(matches!(err, MergeToolError::Read { .. }));
    }
}
