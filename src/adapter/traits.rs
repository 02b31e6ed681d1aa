//! adapter::traits
//!
//! The backend-independent repository interface.
//!
//! # Design
//!
//! Every backend implements [`Dvcs`]. Operations a backend does not
//! support keep the trait's default body, which returns
//! [`DvcsError::NotImplemented`] naming the backend and the operation, so
//! callers can tell "unsupported" apart from "failed".
//!
//! Calls are synchronous: each operation spawns at most one process and
//! blocks until it exits. Nothing is locked; concurrent operations against
//! the same working copy race exactly as concurrent tool invocations would.
//!
//! # Example
//!
//! ```no_run
//! use dvcswrap::adapter::{open_repository, AdapterConfig, CommitOptions};
//!
//! # fn main() -> Result<(), dvcswrap::DvcsError> {
//! let repo = open_repository("/srv/project", "hg", AdapterConfig::default())?;
//! repo.add(&[])?;
//! repo.commit(&CommitOptions::new("Initial import"))?;
//! for entry in repo.log(None)?.entries {
//!     println!("{} {}", entry.short_id(), entry.message);
//! }
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use crate::core::model::{BranchSet, ChangeSummary, ChangedFiles, Log, LogEntry, StatusReport};
use crate::core::types::BackendKind;
use crate::error::DvcsError;

/// A working copy bound to one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoHandle {
    path: PathBuf,
    backend: BackendKind,
}

impl RepoHandle {
    pub fn new(path: impl Into<PathBuf>, backend: BackendKind) -> Self {
        Self {
            path: path.into(),
            backend,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }
}

/// Parameters for [`Dvcs::commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOptions {
    /// Commit message
    pub message: String,
    /// Author override
    pub user: Option<String>,
    /// Add new and forget missing files first (default: true)
    pub addremove: bool,
    /// Restrict the commit to these paths (empty = everything)
    pub files: Vec<String>,
}

impl CommitOptions {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            user: None,
            addremove: true,
            files: Vec::new(),
        }
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn addremove(mut self, addremove: bool) -> Self {
        self.addremove = addremove;
        self
    }

    pub fn files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }
}

/// Parameters for [`Dvcs::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOptions {
    pub branch: Option<String>,
    pub revision: Option<String>,
    /// Only list the changesets that would be merged
    pub preview: bool,
}

/// Parameters for [`Dvcs::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOptions {
    pub branch: Option<String>,
    pub revision: Option<String>,
    /// Discard uncommitted changes (default: true)
    pub clean: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            branch: None,
            revision: None,
            clean: true,
        }
    }
}

/// Parameters for [`Dvcs::push`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushOptions {
    pub destination: Option<String>,
    /// Allow creating new remote branches
    pub new_branch: bool,
}

/// Parameters for [`Dvcs::pull`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullOptions {
    pub source: Option<String>,
    pub branch: Option<String>,
}

/// Reject a branch and a revision given together.
///
/// # Errors
///
/// [`DvcsError::Precondition`] when both are present and non-empty.
pub fn ensure_branch_or_revision(
    branch: Option<&str>,
    revision: Option<&str>,
) -> Result<(), DvcsError> {
    let set = |v: Option<&str>| v.is_some_and(|s| !s.is_empty());
    if set(branch) && set(revision) {
        return Err(DvcsError::Precondition(
            "a branch and a revision cannot both be given".to_string(),
        ));
    }
    Ok(())
}

fn unsupported<T>(backend: BackendKind, operation: &'static str) -> Result<T, DvcsError> {
    Err(DvcsError::NotImplemented {
        backend: backend.name(),
        operation,
    })
}

/// Uniform interface over a version-control tool.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait Dvcs: Send + Sync {
    /// The working copy and backend this adapter is bound to.
    fn handle(&self) -> &RepoHandle;

    /// Backend name (e.g. "hg").
    fn name(&self) -> &'static str {
        self.handle().backend().name()
    }

    /// Clone `remote` into the handle's path.
    fn clone_repo(&self, _remote: &str) -> Result<String, DvcsError> {
        unsupported(self.handle().backend(), "clone")
    }

    /// Set the working-copy branch, or report it when `name` is empty.
    ///
    /// Returns the trimmed tool output.
    fn branch(&self, _name: &str) -> Result<String, DvcsError> {
        unsupported(self.handle().backend(), "branch")
    }

    /// Schedule files for addition; an empty slice adds everything.
    fn add(&self, _paths: &[String]) -> Result<String, DvcsError> {
        unsupported(self.handle().backend(), "add")
    }

    fn commit(&self, _options: &CommitOptions) -> Result<String, DvcsError> {
        unsupported(self.handle().backend(), "commit")
    }

    /// Merge another head into the working copy.
    ///
    /// Conflicts are resolved by the configured merge tool, whose JSON
    /// reports are embedded in the returned output (see
    /// [`crate::parse::parse_conflicts`]).
    ///
    /// # Errors
    ///
    /// [`DvcsError::Precondition`] when both a branch and a revision are
    /// given; no process is spawned.
    fn merge(&self, _options: &MergeOptions) -> Result<String, DvcsError> {
        unsupported(self.handle().backend(), "merge")
    }

    /// Push outgoing changesets. Nothing to push yields [`ChangeSummary::ZERO`].
    fn push(&self, _options: &PushOptions) -> Result<ChangeSummary, DvcsError> {
        unsupported(self.handle().backend(), "push")
    }

    /// Pull incoming changesets. Nothing to pull yields [`ChangeSummary::ZERO`].
    fn pull(&self, _options: &PullOptions) -> Result<ChangeSummary, DvcsError> {
        unsupported(self.handle().backend(), "pull")
    }

    /// Update the working copy.
    ///
    /// # Errors
    ///
    /// [`DvcsError::Precondition`] when both a branch and a revision are
    /// given.
    fn update(&self, _options: &UpdateOptions) -> Result<String, DvcsError> {
        unsupported(self.handle().backend(), "update")
    }

    /// Create a new repository at the handle's path.
    fn init_repo(&self) -> Result<String, DvcsError> {
        unsupported(self.handle().backend(), "init_repo")
    }

    fn status(&self) -> Result<StatusReport, DvcsError> {
        unsupported(self.handle().backend(), "status")
    }

    /// Full history, optionally restricted to one branch.
    fn log(&self, _branch: Option<&str>) -> Result<Log, DvcsError> {
        unsupported(self.handle().backend(), "log")
    }

    fn user_commits(&self, _user: &str, _limit: Option<u32>) -> Result<Vec<LogEntry>, DvcsError> {
        unsupported(self.handle().backend(), "user_commits")
    }

    /// File status changes between two revisions.
    fn changed_between_nodes(&self, _start: &str, _end: &str) -> Result<StatusReport, DvcsError> {
        unsupported(self.handle().backend(), "changed_between_nodes")
    }

    /// All branch names, bucketed by status and sorted.
    fn branches(&self) -> Result<BranchSet, DvcsError> {
        unsupported(self.handle().backend(), "branches")
    }

    fn branch_revisions(&self, _branch: &str) -> Result<Vec<LogEntry>, DvcsError> {
        unsupported(self.handle().backend(), "branch_revisions")
    }

    /// Unified diff of `path`, optionally against `identifier`.
    fn diff_unified(&self, _path: &str, _identifier: Option<&str>) -> Result<String, DvcsError> {
        unsupported(self.handle().backend(), "diff_unified")
    }

    /// HTML diff of `path` rendered by the configured diff tool.
    ///
    /// The tool's exit code is ignored.
    fn diff_html(&self, _path: &str, _identifier: Option<&str>) -> Result<String, DvcsError> {
        unsupported(self.handle().backend(), "diff_html")
    }

    /// Whether the default remote has changesets not present locally.
    fn has_new_changesets(&self, _branch: Option<&str>) -> Result<bool, DvcsError> {
        unsupported(self.handle().backend(), "has_new_changesets")
    }

    /// Changesets on the default remote not present locally.
    fn get_new_changesets(&self, _branch: Option<&str>) -> Result<Vec<LogEntry>, DvcsError> {
        unsupported(self.handle().backend(), "get_new_changesets")
    }

    /// Touched files per changeset in `start..=end` (from the first
    /// revision when `start` is `None`).
    fn get_changed_files(
        &self,
        _start: Option<&str>,
        _end: &str,
    ) -> Result<Vec<ChangedFiles>, DvcsError> {
        unsupported(self.handle().backend(), "get_changed_files")
    }

    /// The tip changeset, optionally of one branch. `None` in an empty
    /// repository.
    fn get_head(&self, _branch: Option<&str>) -> Result<Option<LogEntry>, DvcsError> {
        unsupported(self.handle().backend(), "get_head")
    }
}
