//! adapter::factory
//!
//! Backend selection and creation.
//!
//! # Design
//!
//! Callers name a backend with a configuration string; the string is
//! resolved once through [`BackendKind::parse`] and the matching typed
//! backend is returned behind `Box<dyn Dvcs>`. An unknown name fails here,
//! before any process is spawned.

use std::path::PathBuf;
use std::sync::Arc;

use super::settings::AdapterConfig;
use super::traits::Dvcs;
use crate::backends::{Git, Mercurial};
use crate::core::types::BackendKind;
use crate::error::DvcsError;
use crate::process::{CommandRunner, ShellRunner};

/// Resolve a backend identifier.
///
/// # Errors
///
/// [`DvcsError::UnknownBackend`] listing the available names.
pub fn resolve_backend(name: &str) -> Result<BackendKind, DvcsError> {
    BackendKind::parse(name).ok_or_else(|| DvcsError::UnknownBackend {
        name: name.to_string(),
        available: BackendKind::available_names(),
    })
}

/// Open the working copy at `path` with the named backend, running
/// commands through `sh`.
///
/// # Example
///
/// ```
/// use dvcswrap::adapter::{open_repository, AdapterConfig};
///
/// let repo = open_repository("/srv/project", "mercurial.hg", AdapterConfig::default()).unwrap();
/// assert_eq!(repo.name(), "hg");
///
/// assert!(open_repository("/srv/project", "svn", AdapterConfig::default()).is_err());
/// ```
pub fn open_repository(
    path: impl Into<PathBuf>,
    backend: &str,
    config: AdapterConfig,
) -> Result<Box<dyn Dvcs>, DvcsError> {
    open_repository_with(path, backend, config, Arc::new(ShellRunner::new()))
}

/// Like [`open_repository`] but with an explicit runner.
pub fn open_repository_with(
    path: impl Into<PathBuf>,
    backend: &str,
    config: AdapterConfig,
    runner: Arc<dyn CommandRunner>,
) -> Result<Box<dyn Dvcs>, DvcsError> {
    let kind = resolve_backend(backend)?;
    let path = path.into();
    tracing::debug!(backend = %kind, path = %path.display(), "opening repository");

    Ok(match kind {
        BackendKind::Mercurial => Box::new(Mercurial::new(&path, &config, runner)),
        BackendKind::Git => Box::new(Git::new(&path, &config, runner)),
    })
}
