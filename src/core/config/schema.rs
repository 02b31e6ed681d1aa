//! core::config::schema
//!
//! Configuration file schema.
//!
//! Both scopes (global and repo) share one schema; the repo file takes
//! precedence key by key. See [`super::Config`] for how the two merge.
//!
//! # Validation
//!
//! Values are validated after parsing: the backend must be known, every
//! `global_config` entry must be a `key=value` pair, and no override may
//! name an empty operation or executable.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::adapter::LogFormat;
use crate::core::types::BackendKind;

/// One configuration file.
///
/// # Example
///
/// ```toml
/// backend = "hg"
/// binary = "/usr/local/bin/hg"
/// global_config = ["ui.username=Jan <jan@example.com>", "ui.interactive=false"]
/// log_format = "template"
/// merge_tool = "/opt/dvcs/bin/dvcs-mergetool"
///
/// [binary_overrides]
/// log = "ssh -C remote.server hg"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Backend name (`hg`, `mercurial`, `mercurial.hg`, `git`)
    pub backend: Option<String>,

    /// Executable replacing the backend default
    pub binary: Option<String>,

    /// `key=value` overrides passed to every invocation
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub global_config: Vec<String>,

    /// Log rendering requested from the tool
    pub log_format: Option<LogFormat>,

    /// Merge-tool executable
    pub merge_tool: Option<PathBuf>,

    /// Diff-tool executable
    pub diff_tool: Option<PathBuf>,

    /// Operation name → executable
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub binary_overrides: BTreeMap<String, String>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(backend) = &self.backend {
            if BackendKind::parse(backend).is_none() {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid backend '{}', must be one of: {}",
                    backend,
                    BackendKind::available_names()
                )));
            }
        }

        if let Some(binary) = &self.binary {
            if binary.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "binary cannot be empty".to_string(),
                ));
            }
        }

        for pair in &self.global_config {
            match pair.split_once('=') {
                Some((key, _)) if !key.trim().is_empty() => {}
                _ => {
                    return Err(ConfigError::InvalidValue(format!(
                        "global_config entry '{pair}' is not a key=value pair"
                    )))
                }
            }
        }

        for (operation, binary) in &self.binary_overrides {
            if operation.trim().is_empty() || binary.trim().is_empty() {
                return Err(ConfigError::InvalidValue(format!(
                    "binary override '{operation}' = '{binary}' must name an operation and an executable"
                )));
            }
        }

        Ok(())
    }
}
