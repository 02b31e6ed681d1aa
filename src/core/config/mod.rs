//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Two configuration scopes share one schema ([`FileConfig`]):
//! - **Global**: user-level settings
//! - **Repo**: per-working-copy overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! `global_config` pairs accumulate (global first); `binary_overrides`
//! merge key by key.
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$DVCS_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/dvcs/config.toml`
//! 3. `~/.dvcs/config.toml`
//!
//! # Repo Config Locations
//!
//! Searched in order:
//! 1. `.hg/dvcs.toml`
//! 2. `.dvcs.toml`
//!
//! # Example
//!
//! ```no_run
//! use dvcswrap::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/repo"))).unwrap();
//! let config = result.config;
//!
//! println!("Backend: {}", config.backend());
//! let adapter = config.adapter_config();
//! println!("Log format: {}", adapter.log_format);
//! ```

pub mod schema;

pub use schema::FileConfig;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::adapter::AdapterConfig;

/// Environment variable naming the global config file.
pub const CONFIG_ENV: &str = "DVCS_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence automatically: repo config overrides global
/// config, which overrides defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: FileConfig,
    /// Repository configuration (if found)
    pub repo: Option<FileConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the repo config file (if loaded)
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `repo_path` is provided, also loads repo-specific config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or
    /// hold invalid values. Missing config files are not an error
    /// (defaults are used).
    pub fn load(repo_path: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        Self::load_with(&Self::global_candidates(), repo_path)
    }

    /// Load with an explicit list of global config candidates; the first
    /// existing one wins.
    pub fn load_with(
        global_candidates: &[PathBuf],
        repo_path: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();

        let (global, global_path) = match global_candidates.iter().find(|p| p.is_file()) {
            Some(path) => (Self::read_config(path)?, Some(path.clone())),
            None => (FileConfig::default(), None),
        };

        let (repo, repo_path_found) = match repo_path {
            Some(path) => Self::load_repo(path, &mut warnings)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        for warning in &warnings {
            tracing::warn!(path = %warning.path.display(), "{}", warning.message);
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                repo,
                global_path,
                repo_path: repo_path_found,
            },
            warnings,
        })
    }

    /// Global config locations, in search order.
    pub fn global_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            candidates.push(PathBuf::from(path));
        }
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            candidates.push(PathBuf::from(xdg_home).join("dvcs/config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".dvcs/config.toml"));
        }

        candidates
    }

    /// Load repository configuration from standard locations.
    fn load_repo(
        repo_path: &Path,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigError> {
        let canonical = Self::repo_config_path(repo_path);
        let fallback = repo_path.join(".dvcs.toml");

        if canonical.is_file() {
            if fallback.is_file() {
                warnings.push(ConfigWarning {
                    message: format!("ignoring config file, '{}' takes precedence", canonical.display()),
                    path: fallback,
                });
            }
            let config = Self::read_config(&canonical)?;
            return Ok((Some(config), Some(canonical)));
        }

        if fallback.is_file() {
            let config = Self::read_config(&fallback)?;
            return Ok((Some(config), Some(fallback)));
        }

        Ok((None, None))
    }

    /// Read and parse one config file.
    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the canonical path for repo config.
    ///
    /// Returns `.hg/dvcs.toml` relative to the given repo path.
    pub fn repo_config_path(repo_path: &Path) -> PathBuf {
        repo_path.join(".hg/dvcs.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    fn pick<'a, T>(&'a self, field: impl Fn(&'a FileConfig) -> Option<&'a T>) -> Option<&'a T>
    where
        T: ?Sized,
    {
        self.repo.as_ref().and_then(&field).or_else(|| field(&self.global))
    }

    /// Get the backend name.
    ///
    /// Defaults to "hg" if not configured.
    pub fn backend(&self) -> &str {
        self.pick(|c| c.backend.as_deref()).unwrap_or("hg")
    }

    /// Get the configured binary, if any.
    pub fn binary(&self) -> Option<&str> {
        self.pick(|c| c.binary.as_deref())
    }

    /// Get the `key=value` overrides, global entries first.
    pub fn global_config(&self) -> Vec<String> {
        let mut pairs = self.global.global_config.clone();
        if let Some(repo) = &self.repo {
            pairs.extend(repo.global_config.iter().cloned());
        }
        pairs
    }

    /// Get per-operation binary overrides, repo entries winning.
    pub fn binary_overrides(&self) -> BTreeMap<String, String> {
        let mut overrides = self.global.binary_overrides.clone();
        if let Some(repo) = &self.repo {
            overrides.extend(repo.binary_overrides.clone());
        }
        overrides
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }

    /// Resolve into the explicit object handed to a backend.
    pub fn adapter_config(&self) -> AdapterConfig {
        let mut adapter = AdapterConfig {
            binary: self.binary().map(str::to_string),
            binary_overrides: self.binary_overrides(),
            global_config: self.global_config(),
            ..AdapterConfig::default()
        };

        if let Some(format) = self.pick(|c| c.log_format.as_ref()) {
            adapter.log_format = *format;
        }
        if let Some(tool) = self.pick(|c| c.merge_tool.as_ref()) {
            adapter.merge_tool = tool.clone();
        }
        if let Some(tool) = self.pick(|c| c.diff_tool.as_ref()) {
            adapter.diff_tool = tool.clone();
        }

        adapter
    }
}
