//! adapter::settings
//!
//! The explicit configuration object handed to a backend at construction.
//!
//! Nothing here is read from the environment; loading files and applying
//! precedence is the job of [`crate::core::config`], which produces an
//! [`AdapterConfig`] via `Config::adapter_config`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Which log rendering a backend requests from the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// `--style xml` markup
    #[default]
    Xml,
    /// Double-tab separated `--template` lines
    Template,
}

impl LogFormat {
    pub fn name(&self) -> &'static str {
        match self {
            LogFormat::Xml => "xml",
            LogFormat::Template => "template",
        }
    }

    /// Parse a format name (`xml`/`markup` or `template`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "xml" | "markup" => Some(LogFormat::Xml),
            "template" => Some(LogFormat::Template),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Name of the bundled merge-tool binary.
pub const MERGE_TOOL_NAME: &str = "dvcs-mergetool";

/// Name of the bundled diff-tool binary.
pub const DIFF_TOOL_NAME: &str = "dvcs-difftool";

/// Resolved adapter configuration.
///
/// # Defaults
///
/// - `binary`: `None`, meaning the backend's own executable (`hg`, `git`)
/// - `binary_overrides`: empty
/// - `global_config`: empty
/// - `log_format`: [`LogFormat::Xml`]
/// - `merge_tool` / `diff_tool`: the bundled tools next to the running
///   executable when present, otherwise their bare names (looked up on
///   `PATH` by the shell)
///
/// # Example
///
/// ```
/// use dvcswrap::adapter::{AdapterConfig, LogFormat};
///
/// let config = AdapterConfig::default()
///     .with_binary_override("log", "ssh -C remote.server hg")
///     .with_global_config("ui.username=Jan <jan@example.com>")
///     .with_log_format(LogFormat::Template);
///
/// assert_eq!(config.binary_for("log", "hg"), "ssh -C remote.server hg");
/// assert_eq!(config.binary_for("status", "hg"), "hg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Executable replacing the backend default for every operation
    pub binary: Option<String>,
    /// Operation name → executable (may contain a prefix such as `ssh host`)
    pub binary_overrides: BTreeMap<String, String>,
    /// `key=value` pairs passed as config overrides on every invocation
    pub global_config: Vec<String>,
    /// Log rendering requested from the tool
    pub log_format: LogFormat,
    /// Merge-tool executable wired into `merge`
    pub merge_tool: PathBuf,
    /// Diff-tool executable used by `diff_html`
    pub diff_tool: PathBuf,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            binary: None,
            binary_overrides: BTreeMap::new(),
            global_config: Vec::new(),
            log_format: LogFormat::default(),
            merge_tool: bundled_tool(MERGE_TOOL_NAME),
            diff_tool: bundled_tool(DIFF_TOOL_NAME),
        }
    }
}

impl AdapterConfig {
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = Some(binary.into());
        self
    }

    pub fn with_binary_override(
        mut self,
        operation: impl Into<String>,
        binary: impl Into<String>,
    ) -> Self {
        self.binary_overrides.insert(operation.into(), binary.into());
        self
    }

    pub fn with_global_config(mut self, pair: impl Into<String>) -> Self {
        self.global_config.push(pair.into());
        self
    }

    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    pub fn with_merge_tool(mut self, path: impl Into<PathBuf>) -> Self {
        self.merge_tool = path.into();
        self
    }

    pub fn with_diff_tool(mut self, path: impl Into<PathBuf>) -> Self {
        self.diff_tool = path.into();
        self
    }

    /// Executable for `operation`, falling back to `binary`, then to the
    /// backend default.
    pub fn binary_for<'a>(&'a self, operation: &str, backend_default: &'a str) -> &'a str {
        self.binary_overrides
            .get(operation)
            .or(self.binary.as_ref())
            .map(String::as_str)
            .unwrap_or(backend_default)
    }
}

/// Locate a bundled tool next to the running executable.
fn bundled_tool(name: &str) -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .map(|dir| dir.join(name))
        .filter(|candidate| candidate.is_file())
        .unwrap_or_else(|| PathBuf::from(name))
}
