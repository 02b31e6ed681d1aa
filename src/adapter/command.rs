//! adapter::command
//!
//! Construction of the exact shell command string for one operation.
//!
//! # Shape
//!
//! ```text
//! <prepend> <binary> <scope-flag> <path> <config...> <operation> <args...>
//! ```
//!
//! - the binary may be overridden per operation (e.g. `log` routed through
//!   `ssh -C remote.server hg`)
//! - the scope is omitted for operations that create a repository
//! - optional parameters contribute no tokens when absent
//! - every caller-supplied value is shell-quoted, so the shell sees exactly
//!   one token per logical value
//!
//! # Example
//!
//! ```
//! use dvcswrap::adapter::{AdapterConfig, CommandBuilder, Dialect};
//!
//! let builder = CommandBuilder::new(Dialect::MERCURIAL, "hg", "/srv/repo", &AdapterConfig::default());
//!
//! let cmd = builder
//!     .command("pull")
//!     .opt_value("--branch", Some("stable"))
//!     .opt_arg(None::<&str>)
//!     .render();
//! assert_eq!(cmd, "hg -R /srv/repo pull --branch stable");
//! ```

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use super::settings::AdapterConfig;

/// Flags that differ between tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Flag selecting the working copy (`-R` for hg, `-C` for git)
    pub scope_flag: &'static str,
    /// Flag introducing one `key=value` override
    pub config_flag: &'static str,
}

impl Dialect {
    pub const MERCURIAL: Dialect = Dialect {
        scope_flag: "-R",
        config_flag: "--config",
    };

    pub const GIT: Dialect = Dialect {
        scope_flag: "-C",
        config_flag: "-c",
    };
}

/// Quote one value for `sh`.
///
/// Strings made only of shell-safe characters are returned unchanged; the
/// empty string becomes `''`.
pub fn quote(value: &str) -> String {
    shell_escape::unix::escape(Cow::Borrowed(value)).into_owned()
}

/// Per-backend factory for [`Invocation`]s.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    dialect: Dialect,
    default_binary: String,
    settings: AdapterConfig,
    repo_path: PathBuf,
}

impl CommandBuilder {
    /// Create a builder for the working copy at `repo_path`.
    ///
    /// `default_binary` is used unless `config` names a binary or an
    /// operation-specific override.
    pub fn new(
        dialect: Dialect,
        default_binary: &str,
        repo_path: impl Into<PathBuf>,
        config: &AdapterConfig,
    ) -> Self {
        Self {
            dialect,
            default_binary: default_binary.to_string(),
            settings: config.clone(),
            repo_path: repo_path.into(),
        }
    }

    /// The working copy every scoped command targets.
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Start an invocation of `operation`.
    pub fn command(&self, operation: &str) -> Invocation {
        Invocation {
            dialect: self.dialect,
            prepend: None,
            binary: self
                .settings
                .binary_for(operation, &self.default_binary)
                .to_string(),
            scope: Some(quote(&self.repo_path.to_string_lossy())),
            config: self
                .settings
                .global_config
                .iter()
                .map(|kv| quote(kv))
                .collect(),
            operation: operation.to_string(),
            args: Vec::new(),
        }
    }
}

/// One command being assembled.
///
/// All methods consume and return `self` so calls chain; nothing runs until
/// the rendered string is handed to a runner.
#[derive(Debug, Clone)]
#[must_use]
pub struct Invocation {
    dialect: Dialect,
    prepend: Option<String>,
    binary: String,
    scope: Option<String>,
    config: Vec<String>,
    operation: String,
    args: Vec<String>,
}

impl Invocation {
    /// Operation name (e.g. `log`).
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Append a literal token such as a flag. Not quoted.
    pub fn arg(mut self, token: impl Into<String>) -> Self {
        self.args.push(token.into());
        self
    }

    /// Append a caller-supplied value, quoted.
    pub fn value(mut self, value: impl AsRef<str>) -> Self {
        self.args.push(quote(value.as_ref()));
        self
    }

    /// Append each value, quoted.
    pub fn values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(values.into_iter().map(|v| quote(v.as_ref())));
        self
    }

    /// Append a filesystem path, quoted.
    pub fn path(self, path: impl AsRef<Path>) -> Self {
        let rendered = path.as_ref().to_string_lossy().into_owned();
        self.value(rendered)
    }

    /// Append `value` as a positional argument when present and non-empty.
    pub fn opt_arg<S: AsRef<str>>(self, value: Option<S>) -> Self {
        match value {
            Some(v) if !v.as_ref().is_empty() => self.value(v),
            _ => self,
        }
    }

    /// Append `flag value` when `value` is present and non-empty.
    pub fn opt_value<S: AsRef<str>>(self, flag: &str, value: Option<S>) -> Self {
        match value {
            Some(v) if !v.as_ref().is_empty() => self.arg(flag).value(v),
            _ => self,
        }
    }

    /// Append `flag` only when `condition` holds.
    pub fn flag_if(self, condition: bool, flag: &str) -> Self {
        if condition {
            self.arg(flag)
        } else {
            self
        }
    }

    /// Add a per-call `key=value` override after the global ones.
    pub fn config(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.config
            .push(quote(&format!("{key}={}", value.as_ref())));
        self
    }

    /// Drop the working-copy scope (for `clone` and `init`).
    pub fn unscoped(mut self) -> Self {
        self.scope = None;
        self
    }

    /// Put `prefix` in front of the binary (e.g. `cd /tmp &&`, `nice`).
    pub fn prepend(mut self, prefix: impl Into<String>) -> Self {
        self.prepend = Some(prefix.into());
        self
    }

    /// Render the final command string.
    pub fn render(&self) -> String {
        let mut tokens: Vec<&str> = Vec::new();

        if let Some(prefix) = &self.prepend {
            tokens.push(prefix);
        }
        tokens.push(&self.binary);
        if let Some(scope) = &self.scope {
            tokens.push(self.dialect.scope_flag);
            tokens.push(scope);
        }
        for pair in &self.config {
            tokens.push(self.dialect.config_flag);
            tokens.push(pair);
        }
        tokens.push(&self.operation);
        tokens.extend(self.args.iter().map(String::as_str));

        tokens
            .into_iter()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
