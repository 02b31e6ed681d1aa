//! error
//!
//! The domain error shared by every adapter operation.
//!
//! # Taxonomy
//!
//! - [`DvcsError::UnknownBackend`]: configuration error, raised before any
//!   process is spawned
//! - [`DvcsError::Precondition`]: mutually exclusive parameters
//! - [`DvcsError::CommandFailed`]: non-zero exit not matching a benign pattern
//! - [`DvcsError::Spawn`]: the shell could not be started at all
//! - [`DvcsError::Parse`]: the command succeeded but its output was not
//!   in the expected shape
//! - [`DvcsError::NotImplemented`]: the selected backend lacks the operation
//!
//! Benign empty results (e.g. `no changes found` on push) never surface as
//! errors; they are converted to canonical empty values by the classifier.

use thiserror::Error;

use crate::core::types::TypeError;

/// Errors from adapter operations.
#[derive(Debug, Error)]
pub enum DvcsError {
    /// The backend identifier is not in the registry.
    #[error("unknown backend '{name}', available backends: {available}")]
    UnknownBackend {
        /// The identifier that failed to resolve
        name: String,
        /// Comma-separated canonical names
        available: String,
    },

    /// Parameters violate an operation precondition.
    #[error("{0}")]
    Precondition(String),

    /// The tool exited with a failure status.
    #[error("executing `{command}` failed with exit code {code}; stderr: {stderr} stdout: {stdout}")]
    CommandFailed {
        /// The full shell command
        command: String,
        /// Process exit code (-1 when terminated by a signal)
        code: i32,
        /// Captured stdout
        stdout: String,
        /// Captured stderr
        stderr: String,
    },

    /// The shell process could not be spawned.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        /// The full shell command
        command: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Tool output could not be parsed.
    #[error("{what} parsing failed: {message}")]
    Parse {
        /// Which output was being parsed (e.g. "log")
        what: &'static str,
        /// Underlying parser message
        message: String,
    },

    /// The backend does not support the operation.
    #[error("operation '{operation}' is not implemented by the {backend} backend")]
    NotImplemented {
        /// Backend name
        backend: &'static str,
        /// Operation name
        operation: &'static str,
    },
}

impl DvcsError {
    /// Build a parse error.
    pub fn parse(what: &'static str, message: impl std::fmt::Display) -> Self {
        DvcsError::Parse {
            what,
            message: message.to_string(),
        }
    }

    /// Exit code of a failed command, if this is a process failure.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            DvcsError::CommandFailed { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Captured stdout of a failed command.
    pub fn stdout(&self) -> Option<&str> {
        match self {
            DvcsError::CommandFailed { stdout, .. } => Some(stdout),
            _ => None,
        }
    }

    /// Captured stderr of a failed command.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            DvcsError::CommandFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }

    /// Whether this signals an unsupported operation rather than a failure.
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, DvcsError::NotImplemented { .. })
    }
}

impl From<TypeError> for DvcsError {
    fn from(err: TypeError) -> Self {
        DvcsError::parse("node id", err)
    }
}
