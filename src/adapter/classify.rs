//! adapter::classify
//!
//! Turns a raw process result into success, a benign empty result, or a
//! failure.
//!
//! Several tool commands signal "nothing to do" through a non-zero exit
//! (`push` with nothing outgoing, `incoming` with nothing incoming). Those
//! are valid answers, not errors, and are mapped to [`Outcome::Empty`] so
//! each operation can return its canonical empty value.

use crate::error::DvcsError;
use crate::process::RunOutput;

/// Phrase the tool prints when a push or pull transfers nothing.
pub const NO_CHANGES_FOUND: &str = "no changes found";

/// How an operation interprets exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitPolicy {
    /// Only exit 0 is success.
    Strict,
    /// Exit 1 with `no changes found` on stdout is a benign empty result.
    NoChangesFound,
    /// Exit 1 is a benign empty result regardless of output.
    ExitOneIsEmpty,
    /// Every exit code is success.
    Suppressed,
}

/// Classified result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command succeeded; carries stdout.
    Output(String),
    /// The command reported a benign "nothing" result.
    Empty,
}

impl Outcome {
    /// Stdout for [`Outcome::Output`], empty string for [`Outcome::Empty`].
    pub fn into_text(self) -> String {
        match self {
            Outcome::Output(out) => out,
            Outcome::Empty => String::new(),
        }
    }
}

/// Classify `output` of `command` under `policy`.
///
/// # Errors
///
/// [`DvcsError::CommandFailed`] carrying the command and both streams when
/// the exit code is a failure under `policy`.
pub fn classify(command: &str, output: RunOutput, policy: ExitPolicy) -> Result<Outcome, DvcsError> {
    if output.success() {
        return Ok(Outcome::Output(output.stdout));
    }

    let benign = match policy {
        ExitPolicy::Strict => false,
        ExitPolicy::NoChangesFound => output.code == 1 && output.stdout.contains(NO_CHANGES_FOUND),
        ExitPolicy::ExitOneIsEmpty => output.code == 1,
        ExitPolicy::Suppressed => {
            tracing::debug!(%command, code = output.code, "ignoring exit code");
            return Ok(Outcome::Output(output.stdout));
        }
    };

    if benign {
        tracing::debug!(%command, code = output.code, "benign empty result");
        return Ok(Outcome::Empty);
    }

    tracing::warn!(%command, code = output.code, stderr = %output.stderr.trim(), "command failed");
    Err(DvcsError::CommandFailed {
        command: command.to_string(),
        code: output.code,
        stdout: output.stdout,
        stderr: output.stderr,
    })
}
