//! process::runner
//!
//! Shell-backed command execution.

use std::path::PathBuf;
use std::process::Command;

use crate::error::DvcsError;

/// Captured result of one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    /// Decoded stdout (invalid UTF-8 replaced, never an error)
    pub stdout: String,
    /// Decoded stderr
    pub stderr: String,
    /// Exit code; -1 when the process was terminated by a signal
    pub code: i32,
}

impl RunOutput {
    /// A successful run with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            code: 0,
        }
    }

    /// A run that exited with `code`.
    pub fn exit(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            code,
        }
    }

    /// Whether the exit code is zero.
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Executes shell command strings.
///
/// Implementations must be `Send + Sync`; an adapter may be shared across
/// threads, though the layer above performs no locking of its own.
pub trait CommandRunner: Send + Sync {
    /// Run `command` through the shell and capture its output.
    ///
    /// # Errors
    ///
    /// Only [`DvcsError::Spawn`] when the shell cannot be started. A
    /// non-zero exit is reported through [`RunOutput::code`].
    fn run(&self, command: &str) -> Result<RunOutput, DvcsError>;
}

/// Production runner that delegates to `sh -c`.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
    cwd: Option<PathBuf>,
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self {
            shell: "sh".to_string(),
            cwd: None,
        }
    }
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run commands from `cwd` instead of the current directory.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Use a different POSIX shell (e.g. `bash`).
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<RunOutput, DvcsError> {
        tracing::debug!(%command, "executing shell command");

        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c").arg(command);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }

        let output = cmd.output().map_err(|source| DvcsError::Spawn {
            command: command.to_string(),
            source,
        })?;

        let code = output.status.code().unwrap_or(-1);
        tracing::debug!(%command, code, "command finished");

        Ok(RunOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code,
        })
    }
}
