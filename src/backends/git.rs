//! backends::git
//!
//! Partial backend driving the `git` executable.
//!
//! Only the operations whose output needs no parsing are wired up:
//! `clone`, `init_repo`, `add`, `branch`, `commit` and `diff_unified`.
//! Everything else keeps the trait default and reports
//! [`DvcsError::NotImplemented`].

use std::path::Path;
use std::sync::Arc;

use crate::adapter::{
    classify, AdapterConfig, CommandBuilder, CommitOptions, Dialect, Dvcs, ExitPolicy,
    Invocation, Outcome, RepoHandle,
};
use crate::core::types::BackendKind;
use crate::error::DvcsError;
use crate::process::CommandRunner;

/// Default executable.
pub const GIT: &str = "git";

/// Git adapter.
pub struct Git {
    handle: RepoHandle,
    commands: CommandBuilder,
    runner: Arc<dyn CommandRunner>,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

impl Git {
    pub fn new(
        path: impl AsRef<Path>,
        config: &AdapterConfig,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        let path = path.as_ref();
        Self {
            handle: RepoHandle::new(path, BackendKind::Git),
            commands: CommandBuilder::new(Dialect::GIT, GIT, path, config),
            runner,
        }
    }

    fn exec_text(&self, invocation: Invocation) -> Result<String, DvcsError> {
        let _span = tracing::debug_span!("git", operation = invocation.operation()).entered();
        let command = invocation.render();
        let output = self.runner.run(&command)?;
        classify(&command, output, ExitPolicy::Strict).map(Outcome::into_text)
    }
}

impl Dvcs for Git {
    fn handle(&self) -> &RepoHandle {
        &self.handle
    }

    fn clone_repo(&self, remote: &str) -> Result<String, DvcsError> {
        self.exec_text(
            self.commands
                .command("clone")
                .unscoped()
                .value(remote)
                .path(self.handle.path()),
        )
    }

    fn init_repo(&self) -> Result<String, DvcsError> {
        self.exec_text(
            self.commands
                .command("init")
                .unscoped()
                .path(self.handle.path()),
        )
    }

    fn add(&self, paths: &[String]) -> Result<String, DvcsError> {
        let invocation = self.commands.command("add");
        let invocation = if paths.is_empty() {
            invocation.arg("--all")
        } else {
            invocation.arg("--").values(paths)
        };
        self.exec_text(invocation)
    }

    fn branch(&self, name: &str) -> Result<String, DvcsError> {
        let invocation = if name.is_empty() {
            self.commands.command("branch").arg("--show-current")
        } else {
            self.commands.command("checkout").arg("-b").value(name)
        };
        Ok(self.exec_text(invocation)?.trim().to_string())
    }

    fn commit(&self, options: &CommitOptions) -> Result<String, DvcsError> {
        let mut invocation = self
            .commands
            .command("commit")
            .arg("-m")
            .value(&options.message)
            .opt_value("--author", options.user.as_deref());
        if !options.files.is_empty() {
            invocation = invocation.arg("--").values(&options.files);
        }
        // Git has no addremove; stage everything first in the same shell.
        if options.addremove {
            let stage = self.commands.command("add").arg("--all").render();
            invocation = invocation.prepend(format!("{stage} &&"));
        }
        self.exec_text(invocation)
    }

    fn diff_unified(&self, path: &str, identifier: Option<&str>) -> Result<String, DvcsError> {
        self.exec_text(
            self.commands
                .command("diff")
                .opt_arg(identifier)
                .arg("--")
                .value(path),
        )
    }
}
