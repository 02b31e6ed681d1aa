//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens the adapter for the working copy via [`Context::open`]
//! 2. Calls one adapter operation
//! 3. Formats and displays the result (`--json` or human-readable)
//!
//! Handlers never build tool command lines themselves.

mod completion;
mod config_cmd;
mod diff;
mod exchange;
mod history;
mod working;

pub use completion::completion;

use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use serde::Serialize;

use crate::adapter::{open_repository, AdapterConfig, Dvcs, LogFormat};
use crate::cli::args::{Command, ConfigAction};
use crate::core::config::Config;
use crate::ui::output::{self, Verbosity};

/// Request to end the process with a specific status and no message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exit(pub u8);

impl std::fmt::Display for Exit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "exit status {}", self.0)
    }
}

impl std::error::Error for Exit {}

/// Settings shared by every handler, taken from the global flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working copy (`None` = current directory)
    pub repo: Option<PathBuf>,
    /// Backend override
    pub backend: Option<String>,
    /// Extra `key=value` tool overrides
    pub config: Vec<String>,
    /// Log rendering override
    pub log_format: Option<LogFormat>,
    /// Print JSON instead of text
    pub json: bool,
    pub verbosity: Verbosity,
}

impl Context {
    /// The working-copy path.
    pub fn repo_path(&self) -> Result<PathBuf> {
        match &self.repo {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir().context("Failed to determine current directory"),
        }
    }

    /// Load configuration for the working copy.
    pub fn load_config(&self) -> Result<Config> {
        let repo = self.repo_path()?;
        let result = Config::load(Some(&repo)).context("Failed to load config")?;
        for warning in &result.warnings {
            output::warn(
                format!("{} ({})", warning.message, warning.path.display()),
                self.verbosity,
            );
        }
        Ok(result.config)
    }

    /// Open the adapter selected by flags and configuration.
    pub fn open(&self) -> Result<Box<dyn Dvcs>> {
        let repo = self.repo_path()?;
        let config = self.load_config()?;

        let adapter = self.adapter_config(&config)?;
        let backend = self.backend.as_deref().unwrap_or(config.backend());
        open_repository(repo, backend, adapter).context("Failed to open repository")
    }

    /// Resolve the adapter configuration, applying command-line overrides
    /// on top of the loaded files.
    pub fn adapter_config(&self, config: &Config) -> Result<AdapterConfig> {
        let mut adapter = config.adapter_config();
        for pair in &self.config {
            if !pair.contains('=') {
                bail!("--config expects KEY=VALUE, got '{pair}'");
            }
            adapter.global_config.push(pair.clone());
        }
        if let Some(format) = self.log_format {
            adapter.log_format = format;
        }
        Ok(adapter)
    }

    /// Print a structured result.
    pub fn show<T: Serialize + ?Sized>(&self, value: &T, human: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            output::json(value)?;
        } else {
            let text = human();
            if !text.is_empty() {
                println!("{text}");
            }
        }
        Ok(())
    }

    /// Print raw tool output; suppressed by `--quiet`.
    pub fn show_output(&self, text: &str) -> Result<()> {
        if self.json {
            output::json(&serde_json::json!({ "output": text }))?;
        } else {
            let text = text.trim_end();
            if !text.is_empty() {
                output::print(text, self.verbosity);
            }
        }
        Ok(())
    }
}

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        // Working copy
        Command::Clone { remote } => working::clone(ctx, &remote),
        Command::Init => working::init(ctx),
        Command::Branch { name } => working::branch(ctx, name.as_deref()),
        Command::Add { paths } => working::add(ctx, &paths),
        Command::Commit {
            message,
            user,
            no_addremove,
            files,
        } => working::commit(ctx, message, user, !no_addremove, files),
        Command::Update {
            branch,
            rev,
            no_clean,
        } => working::update(ctx, branch, rev, !no_clean),
        Command::Status => working::status(ctx),
        Command::Changed { start, end } => working::changed(ctx, &start, &end),

        // Exchange
        Command::Merge {
            branch,
            rev,
            preview,
            conflicts,
        } => exchange::merge(ctx, branch, rev, preview, conflicts),
        Command::Push {
            destination,
            new_branch,
        } => exchange::push(ctx, destination, new_branch),
        Command::Pull { source, branch } => exchange::pull(ctx, source, branch),
        Command::Incoming { branch, check } => exchange::incoming(ctx, branch.as_deref(), check),

        // History
        Command::Log { branch } => history::log(ctx, branch.as_deref()),
        Command::UserCommits { user, limit } => history::user_commits(ctx, &user, limit),
        Command::Branches => history::branches(ctx),
        Command::BranchRevisions { branch } => history::branch_revisions(ctx, &branch),
        Command::Head { branch } => history::head(ctx, branch.as_deref()),
        Command::ChangedFiles { end, start } => {
            history::changed_files(ctx, start.as_deref(), &end)
        }

        // Diffs
        Command::Diff { path, rev } => diff::unified(ctx, &path, rev.as_deref()),
        Command::DiffHtml { path, rev } => diff::html(ctx, &path, rev.as_deref()),

        // Setup
        Command::Config { action } => match action {
            ConfigAction::Show => config_cmd::show(ctx),
        },
        Command::Completion { shell } => completion(shell, &mut std::io::stdout()),
    }
}
