//! cli
//!
//! Command-line interface layer for dvcs.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Resolve configuration and open the repository adapter
//! - Delegate to command handlers and render their results
//!
//! # Architecture
//!
//! The CLI layer is thin. Every handler calls exactly one
//! [`Dvcs`](crate::adapter::Dvcs) operation; all tool knowledge lives
//! below this layer.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::Result;

use crate::ui::output::Verbosity;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    let ctx = commands::Context {
        repo: cli.repo.clone(),
        backend: cli.backend.clone(),
        config: cli.config.clone(),
        log_format: cli.log_format,
        json: cli.json,
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
    };

    commands::dispatch(cli.command, &ctx)
}
