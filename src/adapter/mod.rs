//! adapter
//!
//! The uniform repository interface and the machinery backends share.
//!
//! # Architecture
//!
//! A call flows through four stages:
//!
//! 1. the backend builds an [`Invocation`] with its [`CommandBuilder`]
//! 2. a [`CommandRunner`](crate::process::CommandRunner) executes the
//!    rendered string
//! 3. [`classify`] decides between success, a benign empty result, and
//!    failure according to the operation's [`ExitPolicy`]
//! 4. a [`parse`](crate::parse) function turns the text into a model value
//!
//! # Modules
//!
//! - `traits`: the [`Dvcs`] trait, [`RepoHandle`] and operation options
//! - `command`: command-string construction
//! - `classify`: exit-code interpretation
//! - `settings`: [`AdapterConfig`]
//! - `factory`: backend resolution ([`open_repository`])

mod classify;
mod command;
mod factory;
mod settings;
mod traits;

pub use classify::{classify, ExitPolicy, Outcome, NO_CHANGES_FOUND};
pub use command::{quote, CommandBuilder, Dialect, Invocation};
pub use factory::{open_repository, open_repository_with, resolve_backend};
pub use settings::{AdapterConfig, LogFormat, DIFF_TOOL_NAME, MERGE_TOOL_NAME};
pub use traits::*;
