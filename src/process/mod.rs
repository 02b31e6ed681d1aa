//! process
//!
//! The command runner: the only place that spawns child processes.
//!
//! # Design
//!
//! A runner executes one shell command string and hands back stdout,
//! stderr and the exit code. It never inspects domain semantics; deciding
//! whether a non-zero exit is a failure belongs to the adapter's
//! classifier.
//!
//! # Modules
//!
//! - `runner`: [`CommandRunner`] trait, [`RunOutput`], and [`ShellRunner`]
//! - [`mock`]: [`mock::MockRunner`] for deterministic tests
//!
//! # Example
//!
//! ```no_run
//! use dvcswrap::process::{CommandRunner, ShellRunner};
//!
//! let runner = ShellRunner::new();
//! let out = runner.run("hg --version").unwrap();
//! assert!(out.success());
//! ```

pub mod mock;
mod runner;

pub use runner::{CommandRunner, RunOutput, ShellRunner};
