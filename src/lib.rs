//! dvcswrap - one API over distributed version-control command-line tools
//!
//! The tool (Mercurial first, Git partially) is driven as an external
//! process. Its textual and XML output is parsed back into structured
//! values, and its exit codes are classified into success, benign empty
//! results, and failures.
//!
//! # Architecture
//!
//! The codebase is layered, leaf first:
//!
//! - [`process`] - Runs one shell command and captures its output
//! - [`parse`] - Pure parsers for log, branches, status and push/pull output
//! - [`adapter`] - The [`Dvcs`](adapter::Dvcs) trait, command construction,
//!   exit-code classification and backend resolution
//! - [`backends`] - Mercurial and Git implementations
//! - [`core`] - Domain types, result model and configuration files
//! - [`tools`] - Logic behind the bundled merge and diff tools
//! - [`cli`] / [`ui`] - The `dvcs` command line
//!
//! # Example
//!
//! ```no_run
//! use dvcswrap::adapter::{open_repository, AdapterConfig, PullOptions};
//!
//! # fn main() -> Result<(), dvcswrap::DvcsError> {
//! let repo = open_repository("/srv/project", "hg", AdapterConfig::default())?;
//! let summary = repo.pull(&PullOptions::default())?;
//! println!("pulled {summary}");
//! println!("branches: {:?}", repo.branches()?.active);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod backends;
pub mod cli;
pub mod core;
pub mod error;
pub mod parse;
pub mod process;
pub mod tools;
pub mod ui;

pub use error::DvcsError;
