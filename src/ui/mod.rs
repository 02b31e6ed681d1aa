//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All CLI output goes through this module to ensure consistent
//! formatting and proper handling of `--quiet` and `--json`.

pub mod output;
