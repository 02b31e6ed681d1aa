//! core
//!
//! Core domain types, the result model, and configuration.
//!
//! # Modules
//!
//! - [`types`] - Strong types: NodeId, BackendKind
//! - [`model`] - Structured operation results (log entries, branch sets, ...)
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - Results are plain values, derived per call and never cached

pub mod config;
pub mod model;
pub mod types;
