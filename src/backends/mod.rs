//! backends
//!
//! Concrete [`Dvcs`](crate::adapter::Dvcs) implementations.
//!
//! Callers should go through [`open_repository`](crate::adapter::open_repository)
//! rather than constructing these directly.
//!
//! # Modules
//!
//! - [`mercurial`]: complete `hg` backend
//! - [`git`]: partial `git` backend

pub mod git;
pub mod mercurial;

pub use git::Git;
pub use mercurial::Mercurial;
