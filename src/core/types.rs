//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`NodeId`] - Changeset identifier (full hex node)
//! - [`BackendKind`] - Identity of a concrete backend
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so a parsed [`NodeId`] always has a short form.
//!
//! # Examples
//!
//! ```
//! use dvcswrap::core::types::{BackendKind, NodeId};
//!
//! let node = NodeId::new("690216eee7b291ac9dca0164d660576bdba51d47").unwrap();
//! assert_eq!(node.short(), "690216eee7b2");
//!
//! assert_eq!(BackendKind::parse("mercurial.hg"), Some(BackendKind::Mercurial));
//! assert!(NodeId::new("not-a-node").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid node id: {0}")]
    InvalidNodeId(String),
}

/// A changeset node identifier.
///
/// Nodes are content-derived hex strings (40 characters for Mercurial and
/// SHA-1 Git, 64 for SHA-256 Git). They are normalized to lowercase.
///
/// # Example
///
/// ```
/// use dvcswrap::core::types::NodeId;
///
/// let node = NodeId::new("BC841AA8BBB1CF6519670192857AEAB484A48B56").unwrap();
/// assert_eq!(node.as_str(), "bc841aa8bbb1cf6519670192857aeab484a48b56");
/// assert_eq!(node.short(), "bc841aa8bbb1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(String);

impl NodeId {
    /// Length of the abbreviated node form.
    pub const SHORT_LEN: usize = 12;

    /// Create a new validated node id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidNodeId` if the string is not hexadecimal
    /// or is shorter than [`NodeId::SHORT_LEN`].
    pub fn new(node: impl Into<String>) -> Result<Self, TypeError> {
        let node = node.into().to_ascii_lowercase();
        Self::validate(&node)?;
        Ok(Self(node))
    }

    fn validate(node: &str) -> Result<(), TypeError> {
        if node.len() < Self::SHORT_LEN {
            return Err(TypeError::InvalidNodeId(format!(
                "expected at least {} hex characters, got {}",
                Self::SHORT_LEN,
                node.len()
            )));
        }
        if !node.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidNodeId(format!(
                "node id must be hexadecimal: {node}"
            )));
        }
        Ok(())
    }

    /// The fixed-length abbreviated form (first 12 characters).
    pub fn short(&self) -> &str {
        &self.0[..Self::SHORT_LEN]
    }

    /// Get the node id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NodeId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<NodeId> for String {
    fn from(node: NodeId) -> Self {
        node.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supported backends.
///
/// This is the closed registry of tool adapters. Resolution from a
/// configuration string always goes through [`BackendKind::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Mercurial (`hg`), the complete backend
    Mercurial,
    /// Git, a partial backend
    Git,
}

impl BackendKind {
    /// Get all available backends.
    pub fn all() -> &'static [BackendKind] {
        &[BackendKind::Mercurial, BackendKind::Git]
    }

    /// Canonical backend name, as used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Mercurial => "hg",
            BackendKind::Git => "git",
        }
    }

    /// Parse a backend identifier.
    ///
    /// Accepts the canonical names plus the historical dotted identifier
    /// `mercurial.hg`. Matching is case-insensitive.
    ///
    /// # Example
    ///
    /// ```
    /// use dvcswrap::core::types::BackendKind;
    ///
    /// assert_eq!(BackendKind::parse("hg"), Some(BackendKind::Mercurial));
    /// assert_eq!(BackendKind::parse("Mercurial"), Some(BackendKind::Mercurial));
    /// assert_eq!(BackendKind::parse("svn"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hg" | "mercurial" | "mercurial.hg" => Some(BackendKind::Mercurial),
            "git" => Some(BackendKind::Git),
            _ => None,
        }
    }

    /// Comma-separated list of canonical names, for error messages.
    pub fn available_names() -> String {
        Self::all()
            .iter()
            .map(|b| b.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
