//! Error types for tree operations
//!
//! Structural mutation never returns these: misuse is a silent no-op.
//! Errors only come out of arena lookups, JSON import, config loading
//! and the structural self-check.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(u32),

    #[error("Invalid node type: expected {expected}, got {actual}")]
    InvalidNodeType { expected: String, actual: String },

    #[error("Import error: {0}")]
    ImportError(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Broken tree invariant: {0}")]
    BrokenInvariant(String),
}
