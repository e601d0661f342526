//! Error types for the sift crate.
//!
//! Evaluation never fails; these errors come from reading query
//! configuration.

use thiserror::Error;

/// Errors that can occur when parsing or loading a query.
#[derive(Debug, Error)]
pub enum SiftError {
    /// Query document could not be read.
    #[error("invalid query: {0}")]
    InvalidQuery(#[from] serde_json::Error),

    /// Unknown search state name.
    #[error("unknown search state '{0}' (expected 'init' or 'search')")]
    UnknownState(String),

    /// Unknown condition group name.
    #[error("unknown condition group '{0}' (expected 'AND' or 'OR')")]
    UnknownGroup(String),

    /// Unknown sort direction name.
    #[error("unknown sort direction '{0}' (expected 'ASC' or 'DESC')")]
    UnknownDirection(String),

    /// Unknown condition type name.
    #[error("unknown condition type '{0}'")]
    UnknownKind(String),
}

/// Result type for sift operations.
pub type Result<T> = std::result::Result<T, SiftError>;
