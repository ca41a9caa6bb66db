//! Error types for the solidgraph accessor.

use thiserror::Error;

/// Exact message a concurrent caller receives when initialization does
/// not complete within the bounded wait.
pub const INIT_FAILURE_MESSAGE: &str = "Failed to initialize Dgraph database.";

/// Exact message for write input containing a non-default-graph quad.
pub const DEFAULT_GRAPH_MESSAGE: &str = "Only triples in the default graph are supported.";

#[derive(Error, Debug)]
pub enum AccessorError {
    #[error("Unsupported media type")]
    UnsupportedMediaType,

    #[error("Resource not found")]
    NotFound,

    #[error("{0}")]
    NotImplemented(String),

    #[error("{0}")]
    Initialization(String),

    #[error("Dgraph transaction aborted: {0}")]
    Conflict(String),

    #[error("Dgraph unavailable: {0}")]
    Unavailable(String),

    #[error("Dgraph error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AccessorError {
    /// Whether the transport may transparently retry the operation.
    /// Covers the optimistic-transaction abort signal and transient
    /// unavailability; everything else propagates immediately.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AccessorError::Conflict(_) | AccessorError::Unavailable(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AccessorError>;
