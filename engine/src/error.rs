//! Error types for corpus construction and queries.

use thiserror::Error;

/// Errors produced by the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The corpus cannot be built (empty, duplicate titles). Nothing is published.
    #[error("invalid corpus: {0}")]
    InvalidCorpus(String),

    /// The query title does not match any document.
    #[error("title not found: {0}")]
    NotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A catalog file could not be read or decoded.
    #[error("catalog error: {0}")]
    Catalog(String),
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, EngineError>;
