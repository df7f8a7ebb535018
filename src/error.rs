//! Error types for the `docrag` crate.

use thiserror::Error;

/// Errors that can occur in RAG operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// The caller supplied unusable input (empty query, empty text).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The embedding model call failed or returned malformed output.
    #[error("embedding failed ({provider}): {message}")]
    EmbeddingFailure {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The text-generation model call failed or returned malformed output.
    #[error("generation failed ({provider}): {message}")]
    GenerationFailure {
        /// The generation provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A vector store or object store operation could not be committed.
    #[error("persistence failed ({backend}): {message}")]
    PersistenceFailure {
        /// The storage backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// No document exists with the given ID.
    #[error("document not found: {0}")]
    NotFound(i64),

    /// The input is not a text-extractable format.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// A configuration validation error.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// An error in pipeline orchestration, wrapping the failing stage.
    #[error("pipeline error: {0}")]
    PipelineError(String),
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
