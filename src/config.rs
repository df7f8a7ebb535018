//! Configuration for the RAG pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// Configuration parameters for the RAG pipeline.
///
/// Constructed directly, via [`Default`], or through the validating
/// [`RagConfig::builder()`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Maximum chunk size in characters. A chunk is flushed when adding the
    /// next paragraph would exceed this.
    pub max_chunk_size: usize,
    /// Maximum number of chunks produced per document; input beyond this is
    /// discarded.
    pub max_chunks: usize,
    /// Number of similar chunks retrieved per query.
    pub search_limit: i64,
    /// Maximum input length for summarization, in characters. Longer input
    /// is truncated, not rejected.
    pub summary_input_cap: usize,
    /// Texts at or below this length (in characters) skip summarization in
    /// the document-processing flow.
    pub summary_min_len: usize,
    /// Approximate summary length requested from the generation model.
    pub summary_target_chars: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: 1000,
            max_chunks: 20,
            search_limit: 5,
            summary_input_cap: 10_000,
            summary_min_len: 200,
            summary_target_chars: 200,
        }
    }
}

impl RagConfig {
    /// Create a new builder for constructing a [`RagConfig`].
    pub fn builder() -> RagConfigBuilder {
        RagConfigBuilder::default()
    }
}

/// Builder for constructing a validated [`RagConfig`].
#[derive(Debug, Clone, Default)]
pub struct RagConfigBuilder {
    config: RagConfig,
}

impl RagConfigBuilder {
    /// Set the maximum chunk size in characters.
    pub fn max_chunk_size(mut self, size: usize) -> Self {
        self.config.max_chunk_size = size;
        self
    }

    /// Set the maximum number of chunks per document.
    pub fn max_chunks(mut self, count: usize) -> Self {
        self.config.max_chunks = count;
        self
    }

    /// Set the number of similar chunks retrieved per query.
    pub fn search_limit(mut self, limit: i64) -> Self {
        self.config.search_limit = limit;
        self
    }

    /// Set the maximum summarization input length in characters.
    pub fn summary_input_cap(mut self, cap: usize) -> Self {
        self.config.summary_input_cap = cap;
        self
    }

    /// Set the length below which the processing flow skips summarization.
    pub fn summary_min_len(mut self, len: usize) -> Self {
        self.config.summary_min_len = len;
        self
    }

    /// Set the approximate summary length requested from the model.
    pub fn summary_target_chars(mut self, chars: usize) -> Self {
        self.config.summary_target_chars = chars;
        self
    }

    /// Build the [`RagConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if:
    /// - `max_chunk_size == 0` or `max_chunks == 0`
    /// - `summary_target_chars == 0`
    /// - `summary_input_cap <= summary_min_len`
    pub fn build(self) -> Result<RagConfig> {
        if self.config.max_chunk_size == 0 {
            return Err(RagError::ConfigError("max_chunk_size must be greater than zero".into()));
        }
        if self.config.max_chunks == 0 {
            return Err(RagError::ConfigError("max_chunks must be greater than zero".into()));
        }
        if self.config.summary_target_chars == 0 {
            return Err(RagError::ConfigError(
                "summary_target_chars must be greater than zero".into(),
            ));
        }
        if self.config.summary_input_cap <= self.config.summary_min_len {
            return Err(RagError::ConfigError(format!(
                "summary_input_cap ({}) must be greater than summary_min_len ({})",
                self.config.summary_input_cap, self.config.summary_min_len
            )));
        }
        Ok(self.config)
    }
}
