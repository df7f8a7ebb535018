//! Embedding gateway trait for converting text into vectors.

use async_trait::async_trait;

use crate::error::Result;

/// A gateway that converts text into fixed-dimension embedding vectors.
///
/// Implementations wrap a specific embedding backend behind a unified async
/// interface. A failed model call must always surface as
/// [`RagError::EmbeddingFailure`](crate::RagError::EmbeddingFailure), never
/// as an empty vector. No retry logic lives here; retries, if any, are the
/// caller's concern.
///
/// # Example
///
/// ```rust,ignore
/// use docrag::Embedder;
///
/// let vector = embedder.embed("hello world").await?;
/// assert_eq!(vector.len(), embedder.dimensions());
/// ```
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Return the dimensionality of vectors produced by this gateway.
    ///
    /// All stored vectors and query vectors must share this dimension.
    fn dimensions(&self) -> usize;
}
