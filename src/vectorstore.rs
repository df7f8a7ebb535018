//! Vector store trait for persisting and similarity-searching chunks.

use async_trait::async_trait;

use crate::document::{Chunk, Document};
use crate::error::Result;

/// Default number of results when the caller's limit is non-positive.
pub const DEFAULT_SEARCH_LIMIT: i64 = 5;

/// Hard ceiling on the number of results per search.
pub const MAX_SEARCH_LIMIT: i64 = 20;

/// Clamp a caller-supplied search limit into the supported range.
///
/// Non-positive limits fall back to [`DEFAULT_SEARCH_LIMIT`]; limits above
/// [`MAX_SEARCH_LIMIT`] are capped. Every [`VectorStore`] implementation
/// applies this before querying.
pub fn clamp_limit(limit: i64) -> i64 {
    if limit <= 0 {
        DEFAULT_SEARCH_LIMIT
    } else {
        limit.min(MAX_SEARCH_LIMIT)
    }
}

/// A storage backend for chunk text and embeddings with nearest-neighbor
/// search.
///
/// The distance metric is Euclidean (L2) and must be identical between
/// indexing and querying. All vectors in a store share one fixed dimension;
/// a mismatched vector is rejected with
/// [`RagError::PersistenceFailure`](crate::RagError::PersistenceFailure)
/// rather than truncated or padded.
///
/// Chunk rows are independent: concurrent writers may interleave safely and
/// no operation takes exclusive locks.
///
/// # Example
///
/// ```rust,ignore
/// use docrag::{InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new(1536);
/// let chunk_id = store.save_chunk(doc_id, "chunk text", 0, &embedding).await?;
/// let similar = store.find_similar(&query_embedding, 5).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Persist one chunk with its embedding, returning the new chunk ID.
    ///
    /// Safe to call repeatedly for the same document with increasing
    /// `chunk_index` values; `(document_id, chunk_index)` pairs must be
    /// distinct.
    async fn save_chunk(
        &self,
        document_id: i64,
        content: &str,
        chunk_index: i32,
        embedding: &[f32],
    ) -> Result<i64>;

    /// Find the chunks nearest to `embedding`, ordered by ascending L2
    /// distance (most similar first).
    ///
    /// The limit is clamped via [`clamp_limit`]. An empty store returns an
    /// empty list, not an error. Each returned chunk carries its distance in
    /// [`Chunk::similarity`].
    async fn find_similar(&self, embedding: &[f32], limit: i64) -> Result<Vec<Chunk>>;

    /// Fetch document metadata by ID, excluding the full content.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::NotFound`](crate::RagError::NotFound) when no
    /// document has the given ID.
    async fn get_document(&self, document_id: i64) -> Result<Document>;
}
