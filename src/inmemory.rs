//! In-memory vector store using exact L2 distance.
//!
//! This module provides [`InMemoryVectorStore`], a zero-dependency store
//! backed by a `tokio::sync::RwLock`. It is suitable for development,
//! testing, and small-scale use; production deployments use
//! [`PgVectorStore`](crate::pgvector::PgVectorStore).

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::document::{Chunk, Document};
use crate::error::{RagError, Result};
use crate::vectorstore::{VectorStore, clamp_limit};

struct StoredChunk {
    id: i64,
    document_id: i64,
    chunk_index: i32,
    content: String,
    embedding: Vec<f32>,
}

#[derive(Default)]
struct Inner {
    documents: HashMap<i64, Document>,
    chunks: Vec<StoredChunk>,
    next_document_id: i64,
    next_chunk_id: i64,
}

/// A [`VectorStore`] held entirely in memory, searched by exact L2 scan.
///
/// All operations are async-safe via `tokio::sync::RwLock`. The store is
/// created with a fixed embedding dimension; vectors of any other length
/// are rejected.
///
/// # Example
///
/// ```rust,ignore
/// use docrag::{InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new(3);
/// let doc_id = store.insert_document("a.txt", "uploads/a.txt").await;
/// store.save_chunk(doc_id, "hello", 0, &[0.1, 0.2, 0.3]).await?;
/// ```
pub struct InMemoryVectorStore {
    dimensions: usize,
    inner: RwLock<Inner>,
}

impl InMemoryVectorStore {
    /// Create a new empty store accepting vectors of the given dimension.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions, inner: RwLock::new(Inner::default()) }
    }

    /// Register a document and return its assigned ID.
    ///
    /// Chunks reference documents by ID; searches resolve metadata through
    /// [`VectorStore::get_document`].
    pub async fn insert_document(&self, filename: &str, source_key: &str) -> i64 {
        let mut inner = self.inner.write().await;
        inner.next_document_id += 1;
        let id = inner.next_document_id;
        inner.documents.insert(
            id,
            Document {
                id,
                filename: filename.to_string(),
                source_key: source_key.to_string(),
                created_at: Utc::now(),
                content: None,
            },
        );
        id
    }

    fn check_dimensions(&self, embedding: &[f32]) -> Result<()> {
        if embedding.len() != self.dimensions {
            return Err(RagError::PersistenceFailure {
                backend: "in-memory".to_string(),
                message: format!(
                    "vector dimension {} does not match store dimension {}",
                    embedding.len(),
                    self.dimensions
                ),
            });
        }
        Ok(())
    }
}

/// Compute the Euclidean (L2) distance between two vectors of equal length.
fn l2_distance(a: &[f32], b: &[f32]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (f64::from(x - y)).powi(2)).sum::<f64>().sqrt()
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn save_chunk(
        &self,
        document_id: i64,
        content: &str,
        chunk_index: i32,
        embedding: &[f32],
    ) -> Result<i64> {
        self.check_dimensions(embedding)?;

        let mut inner = self.inner.write().await;
        if inner
            .chunks
            .iter()
            .any(|c| c.document_id == document_id && c.chunk_index == chunk_index)
        {
            return Err(RagError::PersistenceFailure {
                backend: "in-memory".to_string(),
                message: format!(
                    "chunk ({document_id}, {chunk_index}) already exists"
                ),
            });
        }

        inner.next_chunk_id += 1;
        let id = inner.next_chunk_id;
        inner.chunks.push(StoredChunk {
            id,
            document_id,
            chunk_index,
            content: content.to_string(),
            embedding: embedding.to_vec(),
        });
        Ok(id)
    }

    async fn find_similar(&self, embedding: &[f32], limit: i64) -> Result<Vec<Chunk>> {
        self.check_dimensions(embedding)?;
        let limit = clamp_limit(limit) as usize;

        let inner = self.inner.read().await;
        let mut scored: Vec<Chunk> = inner
            .chunks
            .iter()
            .map(|stored| Chunk {
                id: stored.id,
                document_id: stored.document_id,
                chunk_index: stored.chunk_index,
                content: stored.content.clone(),
                similarity: Some(l2_distance(&stored.embedding, embedding)),
            })
            .collect();

        scored.sort_by(|a, b| {
            a.similarity
                .partial_cmp(&b.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(limit);
        Ok(scored)
    }

    async fn get_document(&self, document_id: i64) -> Result<Document> {
        let inner = self.inner.read().await;
        inner
            .documents
            .get(&document_id)
            .map(|doc| Document { content: None, ..doc.clone() })
            .ok_or(RagError::NotFound(document_id))
    }
}
