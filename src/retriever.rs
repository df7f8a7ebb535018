//! Query-time retrieval: embed, search, resolve source documents.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::document::{Document, RetrievedReference};
use crate::embedding::Embedder;
use crate::error::Result;
use crate::vectorstore::VectorStore;

/// Orchestrates embedding-then-search to produce ranked grounding context
/// for a query.
///
/// Results keep the vector store's ascending-distance order. The owning
/// document of each result is resolved once per distinct document ID to
/// fill in the source location; a failed lookup is non-fatal and only
/// leaves that reference's location empty.
pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
}

impl Retriever {
    /// Create a new retriever over the given gateway and store.
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Retrieve the chunks most similar to `query`, most similar first.
    ///
    /// `limit` is clamped by the store
    /// (see [`clamp_limit`](crate::vectorstore::clamp_limit)).
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmbeddingFailure`](crate::RagError::EmbeddingFailure)
    /// if the query cannot be embedded and
    /// [`RagError::PersistenceFailure`](crate::RagError::PersistenceFailure)
    /// if the search fails. Document-metadata lookups never fail the call.
    pub async fn retrieve(&self, query: &str, limit: i64) -> Result<Vec<RetrievedReference>> {
        let query_embedding = self.embedder.embed(query).await?;
        let chunks = self.store.find_similar(&query_embedding, limit).await?;

        // Resolve each distinct document once.
        let mut documents: HashMap<i64, Document> = HashMap::new();
        for chunk in &chunks {
            if documents.contains_key(&chunk.document_id) {
                continue;
            }
            match self.store.get_document(chunk.document_id).await {
                Ok(doc) => {
                    documents.insert(chunk.document_id, doc);
                }
                Err(e) => {
                    warn!(document.id = chunk.document_id, error = %e, "document lookup failed");
                }
            }
        }

        let references = chunks
            .into_iter()
            .map(|chunk| {
                let location =
                    documents.get(&chunk.document_id).map(|doc| doc.source_key.clone());
                RetrievedReference {
                    content: chunk.content,
                    document_id: Some(chunk.document_id),
                    location,
                    score: chunk.similarity,
                }
            })
            .collect::<Vec<_>>();

        debug!(result_count = references.len(), "retrieval completed");
        Ok(references)
    }
}
