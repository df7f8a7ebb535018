//! RAG pipeline orchestrator.
//!
//! The [`RagPipeline`] composes an [`Embedder`], a [`Generator`], a
//! [`VectorStore`], and a [`Chunker`] into the question-answering,
//! ingestion, and summarization operations.
//!
//! # Example
//!
//! ```rust,ignore
//! use docrag::{RagPipeline, RagConfig, InMemoryVectorStore};
//!
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .embedder(Arc::new(embedder))
//!     .generator(Arc::new(generator))
//!     .vector_store(Arc::new(InMemoryVectorStore::new(1536)))
//!     .build()?;
//!
//! pipeline.ingest(doc_id, &text).await?;
//! let result = pipeline.answer("what does the report conclude?").await?;
//! ```

use std::sync::Arc;

use tracing::{info, warn};

use crate::chunking::{Chunker, ParagraphChunker};
use crate::config::RagConfig;
use crate::document::{ProcessedText, RagResult};
use crate::embedding::Embedder;
use crate::error::{RagError, Result};
use crate::generation::Generator;
use crate::prompt;
use crate::retriever::Retriever;
use crate::storage::ObjectStore;
use crate::vectorstore::VectorStore;

/// The RAG pipeline orchestrator.
///
/// A single-pass pipeline: no retries, no background work, no persisted
/// state of its own. Safe for concurrent invocation; the vector store is
/// the only shared mutable resource and each chunk row is independent.
/// Construct one via [`RagPipeline::builder()`].
pub struct RagPipeline {
    config: RagConfig,
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn Generator>,
    store: Arc<dyn VectorStore>,
    chunker: Arc<dyn Chunker>,
    object_store: Option<Arc<dyn ObjectStore>>,
    retriever: Retriever,
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Return a reference to the retriever.
    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    /// Answer a question with retrieval-augmented generation.
    ///
    /// Retrieval failure does not fail the call: answering without
    /// grounding is preferred over refusing to answer, so the prompt falls
    /// back to the bare question and `references` comes back empty. The
    /// suppressed error is logged.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidInput`] for an empty query and
    /// [`RagError::GenerationFailure`] when the generation call fails —
    /// generation is the one step with no fallback.
    pub async fn answer(&self, query: &str) -> Result<RagResult> {
        if query.is_empty() {
            return Err(RagError::InvalidInput("query is empty".into()));
        }

        let references = match self.retriever.retrieve(query, self.config.search_limit).await {
            Ok(references) => references,
            Err(e) => {
                warn!(error = %e, "retrieval failed, answering without grounding context");
                Vec::new()
            }
        };

        let prompt = prompt::rag_prompt(query, &references);
        let answer = self.generator.generate(&prompt).await?;

        info!(reference_count = references.len(), "answered query");
        Ok(RagResult { query: query.to_string(), answer, references })
    }

    /// Ingest a document's text: split → embed → save, chunk by chunk.
    ///
    /// Chunk indices are assigned and persisted in splitter order. Returns
    /// the stored chunk IDs.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::PipelineError`] on the first chunk whose
    /// embedding or save fails, naming the stage and document ID. Chunks
    /// already written for the document are left in place; there is no
    /// compensating rollback.
    pub async fn ingest(&self, document_id: i64, text: &str) -> Result<Vec<i64>> {
        let chunks = self.chunker.split(text);
        let mut chunk_ids = Vec::with_capacity(chunks.len());

        for (index, chunk) in chunks.iter().enumerate() {
            let embedding = self.embedder.embed(chunk).await.map_err(|e| {
                RagError::PipelineError(format!(
                    "embedding failed for document {document_id} chunk {index}: {e}"
                ))
            })?;

            let chunk_id = self
                .store
                .save_chunk(document_id, chunk, index as i32, &embedding)
                .await
                .map_err(|e| {
                    RagError::PipelineError(format!(
                        "save failed for document {document_id} chunk {index}: {e}"
                    ))
                })?;
            chunk_ids.push(chunk_id);
        }

        info!(document.id = document_id, chunk_count = chunk_ids.len(), "ingested document");
        Ok(chunk_ids)
    }

    /// Summarize text with a fixed instructional prompt.
    ///
    /// Input longer than the configured cap (default 10,000 characters) is
    /// truncated, not rejected.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidInput`] for empty text and
    /// [`RagError::GenerationFailure`] when the generation call fails.
    pub async fn summarize(&self, text: &str) -> Result<String> {
        if text.is_empty() {
            return Err(RagError::InvalidInput("text is empty".into()));
        }

        let capped = match text.char_indices().nth(self.config.summary_input_cap) {
            Some((byte_offset, _)) => &text[..byte_offset],
            None => text,
        };

        let prompt = prompt::summary_prompt(capped, self.config.summary_target_chars);
        self.generator.generate(&prompt).await
    }

    /// Summarize the object stored under `key`.
    ///
    /// Downloads the bytes, decodes them as UTF-8, and runs
    /// [`summarize`](Self::summarize).
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] when no object store is
    /// configured, [`RagError::PersistenceFailure`] when the download
    /// fails, and [`RagError::UnsupportedFormat`] when the bytes are not
    /// valid UTF-8 text.
    pub async fn summarize_source(&self, key: &str) -> Result<String> {
        let object_store = self
            .object_store
            .as_ref()
            .ok_or_else(|| RagError::ConfigError("no object store configured".into()))?;

        let bytes = object_store.download(key).await?;
        let text = String::from_utf8(bytes)
            .map_err(|_| RagError::UnsupportedFormat(format!("{key} is not UTF-8 text")))?;

        self.summarize(&text).await
    }

    /// Process extracted document text, attaching a summary when the text
    /// is long enough to warrant one.
    ///
    /// Texts at or below `summary_min_len` characters pass through without
    /// summarization (a cost/latency optimization). A summarization failure
    /// is swallowed: the unsummarized text is still usable, so the error is
    /// only logged.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::InvalidInput`] for empty text.
    pub async fn process_text(&self, text: &str) -> Result<ProcessedText> {
        if text.is_empty() {
            return Err(RagError::InvalidInput("text is empty".into()));
        }

        let mut result = ProcessedText { text: text.to_string(), summary: None };

        if text.chars().count() > self.config.summary_min_len {
            match self.summarize(text).await {
                Ok(summary) if !summary.is_empty() => result.summary = Some(summary),
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "summarization failed, returning unsummarized text");
                }
            }
        }

        Ok(result)
    }
}

/// Builder for constructing a [`RagPipeline`].
///
/// `config`, `embedder`, `generator`, and `vector_store` are required.
/// The chunker defaults to a [`ParagraphChunker`] built from the config;
/// the object store is optional and only needed for
/// [`RagPipeline::summarize_source`].
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<RagConfig>,
    embedder: Option<Arc<dyn Embedder>>,
    generator: Option<Arc<dyn Generator>>,
    vector_store: Option<Arc<dyn VectorStore>>,
    chunker: Option<Arc<dyn Chunker>>,
    object_store: Option<Arc<dyn ObjectStore>>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding gateway.
    pub fn embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the generation gateway.
    pub fn generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Set the vector store backend.
    pub fn vector_store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.vector_store = Some(store);
        self
    }

    /// Override the document chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Set the object store used for summarization-by-reference.
    pub fn object_store(mut self, store: Arc<dyn ObjectStore>) -> Self {
        self.object_store = Some(store);
        self
    }

    /// Build the [`RagPipeline`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if a required field is missing.
    pub fn build(self) -> Result<RagPipeline> {
        let config =
            self.config.ok_or_else(|| RagError::ConfigError("config is required".to_string()))?;
        let embedder = self
            .embedder
            .ok_or_else(|| RagError::ConfigError("embedder is required".to_string()))?;
        let generator = self
            .generator
            .ok_or_else(|| RagError::ConfigError("generator is required".to_string()))?;
        let store = self
            .vector_store
            .ok_or_else(|| RagError::ConfigError("vector_store is required".to_string()))?;
        let chunker = self
            .chunker
            .unwrap_or_else(|| Arc::new(ParagraphChunker::from_config(&config)));

        let retriever = Retriever::new(Arc::clone(&embedder), Arc::clone(&store));

        Ok(RagPipeline {
            config,
            embedder,
            generator,
            store,
            chunker,
            object_store: self.object_store,
            retriever,
        })
    }
}
