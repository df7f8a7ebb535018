//! # docrag
//!
//! A minimal Retrieval-Augmented Generation (RAG) pipeline: paragraph-aligned
//! chunking, vector embedding, L2 nearest-neighbor retrieval, and grounded
//! prompt generation.
//!
//! ## Overview
//!
//! The crate is a library-level pipeline intended to be wrapped by any
//! transport. Its moving parts are small traits injected at construction
//! time:
//!
//! - [`Chunker`] / [`ParagraphChunker`] — split document text into bounded,
//!   paragraph-aligned chunks
//! - [`Embedder`] — convert text into fixed-dimension vectors
//!   ([`BedrockEmbedder`] in production)
//! - [`VectorStore`] — persist chunks and search by L2 distance
//!   ([`PgVectorStore`] for Postgres/pgvector, [`InMemoryVectorStore`] for
//!   tests and small deployments)
//! - [`Generator`] — prompt-conditioned text generation
//!   ([`BedrockGenerator`] in production)
//! - [`Retriever`] — embed-then-search with source-document resolution
//! - [`RagPipeline`] — the orchestrator: `answer`, `ingest`, `summarize`,
//!   `process_text`
//!
//! Data flow:
//!
//! ```text
//! ingest:  text → Chunker → Embedder → VectorStore
//! answer:  query → Embedder → VectorStore → prompt → Generator → RagResult
//! ```
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docrag::{BedrockEmbedder, BedrockGenerator, InMemoryVectorStore, RagConfig, RagPipeline};
//!
//! let store = Arc::new(InMemoryVectorStore::new(1536));
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .embedder(Arc::new(BedrockEmbedder::from_env()?))
//!     .generator(Arc::new(BedrockGenerator::from_env()?))
//!     .vector_store(store.clone())
//!     .build()?;
//!
//! let doc_id = store.insert_document("report.pdf", "uploads/report.pdf").await;
//! pipeline.ingest(doc_id, &extracted_text).await?;
//! let result = pipeline.answer("What does the report conclude?").await?;
//! println!("{}", result.answer);
//! ```
//!
//! ## Failure policy
//!
//! Retrieval failure degrades gracefully: `answer` proceeds with an empty
//! context list rather than refusing to answer, and the suppressed error is
//! logged. Generation failure has no fallback and always propagates. No
//! operation retries internally; cancellation is by dropping the future.

pub mod bedrock;
pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod inmemory;
pub mod pgvector;
pub mod pipeline;
pub mod prompt;
pub mod retriever;
pub mod storage;
pub mod vectorstore;

pub use bedrock::{BedrockEmbedder, BedrockGenerator};
pub use chunking::{Chunker, ParagraphChunker};
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{Chunk, Document, ProcessedText, RagResult, RetrievedReference};
pub use embedding::Embedder;
pub use error::{RagError, Result};
pub use generation::Generator;
pub use inmemory::InMemoryVectorStore;
pub use pgvector::PgVectorStore;
pub use pipeline::{RagPipeline, RagPipelineBuilder};
pub use retriever::Retriever;
pub use storage::ObjectStore;
pub use vectorstore::{DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT, VectorStore, clamp_limit};
