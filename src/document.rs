//! Data types for documents, chunks, and retrieval results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// A source document registered with the ingestion pipeline.
///
/// Metadata lookups omit `content` for efficiency; it is only populated
/// when the full text has been loaded explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: i64,
    /// Original filename of the uploaded source.
    pub filename: String,
    /// Object storage key where the raw source lives.
    pub source_key: String,
    /// When the document was registered.
    pub created_at: DateTime<Utc>,
    /// Full text content, if loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A bounded, paragraph-aligned segment of a [`Document`].
///
/// Chunks are immutable once written; `similarity` is populated only as a
/// search-result annotation and is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier for the chunk row.
    pub id: i64,
    /// The ID of the parent [`Document`].
    pub document_id: i64,
    /// Zero-based position of this chunk within its document.
    pub chunk_index: i32,
    /// The text content of the chunk.
    pub content: String,
    /// L2 distance from the query vector, set on search results only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

/// A read-only projection of a retrieved chunk used in query results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievedReference {
    /// The chunk text used as grounding context.
    pub content: String,
    /// The owning document's ID, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<i64>,
    /// Source location (object storage key), when the document resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// L2 distance from the query vector (smaller is more similar).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// The result of a question-answering call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagResult {
    /// The original query.
    pub query: String,
    /// The generated answer text.
    pub answer: String,
    /// The grounding context used for the answer, most similar first.
    /// Empty when retrieval failed or found nothing.
    pub references: Vec<RetrievedReference>,
}

/// The result of the document-processing flow: extracted text plus an
/// optional summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessedText {
    /// The document's text content.
    pub text: String,
    /// A generated summary, omitted for short inputs or when summarization
    /// failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// File extensions the ingestion boundary can extract text from.
const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png", "tiff", "txt"];

/// Check a filename against the supported source formats.
///
/// Returns the lowercased extension on success.
///
/// # Errors
///
/// Returns [`RagError::UnsupportedFormat`] when the extension is missing or
/// not text-extractable.
pub fn source_format(filename: &str) -> Result<String> {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .ok_or_else(|| RagError::UnsupportedFormat(filename.to_string()))?;

    if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(RagError::UnsupportedFormat(ext))
    }
}
