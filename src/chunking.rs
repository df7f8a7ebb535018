//! Paragraph-aligned document chunking.
//!
//! This module provides the [`Chunker`] trait and its default
//! implementation, [`ParagraphChunker`], which accumulates blank-line
//! separated paragraphs into bounded chunks.

use crate::config::RagConfig;

/// A strategy for splitting document text into chunk strings.
///
/// Implementations are pure functions of their input: no I/O, no state.
/// Chunk order in the returned `Vec` defines chunk order in the document.
pub trait Chunker: Send + Sync {
    /// Split text into an ordered sequence of chunk strings.
    ///
    /// Returns an empty `Vec` for empty or whitespace-only input.
    fn split(&self, text: &str) -> Vec<String>;
}

/// Splits text on paragraph boundaries and accumulates paragraphs into
/// size-bounded chunks.
///
/// Paragraphs (blank-line separated blocks) are trimmed, empty ones are
/// dropped, and the rest are packed into a running buffer. When adding the
/// next paragraph would push the buffer past `max_chunk_size`, the buffer is
/// flushed as a completed chunk and a new buffer starts with that paragraph.
/// Paragraphs are never divided: a single paragraph longer than
/// `max_chunk_size` is still emitted intact, the limit only controls when a
/// new chunk starts.
///
/// At most `max_chunks` chunks are produced per document; once the limit is
/// reached splitting stops and the remaining input is discarded, so very
/// large documents are only partially embedded.
///
/// # Example
///
/// ```rust
/// use docrag::{Chunker, ParagraphChunker};
///
/// let chunker = ParagraphChunker::new(1000, 20);
/// let chunks = chunker.split("First paragraph.\n\nSecond paragraph.");
/// assert_eq!(chunks.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ParagraphChunker {
    max_chunk_size: usize,
    max_chunks: usize,
}

impl ParagraphChunker {
    /// Create a new `ParagraphChunker`.
    ///
    /// # Arguments
    ///
    /// * `max_chunk_size` — flush threshold per chunk, in bytes of text
    /// * `max_chunks` — maximum number of chunks per document
    pub fn new(max_chunk_size: usize, max_chunks: usize) -> Self {
        Self { max_chunk_size, max_chunks }
    }

    /// Create a `ParagraphChunker` from pipeline configuration.
    pub fn from_config(config: &RagConfig) -> Self {
        Self::new(config.max_chunk_size, config.max_chunks)
    }
}

impl Default for ParagraphChunker {
    fn default() -> Self {
        let config = RagConfig::default();
        Self::from_config(&config)
    }
}

impl Chunker for ParagraphChunker {
    fn split(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for paragraph in text.split("\n\n") {
            let paragraph = paragraph.trim();
            if paragraph.is_empty() {
                continue;
            }

            if !current.is_empty() && current.len() + paragraph.len() > self.max_chunk_size {
                chunks.push(std::mem::take(&mut current));
                if chunks.len() >= self.max_chunks {
                    // Limit reached: remaining input is discarded.
                    return chunks;
                }
            }

            if !current.is_empty() {
                current.push_str("\n\n");
            }
            current.push_str(paragraph);
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }
}
