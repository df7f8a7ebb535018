//! Integration tests for the RAG pipeline against mock gateways.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use docrag::{
    Embedder, Generator, InMemoryVectorStore, ObjectStore, RagConfig, RagError, RagPipeline,
    Result, VectorStore,
};

/// An embedder that returns a fixed vector, or fails on demand.
struct MockEmbedder {
    response: Vec<f32>,
    fail: bool,
}

impl MockEmbedder {
    fn returning(response: Vec<f32>) -> Self {
        Self { response, fail: false }
    }

    fn failing(dimensions: usize) -> Self {
        Self { response: vec![0.0; dimensions], fail: true }
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        if self.fail {
            return Err(RagError::EmbeddingFailure {
                provider: "mock".into(),
                message: "embedding backend down".into(),
            });
        }
        Ok(self.response.clone())
    }

    fn dimensions(&self) -> usize {
        self.response.len()
    }
}

/// A generator that records every prompt it receives.
struct MockGenerator {
    prompts: Mutex<Vec<String>>,
    response: String,
    fail: bool,
}

impl MockGenerator {
    fn answering(response: &str) -> Self {
        Self { prompts: Mutex::new(Vec::new()), response: response.to_string(), fail: false }
    }

    fn failing() -> Self {
        Self { prompts: Mutex::new(Vec::new()), response: String::new(), fail: true }
    }

    fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            return Err(RagError::GenerationFailure {
                provider: "mock".into(),
                message: "generation backend down".into(),
            });
        }
        Ok(self.response.clone())
    }
}

/// An object store over a single key.
struct MockObjectStore {
    key: String,
    bytes: Vec<u8>,
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn download(&self, key: &str) -> Result<Vec<u8>> {
        if key == self.key {
            Ok(self.bytes.clone())
        } else {
            Err(RagError::PersistenceFailure {
                backend: "mock".into(),
                message: format!("no object under {key}"),
            })
        }
    }

    async fn upload(&self, _bytes: &[u8], key: &str) -> Result<String> {
        Ok(key.to_string())
    }
}

fn pipeline_with(
    embedder: Arc<MockEmbedder>,
    generator: Arc<MockGenerator>,
    store: Arc<InMemoryVectorStore>,
) -> RagPipeline {
    RagPipeline::builder()
        .config(RagConfig::default())
        .embedder(embedder)
        .generator(generator)
        .vector_store(store)
        .build()
        .unwrap()
}

#[tokio::test]
async fn empty_query_is_invalid_input() {
    let pipeline = pipeline_with(
        Arc::new(MockEmbedder::returning(vec![0.0; 3])),
        Arc::new(MockGenerator::answering("unused")),
        Arc::new(InMemoryVectorStore::new(3)),
    );

    let err = pipeline.answer("").await.unwrap_err();
    assert!(matches!(err, RagError::InvalidInput(_)));
}

#[tokio::test]
async fn answer_grounds_on_retrieved_chunks_in_distance_order() {
    let store = Arc::new(InMemoryVectorStore::new(3));
    let doc_id = store.insert_document("a.txt", "uploads/a.txt").await;
    // Distances from the query [0.1, 0.2, 0.3]: 0.5 and 0.2.
    store.save_chunk(doc_id, "far chunk", 0, &[0.6, 0.2, 0.3]).await.unwrap();
    store.save_chunk(doc_id, "near chunk", 1, &[0.1, 0.2, 0.5]).await.unwrap();

    let generator = Arc::new(MockGenerator::answering("grounded answer"));
    let pipeline = pipeline_with(
        Arc::new(MockEmbedder::returning(vec![0.1, 0.2, 0.3])),
        Arc::clone(&generator),
        store,
    );

    let result = pipeline.answer("what is near?").await.unwrap();
    assert_eq!(result.answer, "grounded answer");
    assert_eq!(result.query, "what is near?");
    assert_eq!(result.references.len(), 2);
    assert_eq!(result.references[0].content, "near chunk");
    assert_eq!(result.references[1].content, "far chunk");
    assert!(result.references[0].score.unwrap() <= result.references[1].score.unwrap());
    assert_eq!(result.references[0].location.as_deref(), Some("uploads/a.txt"));

    let prompts = generator.recorded_prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Document [1]:\nnear chunk"));
    assert!(prompts[0].contains("Document [2]:\nfar chunk"));
    assert!(prompts[0].contains("Question: what is near?"));
}

#[tokio::test]
async fn retrieval_failure_degrades_to_ungrounded_answer() {
    let generator = Arc::new(MockGenerator::answering("best effort"));
    let pipeline = pipeline_with(
        Arc::new(MockEmbedder::failing(3)),
        Arc::clone(&generator),
        Arc::new(InMemoryVectorStore::new(3)),
    );

    let result = pipeline.answer("anything?").await.unwrap();
    assert_eq!(result.answer, "best effort");
    assert!(result.references.is_empty());

    // The prompt fell back to the bare question, no context blocks.
    let prompts = generator.recorded_prompts();
    assert_eq!(prompts[0], "<human>Question: anything?</human>\n\n<assistant>");
}

#[tokio::test]
async fn generation_failure_fails_the_answer() {
    let pipeline = pipeline_with(
        Arc::new(MockEmbedder::returning(vec![0.0; 3])),
        Arc::new(MockGenerator::failing()),
        Arc::new(InMemoryVectorStore::new(3)),
    );

    let err = pipeline.answer("doomed").await.unwrap_err();
    assert!(matches!(err, RagError::GenerationFailure { .. }));
}

#[tokio::test]
async fn ingest_persists_chunks_in_splitter_order() {
    let store = Arc::new(InMemoryVectorStore::new(3));
    let doc_id = store.insert_document("b.txt", "uploads/b.txt").await;
    let pipeline = pipeline_with(
        Arc::new(MockEmbedder::returning(vec![0.5, 0.5, 0.5])),
        Arc::new(MockGenerator::answering("unused")),
        Arc::clone(&store),
    );

    let chunk_ids = pipeline
        .ingest(doc_id, &format!("{}\n\n{}", "a".repeat(900), "b".repeat(900)))
        .await
        .unwrap();
    assert_eq!(chunk_ids.len(), 2);

    let stored = store.find_similar(&[0.5, 0.5, 0.5], 5).await.unwrap();
    assert_eq!(stored.len(), 2);
    let mut indices: Vec<i32> = stored.iter().map(|c| c.chunk_index).collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1]);
}

#[tokio::test]
async fn ingest_aborts_on_first_failure_leaving_written_chunks() {
    // Same (document_id, chunk_index) already present, so the first save
    // fails while the embedding step succeeds.
    let store = Arc::new(InMemoryVectorStore::new(3));
    let doc_id = store.insert_document("c.txt", "uploads/c.txt").await;
    store.save_chunk(doc_id, "pre-existing", 0, &[0.0, 0.0, 0.0]).await.unwrap();

    let pipeline = pipeline_with(
        Arc::new(MockEmbedder::returning(vec![0.5, 0.5, 0.5])),
        Arc::new(MockGenerator::answering("unused")),
        Arc::clone(&store),
    );

    let err = pipeline.ingest(doc_id, "new text").await.unwrap_err();
    assert!(matches!(err, RagError::PipelineError(_)));
    assert!(err.to_string().contains(&doc_id.to_string()));

    // The previously committed chunk is untouched.
    let stored = store.find_similar(&[0.0, 0.0, 0.0], 5).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].content, "pre-existing");
}

#[tokio::test]
async fn summarize_truncates_input_to_the_cap() {
    let generator = Arc::new(MockGenerator::answering("a summary"));
    let pipeline = pipeline_with(
        Arc::new(MockEmbedder::returning(vec![0.0; 3])),
        Arc::clone(&generator),
        Arc::new(InMemoryVectorStore::new(3)),
    );

    let text = "x".repeat(10_001);
    let summary = pipeline.summarize(&text).await.unwrap();
    assert_eq!(summary, "a summary");

    let prompts = generator.recorded_prompts();
    assert!(prompts[0].contains(&"x".repeat(10_000)));
    assert!(!prompts[0].contains(&"x".repeat(10_001)));
}

#[tokio::test]
async fn summarize_rejects_empty_text() {
    let pipeline = pipeline_with(
        Arc::new(MockEmbedder::returning(vec![0.0; 3])),
        Arc::new(MockGenerator::answering("unused")),
        Arc::new(InMemoryVectorStore::new(3)),
    );

    let err = pipeline.summarize("").await.unwrap_err();
    assert!(matches!(err, RagError::InvalidInput(_)));
}

#[tokio::test]
async fn short_text_skips_summarization() {
    let generator = Arc::new(MockGenerator::answering("unused"));
    let pipeline = pipeline_with(
        Arc::new(MockEmbedder::returning(vec![0.0; 3])),
        Arc::clone(&generator),
        Arc::new(InMemoryVectorStore::new(3)),
    );

    let processed = pipeline.process_text("short text").await.unwrap();
    assert_eq!(processed.text, "short text");
    assert!(processed.summary.is_none());
    assert!(generator.recorded_prompts().is_empty());
}

#[tokio::test]
async fn long_text_gets_a_summary() {
    let generator = Arc::new(MockGenerator::answering("condensed"));
    let pipeline = pipeline_with(
        Arc::new(MockEmbedder::returning(vec![0.0; 3])),
        Arc::clone(&generator),
        Arc::new(InMemoryVectorStore::new(3)),
    );

    let processed = pipeline.process_text(&"y".repeat(300)).await.unwrap();
    assert_eq!(processed.summary.as_deref(), Some("condensed"));
}

#[tokio::test]
async fn summarization_failure_in_processing_is_swallowed() {
    let pipeline = pipeline_with(
        Arc::new(MockEmbedder::returning(vec![0.0; 3])),
        Arc::new(MockGenerator::failing()),
        Arc::new(InMemoryVectorStore::new(3)),
    );

    let processed = pipeline.process_text(&"z".repeat(300)).await.unwrap();
    assert_eq!(processed.text, "z".repeat(300));
    assert!(processed.summary.is_none());
}

#[tokio::test]
async fn summarize_source_downloads_and_summarizes() {
    let generator = Arc::new(MockGenerator::answering("object summary"));
    let pipeline = RagPipeline::builder()
        .config(RagConfig::default())
        .embedder(Arc::new(MockEmbedder::returning(vec![0.0; 3])))
        .generator(Arc::clone(&generator) as Arc<dyn Generator>)
        .vector_store(Arc::new(InMemoryVectorStore::new(3)))
        .object_store(Arc::new(MockObjectStore {
            key: "uploads/d.txt".into(),
            bytes: b"stored text".to_vec(),
        }))
        .build()
        .unwrap();

    let summary = pipeline.summarize_source("uploads/d.txt").await.unwrap();
    assert_eq!(summary, "object summary");
    assert!(generator.recorded_prompts()[0].contains("stored text"));
}

#[tokio::test]
async fn summarize_source_rejects_non_utf8_bytes() {
    let pipeline = RagPipeline::builder()
        .config(RagConfig::default())
        .embedder(Arc::new(MockEmbedder::returning(vec![0.0; 3])))
        .generator(Arc::new(MockGenerator::answering("unused")))
        .vector_store(Arc::new(InMemoryVectorStore::new(3)))
        .object_store(Arc::new(MockObjectStore {
            key: "uploads/bin".into(),
            bytes: vec![0xff, 0xfe, 0x00],
        }))
        .build()
        .unwrap();

    let err = pipeline.summarize_source("uploads/bin").await.unwrap_err();
    assert!(matches!(err, RagError::UnsupportedFormat(_)));
}

#[tokio::test]
async fn summarize_source_without_object_store_is_a_config_error() {
    let pipeline = pipeline_with(
        Arc::new(MockEmbedder::returning(vec![0.0; 3])),
        Arc::new(MockGenerator::answering("unused")),
        Arc::new(InMemoryVectorStore::new(3)),
    );

    let err = pipeline.summarize_source("uploads/missing").await.unwrap_err();
    assert!(matches!(err, RagError::ConfigError(_)));
}
