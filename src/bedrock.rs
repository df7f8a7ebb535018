//! Amazon Bedrock model gateways.
//!
//! Provides [`BedrockEmbedder`] (Titan text embeddings) and
//! [`BedrockGenerator`] (Claude text completion) over the Bedrock runtime
//! `InvokeModel` REST endpoint, authenticated with a Bedrock API key
//! (bearer token).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::Embedder;
use crate::error::{RagError, Result};
use crate::generation::Generator;

/// Environment variable holding the Bedrock API key.
const API_KEY_ENV: &str = "AWS_BEARER_TOKEN_BEDROCK";

/// The default AWS region for the runtime endpoint.
const DEFAULT_REGION: &str = "us-east-1";

/// The default embedding model.
const DEFAULT_EMBEDDING_MODEL: &str = "amazon.titan-embed-text-v1";

/// The dimensionality of `amazon.titan-embed-text-v1` vectors.
const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1536;

/// The default text-generation model.
const DEFAULT_GENERATION_MODEL: &str = "anthropic.claude-v2";

fn invoke_url(region: &str, model_id: &str) -> String {
    format!("https://bedrock-runtime.{region}.amazonaws.com/model/{model_id}/invoke")
}

// ── Bedrock wire types ─────────────────────────────────────────────

#[derive(Serialize)]
struct TitanEmbeddingInput<'a> {
    #[serde(rename = "inputText")]
    input_text: &'a str,
}

#[derive(Deserialize)]
struct TitanEmbeddingOutput {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ClaudeInput<'a> {
    prompt: &'a str,
    max_tokens_to_sample: u32,
    temperature: f64,
    top_p: f64,
    top_k: u32,
}

#[derive(Deserialize)]
struct ClaudeOutput {
    completion: String,
}

#[derive(Deserialize)]
struct BedrockErrorBody {
    message: String,
}

/// Extract the `message` field from a Bedrock error body, falling back to
/// the raw body text.
fn error_detail(body: String) -> String {
    serde_json::from_str::<BedrockErrorBody>(&body).map(|e| e.message).unwrap_or(body)
}

// ── Embedder ───────────────────────────────────────────────────────

/// An [`Embedder`] backed by the Amazon Titan embedding model.
///
/// # Example
///
/// ```rust,ignore
/// use docrag::bedrock::BedrockEmbedder;
///
/// let embedder = BedrockEmbedder::new("bedrock-api-key...")?;
/// let vector = embedder.embed("hello world").await?;
/// assert_eq!(vector.len(), 1536);
/// ```
pub struct BedrockEmbedder {
    client: reqwest::Client,
    api_key: String,
    region: String,
    model_id: String,
    dimensions: usize,
}

impl BedrockEmbedder {
    /// Create a new embedder with the given API key.
    ///
    /// Uses the default region (`us-east-1`) and model
    /// (`amazon.titan-embed-text-v1`, 1536 dimensions).
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(RagError::EmbeddingFailure {
                provider: "Bedrock".into(),
                message: "API key must not be empty".into(),
            });
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            region: DEFAULT_REGION.into(),
            model_id: DEFAULT_EMBEDDING_MODEL.into(),
            dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
        })
    }

    /// Create a new embedder using the `AWS_BEARER_TOKEN_BEDROCK`
    /// environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| RagError::EmbeddingFailure {
            provider: "Bedrock".into(),
            message: format!("{API_KEY_ENV} environment variable not set"),
        })?;
        Self::new(api_key)
    }

    /// Set the AWS region of the runtime endpoint.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the embedding model ID and its output dimensionality.
    pub fn with_model(mut self, model_id: impl Into<String>, dimensions: usize) -> Self {
        self.model_id = model_id.into();
        self.dimensions = dimensions;
        self
    }
}

#[async_trait]
impl Embedder for BedrockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = "Bedrock", model = %self.model_id, text_len = text.len(), "embedding text");

        let response = self
            .client
            .post(invoke_url(&self.region, &self.model_id))
            .bearer_auth(&self.api_key)
            .json(&TitanEmbeddingInput { input_text: text })
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Bedrock", error = %e, "embedding request failed");
                RagError::EmbeddingFailure {
                    provider: "Bedrock".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = error_detail(response.text().await.unwrap_or_default());
            error!(provider = "Bedrock", %status, "embedding API error");
            return Err(RagError::EmbeddingFailure {
                provider: "Bedrock".into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let output: TitanEmbeddingOutput = response.json().await.map_err(|e| {
            error!(provider = "Bedrock", error = %e, "failed to parse embedding response");
            RagError::EmbeddingFailure {
                provider: "Bedrock".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        // A zero-length vector is a malformed response, not a usable result.
        if output.embedding.is_empty() {
            return Err(RagError::EmbeddingFailure {
                provider: "Bedrock".into(),
                message: "API returned an empty embedding".into(),
            });
        }

        Ok(output.embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

// ── Generator ──────────────────────────────────────────────────────

/// A [`Generator`] backed by a Claude text-completion model on Bedrock.
///
/// Sampling parameters default to the values the service was tuned with
/// (`max_tokens_to_sample` 2048, temperature 0.7, top_p 0.9, top_k 250).
pub struct BedrockGenerator {
    client: reqwest::Client,
    api_key: String,
    region: String,
    model_id: String,
    max_tokens: u32,
    temperature: f64,
}

impl BedrockGenerator {
    /// Create a new generator with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(RagError::GenerationFailure {
                provider: "Bedrock".into(),
                message: "API key must not be empty".into(),
            });
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            region: DEFAULT_REGION.into(),
            model_id: DEFAULT_GENERATION_MODEL.into(),
            max_tokens: 2048,
            temperature: 0.7,
        })
    }

    /// Create a new generator using the `AWS_BEARER_TOKEN_BEDROCK`
    /// environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| RagError::GenerationFailure {
            provider: "Bedrock".into(),
            message: format!("{API_KEY_ENV} environment variable not set"),
        })?;
        Self::new(api_key)
    }

    /// Set the AWS region of the runtime endpoint.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set the generation model ID.
    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Set the maximum number of tokens to sample.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl Generator for BedrockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(provider = "Bedrock", model = %self.model_id, prompt_len = prompt.len(), "generating");

        let body = ClaudeInput {
            prompt,
            max_tokens_to_sample: self.max_tokens,
            temperature: self.temperature,
            top_p: 0.9,
            top_k: 250,
        };

        let response = self
            .client
            .post(invoke_url(&self.region, &self.model_id))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Bedrock", error = %e, "generation request failed");
                RagError::GenerationFailure {
                    provider: "Bedrock".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = error_detail(response.text().await.unwrap_or_default());
            error!(provider = "Bedrock", %status, "generation API error");
            return Err(RagError::GenerationFailure {
                provider: "Bedrock".into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let output: ClaudeOutput = response.json().await.map_err(|e| {
            error!(provider = "Bedrock", error = %e, "failed to parse completion response");
            RagError::GenerationFailure {
                provider: "Bedrock".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(output.completion.trim().to_string())
    }
}
