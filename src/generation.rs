//! Generation gateway trait for prompt-conditioned text generation.

use async_trait::async_trait;

use crate::error::Result;

/// A gateway that sends a prompt to a text-generation model and returns the
/// completion text.
///
/// Implementations trim leading and trailing whitespace from the completion
/// before returning it. A failed call or unparseable response surfaces as
/// [`RagError::GenerationFailure`](crate::RagError::GenerationFailure).
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate completion text for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
