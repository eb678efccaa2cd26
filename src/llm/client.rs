use async_trait::async_trait;

use crate::core::errors::PipelineError;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Embed a single text into a fixed-dimensionality vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, PipelineError>;

    /// Generate text from a fully assembled prompt.
    async fn generate(&self, prompt: &str) -> Result<String, PipelineError>;
}
