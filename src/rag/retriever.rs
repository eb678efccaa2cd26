use std::sync::Arc;

use crate::core::errors::PipelineError;
use crate::llm::LlmClient;
use crate::vector::{ChunkMatch, VectorStore};

/// Canned answer for queries that match nothing in the knowledge base.
/// An empty result set is a valid outcome, not an error.
pub const NO_INFORMATION_ANSWER: &str =
    "I couldn't find any relevant information in my knowledge base for your query.";

/// Embeds queries and fetches the nearest chunks.
pub struct Retriever {
    llm: Arc<dyn LlmClient>,
    store: Arc<dyn VectorStore>,
}

impl Retriever {
    pub fn new(llm: Arc<dyn LlmClient>, store: Arc<dyn VectorStore>) -> Self {
        Self { llm, store }
    }

    /// One embed call, one top-k store query. Matches keep the store's
    /// relevance order (descending score); no re-sorting here.
    pub async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ChunkMatch>, PipelineError> {
        let embedding = self
            .llm
            .embed(query)
            .await
            .map_err(|e| PipelineError::Retrieval(e.to_string()))?;

        let matches = self
            .store
            .query(&embedding, top_k)
            .await
            .map_err(|e| PipelineError::Retrieval(e.to_string()))?;

        tracing::debug!("Retrieved {} matches for query", matches.len());
        Ok(matches)
    }
}

/// Joins match texts in relevance order with a blank-line separator.
/// No deduplication across matches.
pub fn build_context(matches: &[ChunkMatch]) -> String {
    matches
        .iter()
        .map(|m| m.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
