use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::errors::PipelineError;

/// An embedded chunk ready for upsert.
///
/// `id` is `"{source_id}-{index}"`, so re-ingesting the same source
/// overwrites its chunks instead of duplicating them. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub id: String,
    pub source_id: String,
    pub index: usize,
    pub text: String,
    pub values: Vec<f32>,
}

/// One similarity match, transient per query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMatch {
    pub id: String,
    /// Cosine similarity in `[0, 1]`, as reported by the store.
    pub score: f32,
    pub text: String,
}

/// Abstract interface over the external vector database.
///
/// Upsert is one batch call; it is best-effort from the pipeline's point of
/// view — the store may or may not apply it atomically.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn upsert(&self, records: Vec<ChunkRecord>) -> Result<(), PipelineError>;

    /// Top-k similarity query. Matches come back in the store's relevance
    /// order (descending score); the pipeline never re-sorts them.
    async fn query(&self, values: &[f32], top_k: usize) -> Result<Vec<ChunkMatch>, PipelineError>;
}
