use std::sync::Arc;

use futures_util::stream::{self, StreamExt, TryStreamExt};

use crate::core::config::RagConfig;
use crate::core::errors::PipelineError;
use crate::llm::LlmClient;
use crate::vector::{ChunkRecord, VectorStore};

use super::chunker::chunk_text;

/// Turns documents into embedded chunks and upserts them.
///
/// Ingest is best-effort, not transactional: the upsert is a single batch
/// call, but the store itself decides how atomically it applies.
pub struct Indexer {
    llm: Arc<dyn LlmClient>,
    store: Arc<dyn VectorStore>,
    config: RagConfig,
}

impl Indexer {
    pub fn new(llm: Arc<dyn LlmClient>, store: Arc<dyn VectorStore>, config: RagConfig) -> Self {
        Self { llm, store, config }
    }

    /// Chunk, embed, and upsert one document. Returns the number of chunks
    /// upserted; zero chunks means no store call at all.
    ///
    /// Embeddings run concurrently under a cap so a long document does not
    /// flood the embedding service; chunk order is preserved for id
    /// assignment. Any embed or upsert failure aborts the whole ingest.
    pub async fn ingest(&self, source_id: &str, text: &str) -> Result<usize, PipelineError> {
        let chunks = chunk_text(text, self.config.chunk_size, self.config.chunk_overlap);
        if chunks.is_empty() {
            return Ok(0);
        }

        let embed_futures: Vec<_> = chunks.iter().map(|chunk| self.llm.embed(chunk)).collect();
        let embeddings: Vec<Vec<f32>> = stream::iter(embed_futures)
            .buffered(self.config.embed_concurrency.max(1))
            .try_collect()
            .await
            .map_err(|e| PipelineError::Indexing(e.to_string()))?;

        let records: Vec<ChunkRecord> = chunks
            .into_iter()
            .zip(embeddings)
            .enumerate()
            .map(|(index, (text, values))| ChunkRecord {
                id: format!("{}-{}", source_id, index),
                source_id: source_id.to_string(),
                index,
                text,
                values,
            })
            .collect();

        let count = records.len();
        self.store
            .upsert(records)
            .await
            .map_err(|e| PipelineError::Indexing(e.to_string()))?;

        tracing::info!("Ingested {} into {} chunks", source_id, count);
        Ok(count)
    }
}
