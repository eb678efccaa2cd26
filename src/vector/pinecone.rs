use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde_json::{json, Value};

use crate::core::config::VectorConfig;
use crate::core::errors::PipelineError;

use super::store::{ChunkMatch, ChunkRecord, VectorStore};

/// REST client for a Pinecone-style serverless index.
///
/// The index is expected to exist already, created with the configured
/// dimension and a cosine metric; index lifecycle is out of scope here.
#[derive(Clone)]
pub struct PineconeStore {
    index_host: String,
    namespace: Option<String>,
    dimension: usize,
    client: Client,
}

impl PineconeStore {
    pub fn new(config: &VectorConfig) -> Result<Self, PipelineError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            PipelineError::Internal(format!("{} is not set", config.api_key_env))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "Api-Key",
            HeaderValue::from_str(api_key.trim())
                .map_err(|_| PipelineError::Internal("invalid vector-store API key".into()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(PipelineError::internal)?;

        Ok(Self {
            index_host: config.index_host.trim_end_matches('/').to_string(),
            namespace: config.namespace.clone(),
            dimension: config.dimension,
            client,
        })
    }
}

#[async_trait]
impl VectorStore for PineconeStore {
    async fn upsert(&self, records: Vec<ChunkRecord>) -> Result<(), PipelineError> {
        // The index rejects mis-sized vectors anyway; failing here names the
        // offending chunk instead of echoing an opaque store error.
        if let Some(bad) = records.iter().find(|r| r.values.len() != self.dimension) {
            return Err(PipelineError::Indexing(format!(
                "vector {} has {} dimensions, index expects {}",
                bad.id,
                bad.values.len(),
                self.dimension
            )));
        }

        let url = format!("{}/vectors/upsert", self.index_host);

        let vectors: Vec<Value> = records
            .iter()
            .map(|record| {
                json!({
                    "id": record.id,
                    "values": record.values,
                    "metadata": {
                        "filename": record.source_id,
                        "chunk_index": record.index,
                        "text": record.text,
                    },
                })
            })
            .collect();

        let mut body = json!({ "vectors": vectors });
        if let Some(ns) = &self.namespace {
            body["namespace"] = json!(ns);
        }

        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(PipelineError::internal)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::Internal(format!(
                "vector upsert error ({}): {}",
                status, text
            )));
        }

        tracing::debug!("Upserted {} vectors", records.len());
        Ok(())
    }

    async fn query(&self, values: &[f32], top_k: usize) -> Result<Vec<ChunkMatch>, PipelineError> {
        let url = format!("{}/query", self.index_host);

        let mut body = json!({
            "vector": values,
            "topK": top_k,
            "includeMetadata": true,
        });
        if let Some(ns) = &self.namespace {
            body["namespace"] = json!(ns);
        }

        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(PipelineError::internal)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::Internal(format!(
                "vector query error ({}): {}",
                status, text
            )));
        }

        let payload: Value = res.json().await.map_err(PipelineError::internal)?;
        let matches = payload["matches"]
            .as_array()
            .map(|list| {
                list.iter()
                    .map(|m| ChunkMatch {
                        id: m["id"].as_str().unwrap_or_default().to_string(),
                        score: m["score"].as_f64().unwrap_or(0.0) as f32,
                        text: m["metadata"]["text"].as_str().unwrap_or_default().to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(matches)
    }
}
