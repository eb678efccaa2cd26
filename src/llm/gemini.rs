use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::core::config::LlmConfig;
use crate::core::errors::PipelineError;

use super::client::LlmClient;

/// REST client for the Gemini generative-language API.
///
/// Carries no state between calls; every request is self-contained. Errors
/// are mapped by the caller into the pipeline kind appropriate for the
/// operation (indexing vs retrieval vs generation), so this client reports
/// plain `Internal` failures.
#[derive(Clone)]
pub struct GeminiClient {
    base_url: String,
    generation_model: String,
    embedding_model: String,
    api_key: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig) -> Result<Self, PipelineError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            PipelineError::Internal(format!("{} is not set", config.api_key_env))
        })?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            generation_model: config.generation_model.clone(),
            embedding_model: config.embedding_model.clone(),
            api_key,
            client: Client::new(),
        })
    }

    fn model_url(&self, model: &str, op: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.base_url, model, op, self.api_key
        )
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, PipelineError> {
        let url = self.model_url(&self.embedding_model, "embedContent");
        let body = json!({
            "content": { "parts": [{ "text": text }] }
        });

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
                "Gemini embed error ({}): {}",
                status, text
            )));
        }

        let payload: Value = res.json().await.map_err(PipelineError::internal)?;
        let values = payload["embedding"]["values"]
            .as_array()
            .ok_or_else(|| {
                PipelineError::Internal("Gemini embed response missing values".to_string())
            })?
            .iter()
            .filter_map(|v| v.as_f64().map(|f| f as f32))
            .collect();

        Ok(values)
    }

    async fn generate(&self, prompt: &str) -> Result<String, PipelineError> {
        let url = self.model_url(&self.generation_model, "generateContent");
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

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
                "Gemini generate error ({}): {}",
                status, text
            )));
        }

        let payload: Value = res.json().await.map_err(PipelineError::internal)?;
        let content = payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                PipelineError::Internal("Gemini generate response missing text".to_string())
            })?
            .to_string();

        Ok(content)
    }
}
