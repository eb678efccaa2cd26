//! Headless-browser collaborator interface.
//!
//! The backend never drives a browser itself; it talks to a rendering
//! sidecar that loads a page and answers text/selector probes against the
//! rendered DOM. Only the extractor consumes this, so failures surface as
//! `Extraction` errors directly.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::core::config::BrowserConfig;
use crate::core::errors::PipelineError;

/// Opaque handle to a rendered page held by the sidecar.
#[derive(Debug, Clone)]
pub struct PageHandle(pub String);

#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Navigate to a URL and wait for the DOM to be ready.
    async fn navigate(&self, url: &str) -> Result<PageHandle, PipelineError>;

    /// Visible text of the elements matching `selector` (`"body"` for the
    /// whole page).
    async fn visible_text(&self, page: &PageHandle, selector: &str)
        -> Result<String, PipelineError>;

    /// Whether at least one element matches `selector`.
    async fn element_exists(
        &self,
        page: &PageHandle,
        selector: &str,
    ) -> Result<bool, PipelineError>;
}

/// HTTP client for the rendering sidecar.
#[derive(Clone)]
pub struct RemoteBrowser {
    endpoint: String,
    client: reqwest::Client,
}

impl RemoteBrowser {
    pub fn new(config: &BrowserConfig) -> Self {
        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, PipelineError> {
        let url = format!("{}{}", self.endpoint, path);
        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::Extraction(format!("browser request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::Extraction(format!(
                "browser error ({}): {}",
                status, text
            )));
        }

        res.json()
            .await
            .map_err(|e| PipelineError::Extraction(format!("browser response invalid: {}", e)))
    }
}

#[async_trait]
impl BrowserDriver for RemoteBrowser {
    async fn navigate(&self, url: &str) -> Result<PageHandle, PipelineError> {
        let payload = self.post("/pages", json!({ "url": url })).await?;
        let page_id = payload["page"]
            .as_str()
            .ok_or_else(|| PipelineError::Extraction("browser returned no page id".into()))?;
        Ok(PageHandle(page_id.to_string()))
    }

    async fn visible_text(
        &self,
        page: &PageHandle,
        selector: &str,
    ) -> Result<String, PipelineError> {
        let payload = self
            .post(
                &format!("/pages/{}/text", page.0),
                json!({ "selector": selector }),
            )
            .await?;
        Ok(payload["text"].as_str().unwrap_or_default().to_string())
    }

    async fn element_exists(
        &self,
        page: &PageHandle,
        selector: &str,
    ) -> Result<bool, PipelineError> {
        let payload = self
            .post(
                &format!("/pages/{}/exists", page.0),
                json!({ "selector": selector }),
            )
            .await?;
        Ok(payload["exists"].as_bool().unwrap_or(false))
    }
}
