use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::core::errors::PipelineError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub url: String,
}

/// Extracts page text and seeds the working context with it (the live
/// path: extract, then answer against the same text without indexing).
pub async fn extract_from_url(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ExtractRequest>,
) -> Result<impl IntoResponse, PipelineError> {
    if payload.url.trim().is_empty() {
        return Err(PipelineError::BadRequest("URL is required".to_string()));
    }

    let page = state.extractor.extract(&payload.url).await?;
    state.governor.set_context(page.text.clone()).await;

    Ok(Json(json!({
        "success": true,
        "text": page.text,
        "snapshot_path": page.snapshot_path,
        "url": payload.url,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}
