use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::core::errors::PipelineError;
use crate::state::AppState;

const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
pub struct SetContextRequest {
    pub text: String,
}

pub async fn set_working_context(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SetContextRequest>,
) -> Result<impl IntoResponse, PipelineError> {
    state.governor.set_context(payload.text).await;
    Ok(Json(json!({ "success": true })))
}

pub async fn get_working_context(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, PipelineError> {
    let ctx = state.governor.working_context().await;
    let preview: String = ctx.text.chars().take(PREVIEW_CHARS).collect();

    Ok(Json(json!({
        "present": !ctx.is_empty(),
        "length": ctx.text.chars().count(),
        "size_words": ctx.size_words,
        "preview": preview,
    })))
}
