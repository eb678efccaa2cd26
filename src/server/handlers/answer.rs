use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::core::errors::PipelineError;
use crate::state::AppState;

/// Shape requested when the caller does not declare one of their own.
const DEFAULT_CONTRACT: &str = r#"Return JSON in this exact format:
{
  "answer": "Your answer to the question"
}"#;

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub query: String,
    pub profile_id: Option<String>,
    pub contract: Option<String>,
}

/// Answers a question against the current working context.
///
/// Runs the governor first so an oversized context is compressed before it
/// reaches the prompt. An off-domain sentinel in the context is a terminal
/// "cannot answer" outcome, not an error.
pub async fn answer_query(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AnswerRequest>,
) -> Result<impl IntoResponse, PipelineError> {
    if payload.query.trim().is_empty() {
        return Err(PipelineError::BadRequest("Query is required".to_string()));
    }

    state.governor.ensure_bounded().await?;
    let ctx = state.governor.working_context().await;

    if ctx.is_off_domain() {
        return Ok(Json(off_domain_payload()));
    }

    let profile = resolve_profile(&state, payload.profile_id.as_deref()).await?;
    let contract = payload.contract.as_deref().unwrap_or(DEFAULT_CONTRACT);

    let answer = state
        .generator
        .answer(profile.as_ref(), &ctx.text, &payload.query, contract)
        .await?;

    Ok(Json(json!({
        "status": "ok",
        "answer": answer,
    })))
}

pub(super) fn off_domain_payload() -> Value {
    json!({
        "status": "off_domain",
        "answer": Value::Null,
        "message": "The current page does not describe a food or health product.",
    })
}

pub(super) async fn resolve_profile(
    state: &AppState,
    profile_id: Option<&str>,
) -> Result<Option<Value>, PipelineError> {
    match profile_id {
        Some(id) => {
            let profile = state.profiles.get_by_id(id).await?.ok_or_else(|| {
                PipelineError::NotFound(format!("Profile {} not found", id))
            })?;
            Ok(Some(profile))
        }
        None => Ok(None),
    }
}
