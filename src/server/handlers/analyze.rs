use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use futures_util::future::join_all;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::answer::ANALYSIS_ASPECTS;
use crate::core::errors::PipelineError;
use crate::state::AppState;

use super::answer::{off_domain_payload, resolve_profile};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub profile_id: Option<String>,
}

/// Runs the full analysis suite against the working context.
///
/// The aspects are read-only with respect to the context, so they fan out
/// concurrently. Failures are reported per aspect; one bad model response
/// does not sink the other five cards.
pub async fn analyze_product(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, PipelineError> {
    state.governor.ensure_bounded().await?;
    let ctx = state.governor.working_context().await;

    if ctx.is_empty() {
        return Err(PipelineError::MissingInput(
            "no working context; extract a product page first".to_string(),
        ));
    }
    if ctx.is_off_domain() {
        return Ok(Json(off_domain_payload()));
    }

    let profile = resolve_profile(&state, payload.profile_id.as_deref()).await?;

    let generator = &state.generator;
    let runs = ANALYSIS_ASPECTS.iter().map(|aspect| {
        let profile = profile.as_ref();
        let text = ctx.text.as_str();
        async move {
            let outcome = generator
                .answer(profile, text, aspect.query, aspect.contract)
                .await;
            (aspect.key, outcome)
        }
    });

    let mut results = Map::new();
    for (key, outcome) in join_all(runs).await {
        let entry = match outcome {
            Ok(data) => json!({ "ok": true, "data": data }),
            Err(err) => {
                tracing::warn!("Analysis aspect {} failed: {}", key, err);
                json!({ "ok": false, "error": err.to_string(), "kind": err.kind() })
            }
        };
        results.insert(key.to_string(), entry);
    }

    Ok(Json(json!({
        "status": "ok",
        "results": Value::Object(results),
    })))
}
