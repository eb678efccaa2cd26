use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::core::errors::PipelineError;
use crate::rag::{build_context, NO_INFORMATION_ANSWER};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    /// Source id to document text. A `BTreeMap` keeps ingest order
    /// deterministic across runs.
    pub documents: BTreeMap<String, String>,
}

pub async fn ingest_documents(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<IngestRequest>,
) -> Result<impl IntoResponse, PipelineError> {
    let mut total = 0usize;
    for (source_id, text) in &payload.documents {
        total += state.indexer.ingest(source_id, text).await?;
    }

    Ok(Json(json!({
        "chunks_ingested": total,
        "message": format!("Successfully ingested {} document chunks.", total),
    })))
}

#[derive(Debug, Deserialize)]
pub struct RetrieveRequest {
    pub query: String,
    pub k: Option<usize>,
}

pub async fn retrieve_context(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RetrieveRequest>,
) -> Result<impl IntoResponse, PipelineError> {
    if payload.query.trim().is_empty() {
        return Err(PipelineError::BadRequest("Query is required".to_string()));
    }
    let top_k = payload.k.unwrap_or(state.config.rag.default_top_k);
    if top_k == 0 {
        return Err(PipelineError::BadRequest("k must be positive".to_string()));
    }

    let matches = state.retriever.retrieve(&payload.query, top_k).await?;
    if matches.is_empty() {
        return Ok(Json(json!({
            "context": "",
            "matches": [],
            "answer": NO_INFORMATION_ANSWER,
        })));
    }

    let context = build_context(&matches);
    Ok(Json(json!({
        "context": context,
        "matches": matches,
    })))
}
