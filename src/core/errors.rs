use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Failure taxonomy for the extraction/RAG pipeline.
///
/// Collaborator failures keep their kind all the way to the HTTP caller;
/// nothing is swallowed except the documented fallbacks (site probe miss
/// with a full-body policy, empty retrieval result).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Malformed URL or one that fails a site rule's validation.
    /// Not retryable; the caller must supply a different URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// Browser navigation or rendering failure. Retryable.
    #[error("extraction failed: {0}")]
    Extraction(String),
    /// Embedding or vector-store failure during ingest. Retryable, batch-level.
    #[error("indexing failed: {0}")]
    Indexing(String),
    /// Embedding or vector-store failure during a query. Retryable.
    #[error("retrieval failed: {0}")]
    Retrieval(String),
    /// Empty context or query at generation time.
    #[error("missing input: {0}")]
    MissingInput(String),
    /// Model output failed JSON validation after sanitization.
    /// The raw text is carried for diagnostics; callers must not guess
    /// at partial JSON.
    #[error("invalid model response: {message}")]
    InvalidResponse { message: String, raw: String },
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl PipelineError {
    pub fn internal<E: std::fmt::Display>(err: E) -> Self {
        PipelineError::Internal(err.to_string())
    }

    /// Stable machine-readable kind, surfaced in error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::InvalidUrl(_) => "invalid_url",
            PipelineError::Extraction(_) => "extraction_error",
            PipelineError::Indexing(_) => "indexing_error",
            PipelineError::Retrieval(_) => "retrieval_error",
            PipelineError::MissingInput(_) => "missing_input",
            PipelineError::InvalidResponse { .. } => "invalid_response",
            PipelineError::BadRequest(_) => "bad_request",
            PipelineError::NotFound(_) => "not_found",
            PipelineError::Internal(_) => "internal",
        }
    }

    /// Whether the caller may retry the same request as-is.
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            PipelineError::Extraction(_)
                | PipelineError::Indexing(_)
                | PipelineError::Retrieval(_)
                | PipelineError::InvalidResponse { .. }
        )
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            PipelineError::InvalidUrl(_)
            | PipelineError::MissingInput(_)
            | PipelineError::BadRequest(_) => StatusCode::BAD_REQUEST,
            PipelineError::NotFound(_) => StatusCode::NOT_FOUND,
            PipelineError::Extraction(_)
            | PipelineError::Indexing(_)
            | PipelineError::Retrieval(_)
            | PipelineError::InvalidResponse { .. } => StatusCode::BAD_GATEWAY,
            PipelineError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let mut body = json!({
            "error": self.to_string(),
            "kind": self.kind(),
            "retryable": self.retryable(),
        });
        if let PipelineError::InvalidResponse { raw, .. } = &self {
            body["raw"] = json!(raw);
        }

        (status, Json(body)).into_response()
    }
}
