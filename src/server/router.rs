use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::server::handlers::{analyze, answer, context, extract, health, rag};
use crate::state::AppState;

/// Builds the application router.
///
/// CORS is wide open: the caller is a browser extension running on
/// arbitrary product pages, so there is no fixed origin to allow.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/extract", post(extract::extract_from_url))
        .route("/api/ingest", post(rag::ingest_documents))
        .route("/api/retrieve", post(rag::retrieve_context))
        .route(
            "/api/context",
            put(context::set_working_context).get(context::get_working_context),
        )
        .route("/api/answer", post(answer::answer_query))
        .route("/api/analyze", post(analyze::analyze_product))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
