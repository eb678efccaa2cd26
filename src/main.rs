use std::env;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use healthwise_backend::core::config::{AppConfig, AppPaths};
use healthwise_backend::core::logging;
use healthwise_backend::server::router;
use healthwise_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let paths = Arc::new(AppPaths::new());
    logging::init(&paths);

    let config = AppConfig::load(&paths);
    let port = env::var("PORT")
        .ok()
        .and_then(|val| val.parse::<u16>().ok())
        .unwrap_or(config.server.port);

    let state = AppState::initialize(paths, config).context("Failed to initialize pipeline")?;

    let bind_addr = format!("127.0.0.1:{}", port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let app: Router = router::router(state);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
