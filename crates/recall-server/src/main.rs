// ============================================================================
// recall-server — HTTP surface for the Recall memory service
// ============================================================================
// Exposes owner-scoped enumeration and deletion of stored question/answer
// memories over a Qdrant collection:
//   GET    /memories/{user_id}
//   DELETE /memories/{user_id}/{memory_id}
//   GET    /health
// ============================================================================

mod error;
mod routes;

use std::sync::Arc;

use anyhow::Context;
use recall_core::{AppConfig, MemoryStore};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Could not load .env file: {}", e);
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("recall_server=debug".parse().unwrap())
                .add_directive("recall_core=debug".parse().unwrap()),
        )
        .init();

    info!("Starting Recall memory service");

    let config = AppConfig::default();

    // Single long-lived store handle, shared read-only across all requests
    let store = MemoryStore::new(&config)
        .await
        .context("Failed to initialize memory store")?;

    let app = routes::router(Arc::new(store));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
