// ============================================================================
// Memory routes
// ============================================================================
// Handlers are stateless between calls; each request is a single round-trip
// to the store through the shared backend handle.
// ============================================================================

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

use recall_core::{MemoryBackend, MemoryResponse};

use crate::error::ApiError;

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    backend: Arc<dyn MemoryBackend>,
}

/// Build the service router
pub fn router(backend: Arc<dyn MemoryBackend>) -> Router {
    let state = AppState { backend };

    Router::new()
        .route("/memories/{user_id}", get(list_memories))
        .route("/memories/{user_id}/{memory_id}", delete(delete_memory))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct DeleteResponse {
    message: String,
}

/// GET /memories/{user_id} — enumerate a user's stored memories
async fn list_memories(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<MemoryResponse>>, ApiError> {
    let memories = state.backend.list_memories(&user_id).await?;
    Ok(Json(
        memories.into_iter().map(MemoryResponse::from).collect(),
    ))
}

/// DELETE /memories/{user_id}/{memory_id} — delete one memory the user owns
async fn delete_memory(
    State(state): State<AppState>,
    Path((user_id, memory_id)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.backend.delete_memory(&user_id, &memory_id).await?;
    Ok(Json(DeleteResponse {
        message: "Memory deleted successfully".to_string(),
    }))
}

/// GET /health — store connectivity probe
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.backend.health_check().await {
        Ok(true) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        _ => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable" })),
        ),
    }
}
