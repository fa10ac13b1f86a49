// ============================================================================
// API error mapping — domain errors onto HTTP status codes
// ============================================================================
// Every backend failure is caught once here at the handler boundary and
// turned into a structured {"detail": ...} body. Store internals are logged,
// never interpolated into responses.
// ============================================================================

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use recall_core::MemoryError;
use serde_json::json;
use tracing::error;

/// Wrapper that lets handlers return `Result<_, ApiError>` with `?`
pub struct ApiError(MemoryError);

impl From<MemoryError> for ApiError {
    fn from(err: MemoryError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            MemoryError::MissingUserId => {
                (StatusCode::BAD_REQUEST, "User ID is required".to_string())
            }
            MemoryError::NotFound(cause) => (
                StatusCode::NOT_FOUND,
                format!("Memory not found or couldn't be deleted: {}", cause),
            ),
            MemoryError::Store(cause) => {
                error!("Memory store failure: {}", cause);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred talking to the memory store".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
