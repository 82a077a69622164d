//! Root liveness route and store health check.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, instrument};

use crate::server::AppState;

/// Fixed liveness string served at the root route.
pub const LIVENESS_MESSAGE: &str = "food unity server is running!";

/// `GET /` — plain-text liveness probe.
pub async fn root() -> &'static str {
    LIVENESS_MESSAGE
}

/// `GET /health` — JSON health report including a document-store ping.
#[instrument(name = "health_check", skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Response {
    match state.storage.health_check().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "healthy" }))).into_response(),
        Err(err) => {
            error!(error = %err, "store health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy", "message": err.to_string() })),
            )
                .into_response()
        },
    }
}
