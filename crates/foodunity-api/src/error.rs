//! API error type mapping domain failures to HTTP responses.
//!
//! Every failure surfaces as an explicit status code with a fixed JSON
//! message; nothing is logged and then silently dropped.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use foodunity_core::CoreError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::session::SessionError;

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, invalid, or expired session token.
    #[error("unauthorized access")]
    Unauthorized,

    /// Domain or store failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Session token could not be produced.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "unauthorized access".to_string())
            },
            Self::Core(CoreError::InvalidId(id)) => {
                (StatusCode::BAD_REQUEST, format!("invalid identifier: {id}"))
            },
            Self::Core(err) => {
                error!(error = %err, "store operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            },
            Self::Session(err) => {
                error!(error = %err, "session token operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            },
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
