//! Maps domain failures onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::DomainError;
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            DomainError::NotFound { entity, .. } => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": format!("{entity} not found") }))).into_response()
            }
            err @ DomainError::Validation(_) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": err.to_string() }))).into_response()
            }
            DomainError::Storage(msg) => {
                error!(error = %msg, "request failed on storage");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal server error", "error": msg })),
                )
                    .into_response()
            }
        }
    }
}
