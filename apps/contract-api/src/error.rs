//! Error types for the contract API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use contract_store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Contract not found: {0}")]
    NotFound(String),

    #[error("Stale contract version: expected {expected}, found {actual}")]
    Conflict { expected: u32, actual: u32 },

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("A canvas sync for this contract is already running")]
    SyncInFlight,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(id),
            StoreError::Conflict { expected, actual } => ApiError::Conflict { expected, actual },
            StoreError::InvalidTransition { from, to } => {
                ApiError::InvalidTransition(format!("{} -> {}", from, to))
            }
            StoreError::SyncInFlight => ApiError::SyncInFlight,
            StoreError::Validation(msg) => ApiError::InvalidRequest(msg),
            StoreError::Corrupt(msg) => ApiError::Database(msg),
            StoreError::Database(e) => ApiError::Database(e.to_string()),
            StoreError::Serialization(e) => ApiError::Database(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Contract not found: {}", id))
            }
            ApiError::Conflict { expected, actual } => (
                StatusCode::CONFLICT,
                format!(
                    "Stale contract version: expected {}, found {}",
                    expected, actual
                ),
            ),
            ApiError::SyncInFlight => (
                StatusCode::CONFLICT,
                "A canvas sync for this contract is already running".to_string(),
            ),
            ApiError::InvalidTransition(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Invalid status transition: {}", detail),
            ),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
