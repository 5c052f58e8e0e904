use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

/// Outcome taxonomy of the record-access core. Invalid arguments are caught
/// before any store call; not-found and cancelled stay distinct end to end;
/// everything else from the store is a generic persistence failure.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("no record found with id {0}")]
    NotFound(Uuid),
    #[error("operation cancelled")]
    Cancelled,
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl From<StoreError> for RecordError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Cancelled => RecordError::Cancelled,
            // Point lookups translate NotFound explicitly before reaching
            // this fallback; conflict stays a generic persistence failure.
            StoreError::NotFound | StoreError::Conflict | StoreError::Backend(_) => {
                RecordError::Persistence(err.to_string())
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("operation cancelled by client")]
    Cancelled,
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::InvalidArgument(msg) => ApiError::BadRequest(msg),
            RecordError::NotFound(id) => {
                ApiError::NotFound(format!("no record found with id {id}"))
            }
            RecordError::Cancelled => ApiError::Cancelled,
            RecordError::Persistence(msg) => ApiError::Internal(msg),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

// Non-standard status used for client-side cancellation, as nginx does.
const CLIENT_CLOSED_REQUEST: u16 = 499;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, msg)
            }
            ApiError::Cancelled => {
                tracing::warn!("Operation cancelled by client");
                (
                    StatusCode::from_u16(CLIENT_CLOSED_REQUEST)
                        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                    "operation cancelled by client".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
