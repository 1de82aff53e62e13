//! API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// API error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("storage error: {0}")]
    Storage(#[from] atelier_storage::StorageError),

    #[error("metadata error: {0}")]
    Metadata(#[from] atelier_metadata::MetadataError),

    #[error("{0}")]
    Core(#[from] atelier_core::Error),
}

impl ApiError {
    /// Get the error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::Unauthorized(_) => "unauthorized",
            Self::Conflict(_) => "conflict",
            Self::PayloadTooLarge(_) => "payload_too_large",
            Self::Internal(_) => "internal_error",
            Self::Storage(_) => "storage_error",
            Self::Metadata(e) => match e {
                atelier_metadata::MetadataError::InsufficientStock { .. } => "insufficient_stock",
                atelier_metadata::MetadataError::InvalidStatusTransition { .. } => {
                    "invalid_status_transition"
                }
                _ => "metadata_error",
            },
            Self::Core(_) => "validation_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Storage(e) => match e {
                atelier_storage::StorageError::NotFound(_) => StatusCode::NOT_FOUND,
                atelier_storage::StorageError::InvalidKey(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Metadata(e) => match e {
                atelier_metadata::MetadataError::NotFound(_) => StatusCode::NOT_FOUND,
                atelier_metadata::MetadataError::AlreadyExists(_) => StatusCode::CONFLICT,
                atelier_metadata::MetadataError::Constraint(_) => StatusCode::CONFLICT,
                atelier_metadata::MetadataError::InsufficientStock { .. } => StatusCode::CONFLICT,
                atelier_metadata::MetadataError::InvalidStatusTransition { .. } => {
                    StatusCode::CONFLICT
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Core(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_metadata::MetadataError;

    #[test]
    fn insufficient_stock_maps_to_conflict() {
        let err = ApiError::Metadata(MetadataError::InsufficientStock {
            item: "Argan Oil".to_string(),
            requested: 3,
            available: 1,
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.code(), "insufficient_stock");
    }

    #[test]
    fn status_transition_maps_to_conflict() {
        let err = ApiError::Metadata(MetadataError::InvalidStatusTransition {
            from: "delivered".to_string(),
            to: "pending".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn core_errors_are_bad_requests() {
        let err = ApiError::Core(atelier_core::Error::InvalidOrderStatus("bogus".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
