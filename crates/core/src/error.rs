//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid field kind: {0}")]
    InvalidFieldKind(String),

    #[error("invalid order status: {0}")]
    InvalidOrderStatus(String),

    #[error("invalid status transition: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
