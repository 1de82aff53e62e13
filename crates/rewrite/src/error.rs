//! Rewrite engine error types.

use thiserror::Error;

/// Rewrite operation errors.
///
/// Provider failures are internal to the engine; callers always get a result
/// because the engine falls back to canned copy. These errors surface in logs
/// and in engine construction.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned status {status}")]
    ProviderStatus { provider: &'static str, status: u16 },

    #[error("{provider} response missing generated text")]
    EmptyResponse { provider: &'static str },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for rewrite operations.
pub type RewriteResult<T> = std::result::Result<T, RewriteError>;
