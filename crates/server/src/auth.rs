//! Admin authentication middleware.
//!
//! The back office is gated by a single PIN sent in the `X-Admin-Pin`
//! header. Only the SHA-256 hash of the PIN lives in configuration; the
//! middleware hashes the presented value and compares digests.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use sha2::{Digest, Sha256};

/// Header carrying the admin PIN.
pub const ADMIN_PIN_HEADER: &str = "x-admin-pin";

/// Compute the SHA-256 hex digest of a PIN.
pub fn hash_pin(pin: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pin.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Middleware guarding `/v1/admin` routes.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let pin = request
        .headers()
        .get(ADMIN_PIN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("missing X-Admin-Pin header".to_string()))?;

    if hash_pin(pin) != state.config.admin.pin_hash {
        tracing::warn!("Rejected admin request with wrong PIN");
        return Err(ApiError::Unauthorized("invalid admin PIN".to_string()));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::config::AdminConfig;

    #[test]
    fn hash_matches_test_fixture() {
        assert_eq!(hash_pin("test-admin-pin"), AdminConfig::for_testing().pin_hash);
    }

    #[test]
    fn hash_is_lowercase_hex() {
        let digest = hash_pin("1234");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, digest.to_lowercase());
    }
}
