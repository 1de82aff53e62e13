//! Admin text-rewrite endpoints.
//!
//! These proxy the admin panel's "rewrite with AI" buttons. The engine
//! always produces an answer (cache, provider, or canned copy), so the
//! only client-visible failure here is a missing input text.

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;
use atelier_rewrite::RewriteSource;
use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RewriteRequest {
    pub text: Option<String>,
    #[serde(default)]
    pub field: String,
}

#[derive(Debug, Serialize)]
pub struct RewriteResponse {
    pub text: String,
    pub source: &'static str,
}

fn require_text(text: Option<&str>) -> ApiResult<&str> {
    match text {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(ApiError::BadRequest("'text' is required".to_string())),
    }
}

fn record_source(source: RewriteSource) {
    metrics::REWRITE_REQUESTS.inc();
    match source {
        RewriteSource::Cache => metrics::REWRITE_CACHE_HITS.inc(),
        RewriteSource::Mock => metrics::REWRITE_MOCK_FALLBACKS.inc(),
        _ => {}
    }
}

/// POST /v1/admin/rewrite - Rewrite one product field.
pub async fn rewrite_text(
    State(state): State<AppState>,
    Json(request): Json<RewriteRequest>,
) -> ApiResult<Json<RewriteResponse>> {
    let text = require_text(request.text.as_deref())?;

    let outcome = state.rewrite.rewrite(&request.field, text).await;
    record_source(outcome.source);

    Ok(Json(RewriteResponse {
        text: outcome.text,
        source: outcome.source.as_str(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct BenefitsRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BenefitsResponse {
    pub benefits: Vec<String>,
    pub source: &'static str,
}

/// POST /v1/admin/generate-benefits - Generate four benefit titles.
pub async fn generate_benefits(
    State(state): State<AppState>,
    Json(request): Json<BenefitsRequest>,
) -> ApiResult<Json<BenefitsResponse>> {
    let text = require_text(request.text.as_deref())?;

    let outcome = state.rewrite.generate_benefits(text).await;
    record_source(outcome.source);

    Ok(Json(BenefitsResponse {
        benefits: outcome.benefits,
        source: outcome.source.as_str(),
    }))
}
