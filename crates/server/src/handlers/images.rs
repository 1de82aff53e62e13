//! Image upload, serving, and deletion.
//!
//! Images are stored under generated keys; the admin panel uploads a file
//! and gets back the key plus a public URL to put in a product's image
//! array. Serving goes through the object store, so it works for both
//! backends, but production S3 deployments should point `public_base_url`
//! at a CDN instead.

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;
use atelier_storage::content_type_for_key;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "avif", "svg"];

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    /// Original filename; only the extension is kept.
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub key: String,
    pub url: String,
    pub size: usize,
}

/// POST /v1/admin/images?filename=... - Store an image.
pub async fn upload_image(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("empty image body".to_string()));
    }
    let max = state.config.server.max_image_bytes;
    if body.len() > max {
        return Err(ApiError::PayloadTooLarge(format!(
            "image exceeds the {max} byte limit"
        )));
    }

    let extension = query
        .filename
        .rsplit('.')
        .next()
        .map(str::to_ascii_lowercase)
        .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .ok_or_else(|| {
            ApiError::BadRequest(format!(
                "unsupported image type, expected one of: {}",
                ALLOWED_EXTENSIONS.join(", ")
            ))
        })?;

    let key = format!("products/{}.{}", Uuid::new_v4(), extension);
    let size = body.len();
    state.storage.put(&key, body).await?;

    metrics::IMAGES_UPLOADED.inc();
    tracing::info!(key = %key, size, "Image stored");

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            url: state.image_url(&key),
            key,
            size,
        }),
    ))
}

/// GET /v1/images/{*key} - Serve a stored image.
pub async fn get_image(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Response> {
    let data = state.storage.get(&key).await?;
    let content_type = content_type_for_key(&key);

    Ok((
        StatusCode::OK,
        [
            ("Content-Type", content_type.to_string()),
            ("Cache-Control", "public, max-age=86400".to_string()),
        ],
        data,
    )
        .into_response())
}

/// DELETE /v1/admin/images/{*key} - Remove a stored image.
///
/// Product rows referencing the key keep their URL; the admin panel is
/// responsible for editing the product first.
pub async fn delete_image(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<StatusCode> {
    state.storage.delete(&key).await?;
    Ok(StatusCode::NO_CONTENT)
}
