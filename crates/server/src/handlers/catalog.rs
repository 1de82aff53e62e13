//! Public storefront endpoints: health, products, categories, carousel.

use crate::error::{ApiError, ApiResult};
use crate::handlers::common::{
    CategoryResponse, ProductResponse, SlideResponse, VariantResponse,
};
use crate::state::AppState;
use atelier_metadata::repos::ProductFilter;
use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /v1/health - Health check.
///
/// Intentionally unauthenticated for load balancers and uptime probes.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    state.metadata.health_check().await?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}

/// Storefront product listing query.
#[derive(Debug, Default, Deserialize)]
pub struct StoreProductQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
}

/// GET /v1/products - Storefront listing. Only active products are visible.
pub async fn list_store_products(
    State(state): State<AppState>,
    Query(query): Query<StoreProductQuery>,
) -> ApiResult<Json<ProductListResponse>> {
    let filter = ProductFilter {
        status: Some("active".to_string()),
        category_slug: query.category,
        search: query.search,
        limit: query.limit,
        offset: query.offset,
    };

    let products = state.metadata.list_products(&filter).await?;
    Ok(Json(ProductListResponse {
        products: products.into_iter().map(ProductResponse::from).collect(),
    }))
}

/// Product detail with its variants.
#[derive(Debug, Serialize)]
pub struct ProductDetailResponse {
    #[serde(flatten)]
    pub product: ProductResponse,
    pub variants: Vec<VariantResponse>,
}

/// GET /v1/products/{id} - Storefront product detail.
///
/// Draft and archived products 404 here; the admin listing shows them.
pub async fn get_store_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> ApiResult<Json<ProductDetailResponse>> {
    let product = state
        .metadata
        .get_product(product_id)
        .await?
        .filter(|p| p.status == "active")
        .ok_or_else(|| ApiError::NotFound("product not found".to_string()))?;

    let variants = state.metadata.list_variants(product_id).await?;

    Ok(Json(ProductDetailResponse {
        product: ProductResponse::from(product),
        variants: variants.into_iter().map(VariantResponse::from).collect(),
    }))
}

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryResponse>,
}

/// GET /v1/categories - All categories, ordered by position.
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<CategoryListResponse>> {
    let categories = state.metadata.list_categories().await?;
    Ok(Json(CategoryListResponse {
        categories: categories.into_iter().map(CategoryResponse::from).collect(),
    }))
}

#[derive(Debug, Serialize)]
pub struct CarouselResponse {
    pub slides: Vec<SlideResponse>,
}

/// GET /v1/carousel - Active hero slides for the storefront homepage.
pub async fn list_carousel(State(state): State<AppState>) -> ApiResult<Json<CarouselResponse>> {
    let slides = state.metadata.list_slides(true).await?;
    Ok(Json(CarouselResponse {
        slides: slides.into_iter().map(SlideResponse::from).collect(),
    }))
}
