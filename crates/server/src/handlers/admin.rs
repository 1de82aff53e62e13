//! Administrative endpoints (PIN-gated).

use crate::error::{ApiError, ApiResult};
use crate::handlers::common::{
    OrderResponse, PageQuery, ProductResponse, SlideResponse, VariantResponse, require_field,
};
use crate::metrics;
use crate::state::AppState;
use atelier_core::{CombinationDefaults, OrderStatus, generate_combinations};
use atelier_metadata::models::{CategoryRow, HeroSlideRow, ProductRow, VariantRow};
use atelier_metadata::repos::ProductFilter;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;
use uuid::Uuid;

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ProductBody {
    pub title: String,
    #[serde(default)]
    pub title_ar: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_ar: String,
    pub sku: String,
    pub category_slug: String,
    pub price: f64,
    pub compare_at_price: Option<f64>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    pub size_guide: Option<String>,
}

fn default_status() -> String {
    "draft".to_string()
}

const PRODUCT_STATUSES: &[&str] = &["draft", "active", "archived"];

fn validate_product(body: &ProductBody) -> ApiResult<()> {
    require_field(&body.title, "title")?;
    require_field(&body.sku, "sku")?;
    require_field(&body.category_slug, "category_slug")?;
    if body.price < 0.0 {
        return Err(ApiError::BadRequest("price must not be negative".to_string()));
    }
    if body.stock < 0 {
        return Err(ApiError::BadRequest("stock must not be negative".to_string()));
    }
    if !PRODUCT_STATUSES.contains(&body.status.as_str()) {
        return Err(ApiError::BadRequest(format!(
            "status must be one of: {}",
            PRODUCT_STATUSES.join(", ")
        )));
    }
    Ok(())
}

fn encode_array(values: &[String]) -> ApiResult<String> {
    serde_json::to_string(values)
        .map_err(|e| ApiError::Internal(format!("failed to encode array: {e}")))
}

/// POST /v1/admin/products - Create a product.
pub async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<ProductBody>,
) -> ApiResult<(StatusCode, Json<ProductResponse>)> {
    validate_product(&body)?;

    let now = OffsetDateTime::now_utc();
    let row = ProductRow {
        product_id: Uuid::new_v4(),
        title: body.title.trim().to_string(),
        title_ar: body.title_ar.trim().to_string(),
        description: body.description,
        description_ar: body.description_ar,
        sku: body.sku.trim().to_string(),
        category_slug: body.category_slug.trim().to_string(),
        price: body.price,
        compare_at_price: body.compare_at_price,
        stock: body.stock,
        status: body.status,
        images_json: encode_array(&body.images)?,
        benefits_json: encode_array(&body.benefits)?,
        size_guide: body.size_guide,
        sales_count: 0,
        created_at: now,
        updated_at: now,
    };

    state.metadata.create_product(&row).await?;
    tracing::info!(product_id = %row.product_id, sku = %row.sku, "Product created");

    Ok((StatusCode::CREATED, Json(ProductResponse::from(row))))
}

#[derive(Debug, Default, Deserialize)]
pub struct AdminProductQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AdminProductListResponse {
    pub products: Vec<ProductResponse>,
}

/// GET /v1/admin/products - List products across all statuses.
pub async fn list_admin_products(
    State(state): State<AppState>,
    Query(query): Query<AdminProductQuery>,
) -> ApiResult<Json<AdminProductListResponse>> {
    let filter = ProductFilter {
        status: query.status,
        category_slug: query.category,
        search: query.search,
        limit: query.limit,
        offset: query.offset,
    };
    let products = state.metadata.list_products(&filter).await?;
    Ok(Json(AdminProductListResponse {
        products: products.into_iter().map(ProductResponse::from).collect(),
    }))
}

/// GET /v1/admin/products/{id} - Product detail regardless of status.
pub async fn get_admin_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> ApiResult<Json<ProductResponse>> {
    let product = state
        .metadata
        .get_product(product_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("product not found".to_string()))?;
    Ok(Json(ProductResponse::from(product)))
}

/// PUT /v1/admin/products/{id} - Full update of a product.
///
/// `sales_count` and `created_at` are preserved from the stored row.
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(body): Json<ProductBody>,
) -> ApiResult<Json<ProductResponse>> {
    validate_product(&body)?;

    let existing = state
        .metadata
        .get_product(product_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("product not found".to_string()))?;

    let row = ProductRow {
        product_id,
        title: body.title.trim().to_string(),
        title_ar: body.title_ar.trim().to_string(),
        description: body.description,
        description_ar: body.description_ar,
        sku: body.sku.trim().to_string(),
        category_slug: body.category_slug.trim().to_string(),
        price: body.price,
        compare_at_price: body.compare_at_price,
        stock: body.stock,
        status: body.status,
        images_json: encode_array(&body.images)?,
        benefits_json: encode_array(&body.benefits)?,
        size_guide: body.size_guide,
        sales_count: existing.sales_count,
        created_at: existing.created_at,
        updated_at: OffsetDateTime::now_utc(),
    };

    state.metadata.update_product(&row).await?;
    Ok(Json(ProductResponse::from(row)))
}

/// DELETE /v1/admin/products/{id} - Delete a product and its variants.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.metadata.delete_product(product_id).await?;
    tracing::info!(product_id = %product_id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Variants
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct VariantBody {
    pub size: Option<String>,
    pub color: Option<String>,
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub stock: i64,
}

#[derive(Debug, Serialize)]
pub struct VariantListResponse {
    pub variants: Vec<VariantResponse>,
}

/// GET /v1/admin/products/{id}/variants - List a product's variants.
pub async fn list_variants(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> ApiResult<Json<VariantListResponse>> {
    let variants = state.metadata.list_variants(product_id).await?;
    Ok(Json(VariantListResponse {
        variants: variants.into_iter().map(VariantResponse::from).collect(),
    }))
}

/// POST /v1/admin/products/{id}/variants - Create a single variant.
pub async fn create_variant(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(body): Json<VariantBody>,
) -> ApiResult<(StatusCode, Json<VariantResponse>)> {
    require_field(&body.name, "name")?;
    require_field(&body.sku, "sku")?;
    if body.price < 0.0 || body.stock < 0 {
        return Err(ApiError::BadRequest(
            "price and stock must not be negative".to_string(),
        ));
    }

    state
        .metadata
        .get_product(product_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("product not found".to_string()))?;

    let now = OffsetDateTime::now_utc();
    let row = VariantRow {
        variant_id: Uuid::new_v4(),
        product_id,
        size: body.size,
        color: body.color,
        name: body.name.trim().to_string(),
        sku: body.sku.trim().to_string(),
        price: body.price,
        stock: body.stock,
        created_at: now,
        updated_at: now,
    };
    state.metadata.create_variant(&row).await?;

    Ok((StatusCode::CREATED, Json(VariantResponse::from(row))))
}

/// PUT /v1/admin/variants/{id} - Update a variant.
pub async fn update_variant(
    State(state): State<AppState>,
    Path(variant_id): Path<Uuid>,
    Json(body): Json<VariantBody>,
) -> ApiResult<Json<VariantResponse>> {
    let existing = state
        .metadata
        .get_variant(variant_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("variant not found".to_string()))?;

    let row = VariantRow {
        variant_id,
        product_id: existing.product_id,
        size: body.size,
        color: body.color,
        name: body.name.trim().to_string(),
        sku: body.sku.trim().to_string(),
        price: body.price,
        stock: body.stock,
        created_at: existing.created_at,
        updated_at: OffsetDateTime::now_utc(),
    };
    state.metadata.update_variant(&row).await?;
    Ok(Json(VariantResponse::from(row)))
}

/// DELETE /v1/admin/variants/{id} - Delete a variant.
pub async fn delete_variant(
    State(state): State<AppState>,
    Path(variant_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.metadata.delete_variant(variant_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct GenerateVariantsRequest {
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateVariantsResponse {
    pub created: Vec<VariantResponse>,
    pub skipped: usize,
}

/// POST /v1/admin/products/{id}/variants/generate - Expand size and color
/// selections into persisted variants.
///
/// Pairs the product already has are left untouched; the response reports
/// how many requested pairs were skipped that way. Calling twice with the
/// same selections creates nothing on the second call.
pub async fn generate_variants(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(request): Json<GenerateVariantsRequest>,
) -> ApiResult<(StatusCode, Json<GenerateVariantsResponse>)> {
    let product = state
        .metadata
        .get_product(product_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("product not found".to_string()))?;

    let existing: Vec<(Option<String>, Option<String>)> = state
        .metadata
        .list_variants(product_id)
        .await?
        .into_iter()
        .map(|v| (v.size, v.color))
        .collect();

    let requested = {
        let sizes = request.sizes.len().max(1);
        let colors = request.colors.len().max(1);
        if request.sizes.is_empty() && request.colors.is_empty() {
            0
        } else {
            sizes * colors
        }
    };

    let drafts = generate_combinations(
        &request.sizes,
        &request.colors,
        &existing,
        &CombinationDefaults {
            product_sku: product.sku.clone(),
            base_price: product.price,
        },
    );
    let skipped = requested.saturating_sub(drafts.len());

    let now = OffsetDateTime::now_utc();
    let mut created = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let row = VariantRow {
            variant_id: Uuid::new_v4(),
            product_id,
            size: draft.size,
            color: draft.color,
            name: draft.name,
            sku: draft.sku,
            price: draft.price,
            stock: draft.stock,
            created_at: now,
            updated_at: now,
        };
        state.metadata.create_variant(&row).await?;
        created.push(VariantResponse::from(row));
    }

    metrics::VARIANTS_GENERATED.inc_by(created.len() as u64);
    tracing::info!(
        product_id = %product_id,
        created = created.len(),
        skipped,
        "Variant combinations generated"
    );

    Ok((
        StatusCode::CREATED,
        Json(GenerateVariantsResponse { created, skipped }),
    ))
}

// =============================================================================
// Categories
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CategoryBody {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub name_ar: String,
    #[serde(default)]
    pub position: i64,
}

/// PUT /v1/admin/categories - Upsert a category keyed by slug.
pub async fn upsert_category(
    State(state): State<AppState>,
    Json(body): Json<CategoryBody>,
) -> ApiResult<StatusCode> {
    require_field(&body.slug, "slug")?;
    require_field(&body.name, "name")?;

    let now = OffsetDateTime::now_utc();
    let row = CategoryRow {
        category_id: Uuid::new_v4(),
        slug: body.slug.trim().to_string(),
        name: body.name.trim().to_string(),
        name_ar: body.name_ar.trim().to_string(),
        position: body.position,
        created_at: now,
        updated_at: now,
    };
    state.metadata.upsert_category(&row).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /v1/admin/categories/{id} - Delete a category.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.metadata.delete_category(category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderResponse>,
}

/// GET /v1/admin/orders - List orders, newest first.
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> ApiResult<Json<OrderListResponse>> {
    let page = PageQuery {
        limit: query.limit,
        offset: query.offset,
    };
    let orders = state
        .metadata
        .list_orders(query.status.as_deref(), page.limit(), page.offset())
        .await?;

    let mut out = Vec::with_capacity(orders.len());
    for order in orders {
        let items = state.metadata.list_order_items(order.order_id).await?;
        out.push(OrderResponse::from_parts(order, items));
    }
    Ok(Json(OrderListResponse { orders: out }))
}

/// GET /v1/admin/orders/{id} - Order detail.
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> ApiResult<Json<OrderResponse>> {
    let order = state
        .metadata
        .get_order(order_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("order not found".to_string()))?;
    let items = state.metadata.list_order_items(order_id).await?;
    Ok(Json(OrderResponse::from_parts(order, items)))
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

/// POST /v1/admin/orders/{id}/status - Transition an order's status.
///
/// The lifecycle is validated before touching the database, and the store
/// re-checks the expected current status inside its transaction, so two
/// admins racing on the same order cannot double-apply a transition.
/// Cancellation restores stock.
pub async fn set_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(request): Json<SetStatusRequest>,
) -> ApiResult<Json<OrderResponse>> {
    let new_status = OrderStatus::parse(&request.status)?;

    let order = state
        .metadata
        .get_order(order_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("order not found".to_string()))?;
    let current = OrderStatus::parse(&order.status)?;

    if !current.can_transition(new_status) {
        return Err(ApiError::Conflict(format!(
            "cannot transition order from {current} to {new_status}"
        )));
    }

    let restock = new_status == OrderStatus::Cancelled;
    state
        .metadata
        .set_order_status(order_id, current.as_str(), new_status.as_str(), restock)
        .await?;

    if restock {
        metrics::ORDERS_CANCELLED.inc();
    }
    tracing::info!(
        order_number = %order.order_number,
        from = %current,
        to = %new_status,
        "Order status updated"
    );

    let updated = state
        .metadata
        .get_order(order_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("order not found".to_string()))?;
    let items = state.metadata.list_order_items(order_id).await?;
    Ok(Json(OrderResponse::from_parts(updated, items)))
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub customer_phone: String,
    pub customer_name: String,
    pub orders_count: i64,
    pub total_spent: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub last_order_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct CustomerListResponse {
    pub customers: Vec<CustomerResponse>,
}

/// GET /v1/admin/customers - Customers aggregated from order history.
pub async fn list_customers(
    State(state): State<AppState>,
) -> ApiResult<Json<CustomerListResponse>> {
    let customers = state.metadata.list_customers().await?;
    Ok(Json(CustomerListResponse {
        customers: customers
            .into_iter()
            .map(|c| CustomerResponse {
                customer_phone: c.customer_phone,
                customer_name: c.customer_name,
                orders_count: c.orders_count,
                total_spent: c.total_spent,
                last_order_at: c.last_order_at,
            })
            .collect(),
    }))
}

// =============================================================================
// Leads
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ContactMessageResponse {
    pub message_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// GET /v1/admin/leads/contact - Contact inbox.
pub async fn list_contact_messages(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let messages = state
        .metadata
        .list_contact_messages(page.limit(), page.offset())
        .await?;
    let messages: Vec<ContactMessageResponse> = messages
        .into_iter()
        .map(|m| ContactMessageResponse {
            message_id: m.message_id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            message: m.message,
            created_at: m.created_at,
        })
        .collect();
    Ok(Json(serde_json::json!({ "messages": messages })))
}

/// DELETE /v1/admin/leads/contact/{id}
pub async fn delete_contact_message(
    State(state): State<AppState>,
    Path(message_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.metadata.delete_contact_message(message_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
pub struct CareerApplicationResponse {
    pub application_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub message: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// GET /v1/admin/leads/careers - Career applications inbox.
pub async fn list_career_applications(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let applications = state
        .metadata
        .list_career_applications(page.limit(), page.offset())
        .await?;
    let applications: Vec<CareerApplicationResponse> = applications
        .into_iter()
        .map(|a| CareerApplicationResponse {
            application_id: a.application_id,
            name: a.name,
            email: a.email,
            phone: a.phone,
            position: a.position,
            message: a.message,
            created_at: a.created_at,
        })
        .collect();
    Ok(Json(serde_json::json!({ "applications": applications })))
}

/// DELETE /v1/admin/leads/careers/{id}
pub async fn delete_career_application(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.metadata.delete_career_application(application_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
pub struct WhatsappLeadResponse {
    pub lead_id: Uuid,
    pub country_code: String,
    pub phone: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// GET /v1/admin/leads/whatsapp - WhatsApp subscription list.
pub async fn list_whatsapp_leads(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let leads = state
        .metadata
        .list_whatsapp_leads(page.limit(), page.offset())
        .await?;
    let leads: Vec<WhatsappLeadResponse> = leads
        .into_iter()
        .map(|l| WhatsappLeadResponse {
            lead_id: l.lead_id,
            country_code: l.country_code,
            phone: l.phone,
            created_at: l.created_at,
        })
        .collect();
    Ok(Json(serde_json::json!({ "leads": leads })))
}

/// DELETE /v1/admin/leads/whatsapp/{id}
pub async fn delete_whatsapp_lead(
    State(state): State<AppState>,
    Path(lead_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.metadata.delete_whatsapp_lead(lead_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Carousel
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SlideBody {
    pub title: String,
    #[serde(default)]
    pub title_ar: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    #[serde(default)]
    pub position: i64,
    #[serde(default = "default_slide_active")]
    pub is_active: bool,
}

fn default_slide_active() -> bool {
    true
}

/// GET /v1/admin/carousel - All slides, including disabled ones.
pub async fn list_admin_slides(
    State(state): State<AppState>,
) -> ApiResult<Json<serde_json::Value>> {
    let slides = state.metadata.list_slides(false).await?;
    let slides: Vec<SlideResponse> = slides.into_iter().map(SlideResponse::from).collect();
    Ok(Json(serde_json::json!({ "slides": slides })))
}

/// POST /v1/admin/carousel - Create a slide.
pub async fn create_slide(
    State(state): State<AppState>,
    Json(body): Json<SlideBody>,
) -> ApiResult<(StatusCode, Json<SlideResponse>)> {
    require_field(&body.title, "title")?;
    require_field(&body.image_url, "image_url")?;

    let now = OffsetDateTime::now_utc();
    let row = HeroSlideRow {
        slide_id: Uuid::new_v4(),
        title: body.title.trim().to_string(),
        title_ar: body.title_ar.trim().to_string(),
        subtitle: body.subtitle,
        image_url: body.image_url,
        link_url: body.link_url,
        position: body.position,
        is_active: body.is_active,
        created_at: now,
        updated_at: now,
    };
    state.metadata.create_slide(&row).await?;
    Ok((StatusCode::CREATED, Json(SlideResponse::from(row))))
}

/// PUT /v1/admin/carousel/{id} - Update a slide.
pub async fn update_slide(
    State(state): State<AppState>,
    Path(slide_id): Path<Uuid>,
    Json(body): Json<SlideBody>,
) -> ApiResult<Json<SlideResponse>> {
    let existing = state
        .metadata
        .get_slide(slide_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("slide not found".to_string()))?;

    let row = HeroSlideRow {
        slide_id,
        title: body.title.trim().to_string(),
        title_ar: body.title_ar.trim().to_string(),
        subtitle: body.subtitle,
        image_url: body.image_url,
        link_url: body.link_url,
        position: body.position,
        is_active: body.is_active,
        created_at: existing.created_at,
        updated_at: OffsetDateTime::now_utc(),
    };
    state.metadata.update_slide(&row).await?;
    Ok(Json(SlideResponse::from(row)))
}

/// DELETE /v1/admin/carousel/{id} - Delete a slide.
pub async fn delete_slide(
    State(state): State<AppState>,
    Path(slide_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.metadata.delete_slide(slide_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Settings
// =============================================================================

/// GET /v1/admin/settings - All settings as a string map.
pub async fn get_settings(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let settings = state.metadata.all_settings().await?;
    let map: BTreeMap<String, String> =
        settings.into_iter().map(|s| (s.key, s.value)).collect();
    Ok(Json(serde_json::json!({ "settings": map })))
}

/// PUT /v1/admin/settings - Upsert a batch of settings.
pub async fn put_settings(
    State(state): State<AppState>,
    Json(body): Json<BTreeMap<String, String>>,
) -> ApiResult<StatusCode> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("no settings provided".to_string()));
    }
    for key in body.keys() {
        require_field(key, "setting key")?;
    }

    let entries: Vec<(String, String)> = body.into_iter().collect();
    state.metadata.set_settings(&entries).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Dashboard metrics
// =============================================================================

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub orders_count: u64,
    pub revenue_total: f64,
    pub pending_count: u64,
    pub delivered_count: u64,
    pub active_products: u64,
    pub total_products: u64,
    pub contact_messages: u64,
    pub career_applications: u64,
    pub whatsapp_leads: u64,
    pub rewrite_cache_entries: usize,
}

/// GET /v1/admin/metrics - Back-office dashboard summary.
pub async fn get_dashboard(State(state): State<AppState>) -> ApiResult<Json<DashboardResponse>> {
    let sales = state.metadata.sales_summary().await?;
    let leads = state.metadata.lead_counts().await?;
    let active_products = state.metadata.count_products(Some("active")).await?;
    let total_products = state.metadata.count_products(None).await?;

    Ok(Json(DashboardResponse {
        orders_count: sales.orders_count,
        revenue_total: sales.revenue_total,
        pending_count: sales.pending_count,
        delivered_count: sales.delivered_count,
        active_products,
        total_products,
        contact_messages: leads.contact_messages,
        career_applications: leads.career_applications,
        whatsapp_leads: leads.whatsapp_leads,
        rewrite_cache_entries: state.rewrite.cache().len(),
    }))
}
