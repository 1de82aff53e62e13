//! Checkout and public order tracking.

use crate::error::{ApiError, ApiResult};
use crate::handlers::common::{OrderResponse, require_field};
use crate::metrics;
use crate::state::AppState;
use atelier_core::{OrderStatus, generate_order_number};
use atelier_metadata::MetadataError;
use atelier_metadata::models::{OrderItemRow, OrderRow};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// Attempts at a unique order number before giving up. Collisions on a
/// 32^6 space are rare; repeated collision means something is wrong.
const ORDER_NUMBER_ATTEMPTS: usize = 5;

#[derive(Debug, Deserialize)]
pub struct CheckoutItem {
    pub product_id: Uuid,
    pub variant_id: Option<Uuid>,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub governorate: String,
    pub city: String,
    pub address_line: String,
    pub items: Vec<CheckoutItem>,
}

/// POST /v1/orders - Place a cash-on-delivery order.
///
/// Prices are resolved server-side from the referenced product or variant;
/// the client never supplies amounts. Stock decrements, the sales-count
/// bump, and the order insert happen in one transaction, so a failed line
/// item leaves nothing applied.
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> ApiResult<(StatusCode, Json<OrderResponse>)> {
    require_field(&request.customer_name, "customer_name")?;
    require_field(&request.customer_phone, "customer_phone")?;
    require_field(&request.governorate, "governorate")?;
    require_field(&request.city, "city")?;
    require_field(&request.address_line, "address_line")?;

    if request.items.is_empty() {
        return Err(ApiError::BadRequest("order must have at least one item".to_string()));
    }

    let order_id = Uuid::new_v4();
    let now = OffsetDateTime::now_utc();
    let mut items = Vec::with_capacity(request.items.len());
    let mut subtotal = 0.0_f64;

    for item in &request.items {
        if item.quantity <= 0 {
            return Err(ApiError::BadRequest("item quantity must be positive".to_string()));
        }

        let product = state
            .metadata
            .get_product(item.product_id)
            .await?
            .filter(|p| p.status == "active")
            .ok_or_else(|| {
                ApiError::BadRequest(format!("product {} is not available", item.product_id))
            })?;

        let (title, unit_price) = match item.variant_id {
            Some(variant_id) => {
                let variant = state
                    .metadata
                    .get_variant(variant_id)
                    .await?
                    .filter(|v| v.product_id == product.product_id)
                    .ok_or_else(|| {
                        ApiError::BadRequest(format!(
                            "variant {} does not belong to product {}",
                            variant_id, product.product_id
                        ))
                    })?;
                (format!("{} ({})", product.title, variant.name), variant.price)
            }
            None => (product.title.clone(), product.price),
        };

        let line_total = unit_price * item.quantity as f64;
        subtotal += line_total;

        items.push(OrderItemRow {
            order_item_id: Uuid::new_v4(),
            order_id,
            product_id: item.product_id,
            variant_id: item.variant_id,
            title,
            unit_price,
            quantity: item.quantity,
            line_total,
        });
    }

    let shipping_cost = resolve_shipping_cost(&state).await?;
    let total = subtotal + shipping_cost;

    // The order number is unique by constraint; regenerate on collision.
    let mut attempts = 0;
    let order = loop {
        let order = OrderRow {
            order_id,
            order_number: generate_order_number(),
            customer_name: request.customer_name.trim().to_string(),
            customer_phone: request.customer_phone.trim().to_string(),
            customer_email: request.customer_email.clone(),
            governorate: request.governorate.trim().to_string(),
            city: request.city.trim().to_string(),
            address_line: request.address_line.trim().to_string(),
            subtotal,
            shipping_cost,
            total,
            status: OrderStatus::Pending.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };

        match state.metadata.create_order(&order, &items).await {
            Ok(()) => break order,
            Err(MetadataError::AlreadyExists(_)) if attempts < ORDER_NUMBER_ATTEMPTS => {
                attempts += 1;
                tracing::debug!(attempts, "Order number collision, regenerating");
            }
            Err(e) => return Err(e.into()),
        }
    };

    metrics::ORDERS_CREATED.inc();
    tracing::info!(
        order_number = %order.order_number,
        total = order.total,
        items = items.len(),
        "Order placed"
    );

    Ok((
        StatusCode::CREATED,
        Json(OrderResponse::from_parts(order, items)),
    ))
}

/// GET /v1/orders/{order_number} - Public order tracking.
pub async fn track_order(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> ApiResult<Json<OrderResponse>> {
    let order = state
        .metadata
        .get_order_by_number(&order_number)
        .await?
        .ok_or_else(|| ApiError::NotFound("order not found".to_string()))?;

    let items = state.metadata.list_order_items(order.order_id).await?;
    Ok(Json(OrderResponse::from_parts(order, items)))
}

/// Shipping cost from the admin settings, falling back to configuration.
pub async fn resolve_shipping_cost(state: &AppState) -> ApiResult<f64> {
    let configured = state.metadata.get_setting("shipping_cost").await?;
    Ok(configured
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(state.config.store.default_shipping_cost))
}
