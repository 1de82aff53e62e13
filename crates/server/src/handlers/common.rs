//! Shared handler helpers and response shapes.

use atelier_metadata::models::{
    CategoryRow, HeroSlideRow, OrderItemRow, OrderRow, ProductRow, VariantRow,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Parse a stored JSON string array, tolerating legacy/hand-edited rows.
pub fn parse_string_array(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// Common list pagination query.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 200)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Product as returned by the API. Image and benefit arrays are decoded
/// from their stored JSON form.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub product_id: Uuid,
    pub title: String,
    pub title_ar: String,
    pub description: String,
    pub description_ar: String,
    pub sku: String,
    pub category_slug: String,
    pub price: f64,
    pub compare_at_price: Option<f64>,
    pub stock: i64,
    pub status: String,
    pub images: Vec<String>,
    pub benefits: Vec<String>,
    pub size_guide: Option<String>,
    pub sales_count: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<ProductRow> for ProductResponse {
    fn from(row: ProductRow) -> Self {
        Self {
            product_id: row.product_id,
            title: row.title,
            title_ar: row.title_ar,
            description: row.description,
            description_ar: row.description_ar,
            sku: row.sku,
            category_slug: row.category_slug,
            price: row.price,
            compare_at_price: row.compare_at_price,
            stock: row.stock,
            status: row.status,
            images: parse_string_array(&row.images_json),
            benefits: parse_string_array(&row.benefits_json),
            size_guide: row.size_guide,
            sales_count: row.sales_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VariantResponse {
    pub variant_id: Uuid,
    pub product_id: Uuid,
    pub size: Option<String>,
    pub color: Option<String>,
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub stock: i64,
}

impl From<VariantRow> for VariantResponse {
    fn from(row: VariantRow) -> Self {
        Self {
            variant_id: row.variant_id,
            product_id: row.product_id,
            size: row.size,
            color: row.color,
            name: row.name,
            sku: row.sku,
            price: row.price,
            stock: row.stock,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub category_id: Uuid,
    pub slug: String,
    pub name: String,
    pub name_ar: String,
    pub position: i64,
}

impl From<CategoryRow> for CategoryResponse {
    fn from(row: CategoryRow) -> Self {
        Self {
            category_id: row.category_id,
            slug: row.slug,
            name: row.name,
            name_ar: row.name_ar,
            position: row.position,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    pub product_id: Uuid,
    pub variant_id: Option<Uuid>,
    pub title: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub line_total: f64,
}

impl From<OrderItemRow> for OrderItemResponse {
    fn from(row: OrderItemRow) -> Self {
        Self {
            product_id: row.product_id,
            variant_id: row.variant_id,
            title: row.title,
            unit_price: row.unit_price,
            quantity: row.quantity,
            line_total: row.line_total,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order_id: Uuid,
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub governorate: String,
    pub city: String,
    pub address_line: String,
    pub subtotal: f64,
    pub shipping_cost: f64,
    pub total: f64,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub items: Vec<OrderItemResponse>,
}

impl OrderResponse {
    pub fn from_parts(order: OrderRow, items: Vec<OrderItemRow>) -> Self {
        Self {
            order_id: order.order_id,
            order_number: order.order_number,
            customer_name: order.customer_name,
            customer_phone: order.customer_phone,
            customer_email: order.customer_email,
            governorate: order.governorate,
            city: order.city,
            address_line: order.address_line,
            subtotal: order.subtotal,
            shipping_cost: order.shipping_cost,
            total: order.total,
            status: order.status,
            created_at: order.created_at,
            items: items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SlideResponse {
    pub slide_id: Uuid,
    pub title: String,
    pub title_ar: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub position: i64,
    pub is_active: bool,
}

impl From<HeroSlideRow> for SlideResponse {
    fn from(row: HeroSlideRow) -> Self {
        Self {
            slide_id: row.slide_id,
            title: row.title,
            title_ar: row.title_ar,
            subtitle: row.subtitle,
            image_url: row.image_url,
            link_url: row.link_url,
            position: row.position,
            is_active: row.is_active,
        }
    }
}

/// Reject blank required string fields with a consistent message.
pub fn require_field(value: &str, name: &str) -> Result<(), crate::error::ApiError> {
    if value.trim().is_empty() {
        return Err(crate::error::ApiError::BadRequest(format!(
            "'{name}' must not be empty"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_json_arrays_decode_to_empty() {
        assert_eq!(parse_string_array("not json"), Vec::<String>::new());
        assert_eq!(parse_string_array(r#"["a","b"]"#), vec!["a", "b"]);
    }

    #[test]
    fn page_query_clamps_limits() {
        let query = PageQuery {
            limit: Some(10_000),
            offset: Some(-5),
        };
        assert_eq!(query.limit(), 200);
        assert_eq!(query.offset(), 0);
    }
}
