//! Database models mapping to the metadata schema.

use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

// =============================================================================
// Catalog
// =============================================================================

/// Category record. `slug` is the stable identifier products reference.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub category_id: Uuid,
    pub slug: String,
    pub name: String,
    pub name_ar: String,
    pub position: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Product record. Bilingual text fields carry the Arabic copy alongside the
/// base copy; `images_json` and `benefits_json` hold JSON string arrays.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
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
    /// One of: draft, active, archived.
    pub status: String,
    pub images_json: String,
    pub benefits_json: String,
    pub size_guide: Option<String>,
    pub sales_count: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Product variant record. The (product_id, size, color) pair is unique within
/// a product's variant set; the combination generator never overwrites an
/// existing pair.
#[derive(Debug, Clone, FromRow)]
pub struct VariantRow {
    pub variant_id: Uuid,
    pub product_id: Uuid,
    pub size: Option<String>,
    pub color: Option<String>,
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub stock: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

// =============================================================================
// Orders
// =============================================================================

/// Order record. Totals are denormalized at creation time.
#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
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
    /// One of: pending, confirmed, shipped, delivered, cancelled.
    pub status: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Order line item. `title` and `unit_price` are snapshots taken at checkout
/// so later product edits do not rewrite order history.
#[derive(Debug, Clone, FromRow)]
pub struct OrderItemRow {
    pub order_item_id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub variant_id: Option<Uuid>,
    pub title: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub line_total: f64,
}

/// Aggregated customer view derived from order history.
#[derive(Debug, Clone, FromRow)]
pub struct CustomerSummaryRow {
    pub customer_phone: String,
    pub customer_name: String,
    pub orders_count: i64,
    pub total_spent: f64,
    pub last_order_at: OffsetDateTime,
}

// =============================================================================
// Leads
// =============================================================================

/// Contact-form message.
#[derive(Debug, Clone, FromRow)]
pub struct ContactMessageRow {
    pub message_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub message: String,
    pub created_at: OffsetDateTime,
}

/// Career application.
#[derive(Debug, Clone, FromRow)]
pub struct CareerApplicationRow {
    pub application_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub message: Option<String>,
    pub created_at: OffsetDateTime,
}

/// WhatsApp subscription lead.
#[derive(Debug, Clone, FromRow)]
pub struct WhatsappLeadRow {
    pub lead_id: Uuid,
    pub country_code: String,
    pub phone: String,
    pub created_at: OffsetDateTime,
}

// =============================================================================
// Settings and hero carousel
// =============================================================================

/// Key-value admin setting.
#[derive(Debug, Clone, FromRow)]
pub struct SettingRow {
    pub key: String,
    pub value: String,
    pub updated_at: OffsetDateTime,
}

/// Hero carousel slide.
#[derive(Debug, Clone, FromRow)]
pub struct HeroSlideRow {
    pub slide_id: Uuid,
    pub title: String,
    pub title_ar: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub position: i64,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
