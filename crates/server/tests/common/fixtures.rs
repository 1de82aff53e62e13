//! Seed data helpers for integration tests.

use atelier_metadata::MetadataStore;
use atelier_metadata::models::{CategoryRow, HeroSlideRow, ProductRow, VariantRow};
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

#[allow(dead_code)]
pub async fn seed_category(metadata: &Arc<dyn MetadataStore>, slug: &str) -> CategoryRow {
    let now = OffsetDateTime::now_utc();
    let row = CategoryRow {
        category_id: Uuid::new_v4(),
        slug: slug.to_string(),
        name: slug.to_string(),
        name_ar: format!("{slug}-ar"),
        position: 0,
        created_at: now,
        updated_at: now,
    };
    metadata
        .upsert_category(&row)
        .await
        .expect("Failed to seed category");
    row
}

/// Insert an active product with the given stock.
#[allow(dead_code)]
pub async fn seed_product(
    metadata: &Arc<dyn MetadataStore>,
    sku: &str,
    price: f64,
    stock: i64,
) -> ProductRow {
    seed_product_with_status(metadata, sku, price, stock, "active").await
}

#[allow(dead_code)]
pub async fn seed_product_with_status(
    metadata: &Arc<dyn MetadataStore>,
    sku: &str,
    price: f64,
    stock: i64,
    status: &str,
) -> ProductRow {
    let now = OffsetDateTime::now_utc();
    let row = ProductRow {
        product_id: Uuid::new_v4(),
        title: format!("Product {sku}"),
        title_ar: format!("منتج {sku}"),
        description: "A lovely product".to_string(),
        description_ar: "منتج جميل".to_string(),
        sku: sku.to_string(),
        category_slug: "skincare".to_string(),
        price,
        compare_at_price: None,
        stock,
        status: status.to_string(),
        images_json: "[]".to_string(),
        benefits_json: "[]".to_string(),
        size_guide: None,
        sales_count: 0,
        created_at: now,
        updated_at: now,
    };
    metadata
        .create_product(&row)
        .await
        .expect("Failed to seed product");
    row
}

#[allow(dead_code)]
pub async fn seed_variant(
    metadata: &Arc<dyn MetadataStore>,
    product: &ProductRow,
    size: Option<&str>,
    color: Option<&str>,
    stock: i64,
) -> VariantRow {
    let now = OffsetDateTime::now_utc();
    let row = VariantRow {
        variant_id: Uuid::new_v4(),
        product_id: product.product_id,
        size: size.map(str::to_string),
        color: color.map(str::to_string),
        name: format!("{} {}", size.unwrap_or(""), color.unwrap_or(""))
            .trim()
            .to_string(),
        sku: format!("{}-{}", product.sku, Uuid::new_v4().simple()),
        price: product.price,
        stock,
        created_at: now,
        updated_at: now,
    };
    metadata
        .create_variant(&row)
        .await
        .expect("Failed to seed variant");
    row
}

#[allow(dead_code)]
pub async fn seed_slide(metadata: &Arc<dyn MetadataStore>, is_active: bool) -> HeroSlideRow {
    let now = OffsetDateTime::now_utc();
    let row = HeroSlideRow {
        slide_id: Uuid::new_v4(),
        title: "Summer drop".to_string(),
        title_ar: "تشكيلة الصيف".to_string(),
        subtitle: None,
        image_url: "/v1/images/hero/summer.webp".to_string(),
        link_url: None,
        position: 0,
        is_active,
        created_at: now,
        updated_at: now,
    };
    metadata
        .create_slide(&row)
        .await
        .expect("Failed to seed slide");
    row
}
