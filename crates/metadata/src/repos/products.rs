//! Product repository trait.

use crate::error::MetadataResult;
use crate::models::ProductRow;
use async_trait::async_trait;
use uuid::Uuid;

/// Listing filter for products.
///
/// `search` matches title, Arabic title, and SKU with a substring match.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub status: Option<String>,
    pub category_slug: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ProductFilter {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(50).clamp(1, 200)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Repository for products.
#[async_trait]
pub trait ProductRepo: Send + Sync {
    /// Insert a new product. Fails with `AlreadyExists` on a duplicate SKU.
    async fn create_product(&self, product: &ProductRow) -> MetadataResult<()>;

    /// Get a product by ID.
    async fn get_product(&self, product_id: Uuid) -> MetadataResult<Option<ProductRow>>;

    /// Get a product by SKU.
    async fn get_product_by_sku(&self, sku: &str) -> MetadataResult<Option<ProductRow>>;

    /// List products matching the filter, newest first.
    async fn list_products(&self, filter: &ProductFilter) -> MetadataResult<Vec<ProductRow>>;

    /// Update an existing product (full-row update keyed by ID).
    async fn update_product(&self, product: &ProductRow) -> MetadataResult<()>;

    /// Delete a product; its variants are removed by cascade.
    async fn delete_product(&self, product_id: Uuid) -> MetadataResult<()>;

    /// Count products, optionally restricted to one status.
    async fn count_products(&self, status: Option<&str>) -> MetadataResult<u64>;
}
