//! Product variant repository trait.

use crate::error::MetadataResult;
use crate::models::VariantRow;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository for product variants.
#[async_trait]
pub trait VariantRepo: Send + Sync {
    /// Insert a new variant.
    async fn create_variant(&self, variant: &VariantRow) -> MetadataResult<()>;

    /// Get a variant by ID.
    async fn get_variant(&self, variant_id: Uuid) -> MetadataResult<Option<VariantRow>>;

    /// List a product's variants in creation order.
    async fn list_variants(&self, product_id: Uuid) -> MetadataResult<Vec<VariantRow>>;

    /// Update an existing variant (full-row update keyed by ID).
    async fn update_variant(&self, variant: &VariantRow) -> MetadataResult<()>;

    /// Delete a variant by ID.
    async fn delete_variant(&self, variant_id: Uuid) -> MetadataResult<()>;
}
