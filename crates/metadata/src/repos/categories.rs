//! Category repository trait.

use crate::error::MetadataResult;
use crate::models::CategoryRow;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository for categories.
#[async_trait]
pub trait CategoryRepo: Send + Sync {
    /// Insert or update a category keyed by slug (names and position are
    /// refreshed on conflict; the original ID is kept).
    async fn upsert_category(&self, category: &CategoryRow) -> MetadataResult<()>;

    /// List all categories ordered by position, then slug.
    async fn list_categories(&self) -> MetadataResult<Vec<CategoryRow>>;

    /// Get a category by slug.
    async fn get_category_by_slug(&self, slug: &str) -> MetadataResult<Option<CategoryRow>>;

    /// Delete a category by ID. Products keep their slug reference.
    async fn delete_category(&self, category_id: Uuid) -> MetadataResult<()>;
}
