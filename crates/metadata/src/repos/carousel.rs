//! Hero carousel repository trait.

use crate::error::MetadataResult;
use crate::models::HeroSlideRow;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository for homepage hero slides.
#[async_trait]
pub trait CarouselRepo: Send + Sync {
    /// Insert a new slide.
    async fn create_slide(&self, slide: &HeroSlideRow) -> MetadataResult<()>;

    /// Get a slide by ID.
    async fn get_slide(&self, slide_id: Uuid) -> MetadataResult<Option<HeroSlideRow>>;

    /// List slides ordered by position. `active_only` hides disabled slides
    /// (the storefront view).
    async fn list_slides(&self, active_only: bool) -> MetadataResult<Vec<HeroSlideRow>>;

    /// Update an existing slide (full-row update keyed by ID).
    async fn update_slide(&self, slide: &HeroSlideRow) -> MetadataResult<()>;

    /// Delete a slide by ID.
    async fn delete_slide(&self, slide_id: Uuid) -> MetadataResult<()>;
}
