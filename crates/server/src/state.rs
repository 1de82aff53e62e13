//! Application state shared across handlers.

use atelier_core::config::AppConfig;
use atelier_metadata::MetadataStore;
use atelier_rewrite::RewriteEngine;
use atelier_storage::ObjectStore;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Object storage backend for product and carousel images.
    pub storage: Arc<dyn ObjectStore>,
    /// Metadata store.
    pub metadata: Arc<dyn MetadataStore>,
    /// Text-rewrite engine.
    pub rewrite: Arc<RewriteEngine>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// This performs configuration validation and logs warnings for
    /// degraded-but-legal settings. Panics if configuration is invalid.
    ///
    /// # Panics
    ///
    /// Panics if admin, storage, metadata, or rewrite configuration
    /// validation fails with an error.
    pub fn new(
        config: AppConfig,
        storage: Arc<dyn ObjectStore>,
        metadata: Arc<dyn MetadataStore>,
        rewrite: Arc<RewriteEngine>,
    ) -> Self {
        if let Err(error) = config.admin.validate() {
            panic!("Invalid admin configuration: {}", error);
        }
        if let Err(error) = config.storage.validate() {
            panic!("Invalid storage configuration: {}", error);
        }
        if let Err(error) = config.metadata.validate() {
            panic!("Invalid metadata configuration: {}", error);
        }
        match config.rewrite.validate() {
            Ok(warnings) => {
                for warning in warnings {
                    tracing::warn!("Configuration warning: {}", warning);
                }
            }
            Err(error) => {
                panic!("Invalid rewrite configuration: {}", error);
            }
        }

        Self {
            config: Arc::new(config),
            storage,
            metadata,
            rewrite,
        }
    }

    /// Interval for the rewrite-cache sweep task.
    pub fn rewrite_sweep_interval(&self) -> Duration {
        self.config.rewrite.sweep_interval()
    }

    /// Build the public URL for a stored image key.
    pub fn image_url(&self, key: &str) -> String {
        match &self.config.server.public_base_url {
            Some(base) => format!("{}/v1/images/{}", base.trim_end_matches('/'), key),
            None => format!("/v1/images/{}", key),
        }
    }
}
