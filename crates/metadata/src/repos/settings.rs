//! Admin settings repository trait.

use crate::error::MetadataResult;
use crate::models::SettingRow;
use async_trait::async_trait;

/// Repository for the key-value admin settings table.
///
/// Known keys: `store_name`, `support_email`, `currency`, `shipping_cost`.
/// Unknown keys are stored as-is; the table is a plain string map.
#[async_trait]
pub trait SettingsRepo: Send + Sync {
    /// Get one setting value.
    async fn get_setting(&self, key: &str) -> MetadataResult<Option<String>>;

    /// List all settings ordered by key.
    async fn all_settings(&self) -> MetadataResult<Vec<SettingRow>>;

    /// Upsert a batch of settings atomically.
    async fn set_settings(&self, entries: &[(String, String)]) -> MetadataResult<()>;
}
