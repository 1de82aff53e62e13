//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Public base URL used to build image links (e.g., "https://shop.example.com").
    /// When unset, image URLs are relative to the API host.
    pub public_base_url: Option<String>,
    /// Enable the /metrics endpoint for Prometheus scraping (default: true).
    /// The endpoint is unauthenticated; restrict it at the network level.
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
    /// Maximum accepted image upload size in bytes.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_metrics_enabled() -> bool {
    true
}

fn default_max_image_bytes() -> usize {
    5 * 1024 * 1024 // 5 MiB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            public_base_url: None,
            metrics_enabled: default_metrics_enabled(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

/// Storefront behavior configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Fallback shipping cost when the `shipping_cost` admin setting is unset.
    #[serde(default = "default_shipping_cost")]
    pub default_shipping_cost: f64,
    /// Fallback currency code when the `currency` admin setting is unset.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_shipping_cost() -> f64 {
    50.0
}

fn default_currency() -> String {
    crate::DEFAULT_CURRENCY.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_shipping_cost: default_shipping_cost(),
            currency: default_currency(),
        }
    }
}

/// Admin access configuration.
///
/// The back office is gated by a single PIN. Only its SHA-256 hash is held in
/// configuration; the raw PIN never touches disk on the server side.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Pre-computed hash of the admin PIN (SHA-256 hex, 64 characters).
    /// Generate with: `echo -n "your-pin" | sha256sum`
    pub pin_hash: String,
}

impl AdminConfig {
    /// Create a test configuration with a dummy PIN hash.
    ///
    /// **For testing only.** The hash corresponds to the PIN "test-admin-pin".
    pub fn for_testing() -> Self {
        Self {
            // SHA256 of "test-admin-pin"
            pin_hash: "2e5ea3adb841662df186d53891d7cd0b4b857122d191cc9deb9b22ec5276a69f"
                .to_string(),
        }
    }

    /// Validate admin configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.pin_hash.len() != 64 || !self.pin_hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err("admin.pin_hash must be a 64-character SHA-256 hex digest".to_string());
        }
        Ok(())
    }
}

/// Object storage configuration for product images.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Local filesystem storage.
    Filesystem {
        /// Root directory for stored images.
        path: PathBuf,
    },
    /// S3-compatible storage.
    S3 {
        /// Bucket name.
        bucket: String,
        /// Optional endpoint URL (for MinIO, etc.).
        endpoint: Option<String>,
        /// Region (default taken from the environment when unset).
        region: Option<String>,
        /// Key prefix inside the bucket.
        prefix: Option<String>,
        /// Static credentials; both or neither must be set.
        access_key_id: Option<String>,
        secret_access_key: Option<String>,
        /// Use path-style addressing (required by MinIO).
        #[serde(default)]
        force_path_style: bool,
    },
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::Filesystem {
            path: PathBuf::from("./data/images"),
        }
    }
}

impl StorageConfig {
    /// Validate storage configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            StorageConfig::Filesystem { .. } => Ok(()),
            StorageConfig::S3 {
                bucket,
                access_key_id,
                secret_access_key,
                ..
            } => {
                if bucket.is_empty() {
                    return Err("storage.bucket must not be empty".to_string());
                }
                if access_key_id.is_some() != secret_access_key.is_some() {
                    return Err(
                        "storage credentials require both access_key_id and secret_access_key"
                            .to_string(),
                    );
                }
                Ok(())
            }
        }
    }
}

/// Metadata store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MetadataConfig {
    /// SQLite database (development and single-instance deployments).
    Sqlite {
        /// Database file path.
        path: PathBuf,
    },
    /// PostgreSQL database.
    Postgres {
        /// Connection URL. Takes precedence over individual fields.
        url: Option<String>,
        /// Database host.
        host: Option<String>,
        /// Database port (default: 5432).
        #[serde(default = "default_pg_port")]
        port: u16,
        /// Database username.
        username: Option<String>,
        /// Database password.
        /// Prefer the ATELIER_METADATA__PASSWORD env var over storing it here.
        password: Option<String>,
        /// Database name.
        database: Option<String>,
        /// Maximum connections in the pool.
        #[serde(default = "default_max_connections")]
        max_connections: u32,
        /// Statement timeout in milliseconds; PostgreSQL cancels queries that
        /// exceed it.
        #[serde(default = "default_statement_timeout_ms")]
        statement_timeout_ms: Option<u64>,
    },
}

fn default_pg_port() -> u16 {
    5432
}

fn default_max_connections() -> u32 {
    10
}

fn default_statement_timeout_ms() -> Option<u64> {
    Some(30_000)
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: PathBuf::from("./data/atelier.db"),
        }
    }
}

impl MetadataConfig {
    /// Validate metadata configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            MetadataConfig::Sqlite { .. } => Ok(()),
            MetadataConfig::Postgres {
                url,
                host,
                database,
                ..
            } => match (url.as_ref(), host.as_ref(), database.as_ref()) {
                (Some(_), _, _) => Ok(()),
                (None, Some(_), Some(_)) => Ok(()),
                _ => Err(
                    "postgres config requires either 'url' or 'host' + 'database'".to_string(),
                ),
            },
        }
    }
}

/// Text-rewrite proxy configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RewriteConfig {
    /// API key for the primary (Gemini-style) provider. Unset disables it.
    pub google_api_key: Option<String>,
    /// API key for the secondary (OpenRouter-style) provider. Unset disables it.
    pub openrouter_api_key: Option<String>,
    /// Primary provider endpoint. Overridable for tests.
    #[serde(default = "default_google_endpoint")]
    pub google_endpoint: String,
    /// Secondary provider endpoint. Overridable for tests.
    #[serde(default = "default_openrouter_endpoint")]
    pub openrouter_endpoint: String,
    /// Model requested from the secondary provider.
    #[serde(default = "default_openrouter_model")]
    pub openrouter_model: String,
    /// Primary provider timeout in seconds.
    #[serde(default = "default_primary_timeout_secs")]
    pub primary_timeout_secs: u64,
    /// Secondary provider timeout in seconds.
    #[serde(default = "default_secondary_timeout_secs")]
    pub secondary_timeout_secs: u64,
    /// Cache entry time-to-live in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Maximum cached entries; inserts beyond the cap are dropped.
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,
    /// Interval between background sweeps of expired entries, in seconds.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_google_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-exp:generateContent"
        .to_string()
}

fn default_openrouter_endpoint() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

fn default_openrouter_model() -> String {
    "google/gemini-2.0-flash-exp:free".to_string()
}

fn default_primary_timeout_secs() -> u64 {
    8
}

fn default_secondary_timeout_secs() -> u64 {
    10
}

fn default_cache_ttl_secs() -> u64 {
    86400 // 24 hours
}

fn default_cache_max_entries() -> usize {
    10_000
}

fn default_sweep_interval_secs() -> u64 {
    3600
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            google_api_key: None,
            openrouter_api_key: None,
            google_endpoint: default_google_endpoint(),
            openrouter_endpoint: default_openrouter_endpoint(),
            openrouter_model: default_openrouter_model(),
            primary_timeout_secs: default_primary_timeout_secs(),
            secondary_timeout_secs: default_secondary_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_max_entries: default_cache_max_entries(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl RewriteConfig {
    /// Cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Sweep interval as a Duration. Zero is coerced to one second so
    /// `tokio::time::interval` never panics.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }

    /// Validate rewrite configuration, returning non-fatal warnings.
    pub fn validate(&self) -> Result<Vec<String>, String> {
        if self.cache_max_entries == 0 {
            return Err("rewrite.cache_max_entries must be at least 1".to_string());
        }
        let mut warnings = Vec::new();
        if self.google_api_key.is_none() && self.openrouter_api_key.is_none() {
            warnings.push(
                "no rewrite provider keys configured; all rewrites will use canned mock output"
                    .to_string(),
            );
        }
        if self.primary_timeout_secs == 0 || self.secondary_timeout_secs == 0 {
            return Err("rewrite provider timeouts must be non-zero".to_string());
        }
        Ok(warnings)
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storefront behavior configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Image storage backend configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Metadata store configuration.
    #[serde(default)]
    pub metadata: MetadataConfig,
    /// Admin PIN configuration (required).
    pub admin: AdminConfig,
    /// Text-rewrite proxy configuration.
    #[serde(default)]
    pub rewrite: RewriteConfig,
}

impl AppConfig {
    /// Create a test configuration with sensible defaults.
    ///
    /// **For testing only.** Filesystem storage, SQLite metadata, a dummy
    /// admin PIN, and no provider keys (every rewrite falls back to mocks).
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig::default(),
            store: StoreConfig::default(),
            storage: StorageConfig::default(),
            metadata: MetadataConfig::default(),
            admin: AdminConfig::for_testing(),
            rewrite: RewriteConfig::default(),
        }
    }
}
