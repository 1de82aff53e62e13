//! Atelier server binary.

use anyhow::{Context, Result};
use atelier_core::config::AppConfig;
use atelier_rewrite::{RewriteEngine, spawn_sweep_task};
use atelier_server::{AppState, create_router};
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Atelier - storefront and back-office API server
#[derive(Parser, Debug)]
#[command(name = "atelierd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "ATELIER_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Atelier v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration (file is optional, env vars can provide/override everything)
    let config_path = std::path::Path::new(&args.config);
    let mut figment = Figment::new();
    let has_config_file = config_path.exists();

    if has_config_file {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    // ATELIER_CONFIG is just the file path, not configuration content
    let has_env_config =
        std::env::vars().any(|(key, _)| key.starts_with("ATELIER_") && key != "ATELIER_CONFIG");

    if !has_config_file && !has_env_config {
        anyhow::bail!(
            "No configuration provided.\n\n\
             Provide configuration via one of:\n  \
             1. Config file: atelierd --config /path/to/config.toml\n  \
             2. Environment variables: ATELIER_SERVER__BIND=0.0.0.0:8080 \
             ATELIER_ADMIN__PIN_HASH=YOUR_SHA256_HEX atelierd\n\n\
             See config/server.example.toml for example configuration.\n\
             Set ATELIER_CONFIG env var to specify a default config file path."
        );
    }

    if !has_config_file {
        tracing::info!("Using environment variables for configuration");
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("ATELIER_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    atelier_server::metrics::register_metrics();
    tracing::info!("Prometheus metrics registered");

    // Initialize storage backend and verify connectivity before accepting
    // requests, so misconfiguration fails at startup instead of on the
    // first image upload.
    let storage = atelier_storage::from_config(&config.storage)
        .await
        .context("failed to initialize storage")?;
    storage
        .health_check()
        .await
        .context("storage health check failed")?;
    tracing::info!(backend = storage.backend_name(), "Storage backend ready");

    let metadata = atelier_metadata::from_config(&config.metadata)
        .await
        .context("failed to initialize metadata store")?;
    tracing::info!("Metadata store initialized");

    let rewrite = Arc::new(
        RewriteEngine::from_config(&config.rewrite).context("failed to build rewrite engine")?,
    );

    let state = AppState::new(config.clone(), storage, metadata, rewrite);

    // Background sweep of expired rewrite-cache entries.
    spawn_sweep_task(state.rewrite.cache(), state.rewrite_sweep_interval());
    tracing::info!(
        interval_secs = state.rewrite_sweep_interval().as_secs(),
        "Rewrite cache sweep task spawned"
    );

    let app = create_router(state);

    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
