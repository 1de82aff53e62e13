//! Prometheus metrics for the Atelier server.
//!
//! # Security Note
//!
//! The `/metrics` endpoint is unauthenticated to allow Prometheus scraping.
//! It exposes only aggregate counters (orders, leads, cache activity), no
//! customer data, but it should still be network-restricted to authorized
//! scraper IPs at the infrastructure level. It can be disabled entirely
//! with `server.metrics_enabled = false`.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{self, Encoder, IntCounter, Registry, TextEncoder};
use std::sync::{LazyLock, Once};

/// Global Prometheus registry for all metrics.
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

pub static ORDERS_CREATED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "atelier_orders_created_total",
        "Total number of orders placed through checkout",
    )
    .expect("metric creation failed")
});

pub static ORDERS_CANCELLED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "atelier_orders_cancelled_total",
        "Total number of orders cancelled (stock restored)",
    )
    .expect("metric creation failed")
});

pub static VARIANTS_GENERATED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "atelier_variants_generated_total",
        "Total number of variant drafts persisted by the combination generator",
    )
    .expect("metric creation failed")
});

pub static LEADS_RECEIVED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "atelier_leads_received_total",
        "Total number of inbound leads (contact, careers, WhatsApp)",
    )
    .expect("metric creation failed")
});

pub static IMAGES_UPLOADED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "atelier_images_uploaded_total",
        "Total number of images stored through the admin API",
    )
    .expect("metric creation failed")
});

pub static REWRITE_REQUESTS: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "atelier_rewrite_requests_total",
        "Total number of rewrite and benefit-generation requests",
    )
    .expect("metric creation failed")
});

pub static REWRITE_CACHE_HITS: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "atelier_rewrite_cache_hits_total",
        "Total number of rewrite requests answered from the cache",
    )
    .expect("metric creation failed")
});

pub static REWRITE_MOCK_FALLBACKS: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "atelier_rewrite_mock_fallbacks_total",
        "Total number of rewrite requests answered with canned mock copy",
    )
    .expect("metric creation failed")
});

static REGISTER: Once = Once::new();

/// Register all metrics with the global registry.
///
/// Safe to call multiple times; registration happens once.
pub fn register_metrics() {
    REGISTER.call_once(|| {
        let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
            Box::new(ORDERS_CREATED.clone()),
            Box::new(ORDERS_CANCELLED.clone()),
            Box::new(VARIANTS_GENERATED.clone()),
            Box::new(LEADS_RECEIVED.clone()),
            Box::new(IMAGES_UPLOADED.clone()),
            Box::new(REWRITE_REQUESTS.clone()),
            Box::new(REWRITE_CACHE_HITS.clone()),
            Box::new(REWRITE_MOCK_FALLBACKS.clone()),
        ];
        for metric in metrics {
            if let Err(e) = REGISTRY.register(metric) {
                tracing::warn!(error = %e, "Failed to register metric");
            }
        }
    });
}

/// GET /metrics - Prometheus exposition endpoint.
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();

    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [("Content-Type", encoder.format_type().to_string())],
            buffer,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_idempotent() {
        register_metrics();
        register_metrics();
        assert_eq!(REGISTRY.gather().len(), 8);
    }
}
