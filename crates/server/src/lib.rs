//! HTTP API server for the Atelier storefront and back office.
//!
//! This crate provides the HTTP surface:
//! - Public storefront: catalog, carousel, checkout, order tracking, leads
//! - Image upload and serving
//! - PIN-gated admin API: catalog management, orders, settings, dashboard
//! - AI copy tools: field rewrite and benefit generation

pub mod auth;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
