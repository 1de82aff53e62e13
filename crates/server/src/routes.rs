//! Route configuration.

use crate::auth::admin_auth_middleware;
use crate::handlers;
use crate::metrics::metrics_handler;
use crate::state::AppState;
use axum::Router;
use axum::middleware;
use axum::routing::{delete, get, post, put};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        // Health check (intentionally unauthenticated for probes)
        .route("/v1/health", get(handlers::health_check))
        // Storefront catalog
        .route("/v1/products", get(handlers::list_store_products))
        .route("/v1/products/{product_id}", get(handlers::get_store_product))
        .route("/v1/categories", get(handlers::list_categories))
        .route("/v1/carousel", get(handlers::list_carousel))
        // Checkout and order tracking
        .route("/v1/orders", post(handlers::create_order))
        .route("/v1/orders/{order_number}", get(handlers::track_order))
        // Lead intake
        .route("/v1/leads/contact", post(handlers::create_contact_message))
        .route("/v1/leads/careers", post(handlers::create_career_application))
        .route("/v1/leads/whatsapp", post(handlers::create_whatsapp_lead))
        // Image serving
        .route("/v1/images/{*key}", get(handlers::get_image));

    let admin_routes = Router::new()
        // Products
        .route(
            "/v1/admin/products",
            post(handlers::create_product).get(handlers::list_admin_products),
        )
        .route(
            "/v1/admin/products/{product_id}",
            get(handlers::get_admin_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        // Variants
        .route(
            "/v1/admin/products/{product_id}/variants",
            get(handlers::list_variants).post(handlers::create_variant),
        )
        .route(
            "/v1/admin/products/{product_id}/variants/generate",
            post(handlers::generate_variants),
        )
        .route(
            "/v1/admin/variants/{variant_id}",
            put(handlers::update_variant).delete(handlers::delete_variant),
        )
        // Categories
        .route("/v1/admin/categories", put(handlers::upsert_category))
        .route(
            "/v1/admin/categories/{category_id}",
            delete(handlers::delete_category),
        )
        // Images
        .route("/v1/admin/images", post(handlers::upload_image))
        .route("/v1/admin/images/{*key}", delete(handlers::delete_image))
        // Orders and customers
        .route("/v1/admin/orders", get(handlers::list_orders))
        .route("/v1/admin/orders/{order_id}", get(handlers::get_order))
        .route(
            "/v1/admin/orders/{order_id}/status",
            post(handlers::set_order_status),
        )
        .route("/v1/admin/customers", get(handlers::list_customers))
        // Leads
        .route("/v1/admin/leads/contact", get(handlers::list_contact_messages))
        .route(
            "/v1/admin/leads/contact/{message_id}",
            delete(handlers::delete_contact_message),
        )
        .route("/v1/admin/leads/careers", get(handlers::list_career_applications))
        .route(
            "/v1/admin/leads/careers/{application_id}",
            delete(handlers::delete_career_application),
        )
        .route("/v1/admin/leads/whatsapp", get(handlers::list_whatsapp_leads))
        .route(
            "/v1/admin/leads/whatsapp/{lead_id}",
            delete(handlers::delete_whatsapp_lead),
        )
        // Carousel
        .route(
            "/v1/admin/carousel",
            get(handlers::list_admin_slides).post(handlers::create_slide),
        )
        .route(
            "/v1/admin/carousel/{slide_id}",
            put(handlers::update_slide).delete(handlers::delete_slide),
        )
        // Settings and dashboard
        .route(
            "/v1/admin/settings",
            get(handlers::get_settings).put(handlers::put_settings),
        )
        .route("/v1/admin/metrics", get(handlers::get_dashboard))
        // AI copy tools
        .route("/v1/admin/rewrite", post(handlers::rewrite_text))
        .route(
            "/v1/admin/generate-benefits",
            post(handlers::generate_benefits),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ));

    let mut router = Router::new().merge(public_routes).merge(admin_routes);

    // Conditionally add the Prometheus endpoint. When enabled it must be
    // network-restricted to authorized scraper IPs; see crate::metrics.
    if state.config.server.metrics_enabled {
        router = router.route("/metrics", get(metrics_handler));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
