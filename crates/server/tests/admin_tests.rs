//! Integration tests for the PIN-gated admin API.

mod common;

use axum::http::StatusCode;
use common::fixtures::{seed_product, seed_product_with_status};
use common::server::{TEST_ADMIN_PIN, TestServer, json_request};
use serde_json::json;

fn product_body(sku: &str) -> serde_json::Value {
    json!({
        "title": "Argan Elixir",
        "title_ar": "إكسير الأرغان",
        "sku": sku,
        "category_slug": "skincare",
        "price": 320.0,
        "stock": 12,
        "status": "active",
        "images": [],
        "benefits": ["ترطيب عميق"]
    })
}

#[tokio::test]
async fn admin_routes_require_the_pin() {
    let server = TestServer::new().await;

    let (status, body) =
        json_request(&server.router, "GET", "/v1/admin/products", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");

    let (status, _) = json_request(
        &server.router,
        "GET",
        "/v1/admin/products",
        None,
        Some("wrong-pin"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn product_crud_roundtrip() {
    let server = TestServer::new().await;

    let (status, created) = json_request(
        &server.router,
        "POST",
        "/v1/admin/products",
        Some(product_body("AT-ELX")),
        Some(TEST_ADMIN_PIN),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let product_id = created["product_id"].as_str().unwrap().to_string();
    assert_eq!(created["benefits"][0], "ترطيب عميق");

    let uri = format!("/v1/admin/products/{product_id}");
    let (status, fetched) =
        json_request(&server.router, "GET", &uri, None, Some(TEST_ADMIN_PIN)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["sku"], "AT-ELX");

    let mut update = product_body("AT-ELX");
    update["price"] = json!(299.0);
    update["status"] = json!("archived");
    let (status, updated) =
        json_request(&server.router, "PUT", &uri, Some(update), Some(TEST_ADMIN_PIN)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 299.0);
    assert_eq!(updated["status"], "archived");

    let (status, _) =
        json_request(&server.router, "DELETE", &uri, None, Some(TEST_ADMIN_PIN)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = json_request(&server.router, "GET", &uri, None, Some(TEST_ADMIN_PIN)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_sku_is_a_conflict() {
    let server = TestServer::new().await;

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let (status, _) = json_request(
            &server.router,
            "POST",
            "/v1/admin/products",
            Some(product_body("AT-DUP")),
            Some(TEST_ADMIN_PIN),
        )
        .await;
        assert_eq!(status, expected);
    }
}

#[tokio::test]
async fn admin_listing_includes_drafts() {
    let server = TestServer::new().await;
    let metadata = server.metadata();
    seed_product_with_status(&metadata, "AT-1", 100.0, 5, "active").await;
    seed_product_with_status(&metadata, "AT-2", 100.0, 5, "draft").await;

    let (status, body) = json_request(
        &server.router,
        "GET",
        "/v1/admin/products",
        None,
        Some(TEST_ADMIN_PIN),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 2);

    let (_, drafts_only) = json_request(
        &server.router,
        "GET",
        "/v1/admin/products?status=draft",
        None,
        Some(TEST_ADMIN_PIN),
    )
    .await;
    assert_eq!(drafts_only["products"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_product_status_is_rejected() {
    let server = TestServer::new().await;

    let mut body = product_body("AT-BAD");
    body["status"] = json!("published");
    let (status, _) = json_request(
        &server.router,
        "POST",
        "/v1/admin/products",
        Some(body),
        Some(TEST_ADMIN_PIN),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn settings_roundtrip() {
    let server = TestServer::new().await;

    let (status, _) = json_request(
        &server.router,
        "PUT",
        "/v1/admin/settings",
        Some(json!({ "store_name": "Atelier", "shipping_cost": "60" })),
        Some(TEST_ADMIN_PIN),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = json_request(
        &server.router,
        "GET",
        "/v1/admin/settings",
        None,
        Some(TEST_ADMIN_PIN),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["settings"]["store_name"], "Atelier");
    assert_eq!(body["settings"]["shipping_cost"], "60");
}

#[tokio::test]
async fn carousel_crud_roundtrip() {
    let server = TestServer::new().await;

    let (status, created) = json_request(
        &server.router,
        "POST",
        "/v1/admin/carousel",
        Some(json!({
            "title": "New season",
            "title_ar": "موسم جديد",
            "image_url": "/v1/images/hero/a.webp",
            "position": 1
        })),
        Some(TEST_ADMIN_PIN),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let slide_id = created["slide_id"].as_str().unwrap().to_string();

    let uri = format!("/v1/admin/carousel/{slide_id}");
    let (status, updated) = json_request(
        &server.router,
        "PUT",
        &uri,
        Some(json!({
            "title": "New season",
            "title_ar": "موسم جديد",
            "image_url": "/v1/images/hero/a.webp",
            "position": 1,
            "is_active": false
        })),
        Some(TEST_ADMIN_PIN),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["is_active"], false);

    // Hidden from the storefront, still visible to the admin.
    let (_, public) = json_request(&server.router, "GET", "/v1/carousel", None, None).await;
    assert!(public["slides"].as_array().unwrap().is_empty());
    let (_, admin) = json_request(
        &server.router,
        "GET",
        "/v1/admin/carousel",
        None,
        Some(TEST_ADMIN_PIN),
    )
    .await;
    assert_eq!(admin["slides"].as_array().unwrap().len(), 1);

    let (status, _) =
        json_request(&server.router, "DELETE", &uri, None, Some(TEST_ADMIN_PIN)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn dashboard_aggregates_store_activity() {
    let server = TestServer::new().await;
    let metadata = server.metadata();
    let product = seed_product(&metadata, "AT-OIL", 100.0, 10).await;

    let (_, _) = json_request(
        &server.router,
        "POST",
        "/v1/orders",
        Some(json!({
            "customer_name": "Salma",
            "customer_phone": "+2010",
            "governorate": "Cairo",
            "city": "Maadi",
            "address_line": "1 Road 9",
            "items": [{ "product_id": product.product_id.to_string(), "quantity": 1 }]
        })),
        None,
    )
    .await;

    let (status, body) = json_request(
        &server.router,
        "GET",
        "/v1/admin/metrics",
        None,
        Some(TEST_ADMIN_PIN),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orders_count"], 1);
    assert_eq!(body["pending_count"], 1);
    assert_eq!(body["active_products"], 1);
    assert_eq!(
        body["revenue_total"].as_f64().unwrap(),
        100.0 + server.state.config.store.default_shipping_cost
    );
}

#[tokio::test]
async fn lead_inboxes_support_delete() {
    let server = TestServer::new().await;

    json_request(
        &server.router,
        "POST",
        "/v1/leads/careers",
        Some(json!({
            "name": "Omar",
            "email": "omar@example.com",
            "phone": "+2011",
            "position": "Store manager"
        })),
        None,
    )
    .await;

    let (_, inbox) = json_request(
        &server.router,
        "GET",
        "/v1/admin/leads/careers",
        None,
        Some(TEST_ADMIN_PIN),
    )
    .await;
    let applications = inbox["applications"].as_array().unwrap();
    assert_eq!(applications.len(), 1);
    let id = applications[0]["application_id"].as_str().unwrap();

    let (status, _) = json_request(
        &server.router,
        "DELETE",
        &format!("/v1/admin/leads/careers/{id}"),
        None,
        Some(TEST_ADMIN_PIN),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, inbox) = json_request(
        &server.router,
        "GET",
        "/v1/admin/leads/careers",
        None,
        Some(TEST_ADMIN_PIN),
    )
    .await;
    assert!(inbox["applications"].as_array().unwrap().is_empty());
}
