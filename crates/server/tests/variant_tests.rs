//! Integration tests for variant management and combination generation.

mod common;

use axum::http::StatusCode;
use common::fixtures::{seed_product, seed_variant};
use common::server::{TEST_ADMIN_PIN, TestServer, json_request};
use serde_json::json;

#[tokio::test]
async fn generate_expands_the_full_cross_product() {
    let server = TestServer::new().await;
    let product = seed_product(&server.metadata(), "AT-DRE", 450.0, 100).await;

    let uri = format!(
        "/v1/admin/products/{}/variants/generate",
        product.product_id
    );
    let (status, body) = json_request(
        &server.router,
        "POST",
        &uri,
        Some(json!({ "sizes": ["S", "M", "L"], "colors": ["Black", "Ivory"] })),
        Some(TEST_ADMIN_PIN),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let created = body["created"].as_array().unwrap();
    assert_eq!(created.len(), 6);
    assert_eq!(body["skipped"], 0);
    for draft in created {
        assert_eq!(draft["price"], 450.0);
        assert_eq!(draft["stock"], 10);
        assert!(draft["sku"].as_str().unwrap().starts_with("AT-DRE-"));
    }

    let stored = server.metadata().list_variants(product.product_id).await.unwrap();
    assert_eq!(stored.len(), 6);
}

#[tokio::test]
async fn generate_is_idempotent() {
    let server = TestServer::new().await;
    let product = seed_product(&server.metadata(), "AT-DRE", 450.0, 100).await;
    let uri = format!(
        "/v1/admin/products/{}/variants/generate",
        product.product_id
    );
    let selection = json!({ "sizes": ["S", "M"], "colors": ["Black"] });

    let (_, first) = json_request(
        &server.router,
        "POST",
        &uri,
        Some(selection.clone()),
        Some(TEST_ADMIN_PIN),
    )
    .await;
    assert_eq!(first["created"].as_array().unwrap().len(), 2);

    let (status, second) = json_request(
        &server.router,
        "POST",
        &uri,
        Some(selection),
        Some(TEST_ADMIN_PIN),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(second["created"].as_array().unwrap().is_empty());
    assert_eq!(second["skipped"], 2);

    assert_eq!(
        server.metadata().list_variants(product.product_id).await.unwrap().len(),
        2
    );
}

#[tokio::test]
async fn generate_skips_pairs_created_by_hand() {
    let server = TestServer::new().await;
    let metadata = server.metadata();
    let product = seed_product(&metadata, "AT-DRE", 450.0, 100).await;
    seed_variant(&metadata, &product, Some("S"), Some("Black"), 3).await;

    let uri = format!(
        "/v1/admin/products/{}/variants/generate",
        product.product_id
    );
    let (_, body) = json_request(
        &server.router,
        "POST",
        &uri,
        Some(json!({ "sizes": ["S", "M"], "colors": ["Black"] })),
        Some(TEST_ADMIN_PIN),
    )
    .await;

    let created = body["created"].as_array().unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["size"], "M");
    assert_eq!(body["skipped"], 1);
}

#[tokio::test]
async fn sizes_only_generates_one_variant_per_size() {
    let server = TestServer::new().await;
    let product = seed_product(&server.metadata(), "AT-SRM", 200.0, 50).await;

    let uri = format!(
        "/v1/admin/products/{}/variants/generate",
        product.product_id
    );
    let (_, body) = json_request(
        &server.router,
        "POST",
        &uri,
        Some(json!({ "sizes": ["30ml", "50ml"], "colors": [] })),
        Some(TEST_ADMIN_PIN),
    )
    .await;

    let created = body["created"].as_array().unwrap();
    assert_eq!(created.len(), 2);
    assert!(created.iter().all(|v| v["color"].is_null()));
}

#[tokio::test]
async fn empty_selection_creates_nothing() {
    let server = TestServer::new().await;
    let product = seed_product(&server.metadata(), "AT-SRM", 200.0, 50).await;

    let uri = format!(
        "/v1/admin/products/{}/variants/generate",
        product.product_id
    );
    let (status, body) = json_request(
        &server.router,
        "POST",
        &uri,
        Some(json!({ "sizes": [], "colors": [] })),
        Some(TEST_ADMIN_PIN),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["created"].as_array().unwrap().is_empty());
    assert_eq!(body["skipped"], 0);
}

#[tokio::test]
async fn generate_on_a_missing_product_is_not_found() {
    let server = TestServer::new().await;

    let uri = format!(
        "/v1/admin/products/{}/variants/generate",
        uuid::Uuid::new_v4()
    );
    let (status, _) = json_request(
        &server.router,
        "POST",
        &uri,
        Some(json!({ "sizes": ["S"], "colors": [] })),
        Some(TEST_ADMIN_PIN),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn single_variant_crud() {
    let server = TestServer::new().await;
    let product = seed_product(&server.metadata(), "AT-DRE", 450.0, 100).await;

    let uri = format!("/v1/admin/products/{}/variants", product.product_id);
    let (status, created) = json_request(
        &server.router,
        "POST",
        &uri,
        Some(json!({
            "size": "XL",
            "color": "Rose",
            "name": "XL Rose",
            "sku": "AT-DRE-XLRS",
            "price": 480.0,
            "stock": 6
        })),
        Some(TEST_ADMIN_PIN),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let variant_id = created["variant_id"].as_str().unwrap().to_string();

    let (status, updated) = json_request(
        &server.router,
        "PUT",
        &format!("/v1/admin/variants/{variant_id}"),
        Some(json!({
            "size": "XL",
            "color": "Rose",
            "name": "XL Rose",
            "sku": "AT-DRE-XLRS",
            "price": 460.0,
            "stock": 8
        })),
        Some(TEST_ADMIN_PIN),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 460.0);

    let (status, _) = json_request(
        &server.router,
        "DELETE",
        &format!("/v1/admin/variants/{variant_id}"),
        None,
        Some(TEST_ADMIN_PIN),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
