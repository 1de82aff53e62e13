//! Integration tests for image upload, serving, and deletion.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::server::{TEST_ADMIN_PIN, TestServer, json_request};
use tower::ServiceExt;

const WEBP_BYTES: &[u8] = b"RIFF....WEBPVP8 fake image payload";

async fn upload(server: &TestServer, filename: &str, body: &[u8]) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(format!("/v1/admin/images?filename={filename}"))
        .header("X-Admin-Pin", TEST_ADMIN_PIN)
        .header("Content-Type", "application/octet-stream")
        .body(Body::from(body.to_vec()))
        .unwrap();

    let response = server.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn upload_then_serve_roundtrip() {
    let server = TestServer::new().await;

    let (status, body) = upload(&server, "hero.webp", WEBP_BYTES).await;
    assert_eq!(status, StatusCode::CREATED);
    let key = body["key"].as_str().unwrap();
    assert!(key.starts_with("products/"));
    assert!(key.ends_with(".webp"));
    assert_eq!(body["url"].as_str().unwrap(), format!("/v1/images/{key}"));

    let request = Request::builder()
        .method("GET")
        .uri(format!("/v1/images/{key}"))
        .body(Body::empty())
        .unwrap();
    let response = server.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("Content-Type").unwrap(),
        "image/webp"
    );
    let served = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(served.as_ref(), WEBP_BYTES);
}

#[tokio::test]
async fn upload_rejects_unknown_extensions() {
    let server = TestServer::new().await;

    let (status, body) = upload(&server, "malware.exe", b"MZ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn upload_rejects_empty_and_oversized_bodies() {
    let server = TestServer::with_config(|config| {
        config.server.max_image_bytes = 16;
    })
    .await;

    let (status, _) = upload(&server, "a.png", b"").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = upload(&server, "a.png", &[0u8; 32]).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["code"], "payload_too_large");
}

#[tokio::test]
async fn upload_requires_the_admin_pin() {
    let server = TestServer::new().await;

    let request = Request::builder()
        .method("POST")
        .uri("/v1/admin/images?filename=a.png")
        .body(Body::from(WEBP_BYTES.to_vec()))
        .unwrap();
    let response = server.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn delete_removes_the_object() {
    let server = TestServer::new().await;

    let (_, body) = upload(&server, "hero.webp", WEBP_BYTES).await;
    let key = body["key"].as_str().unwrap().to_string();

    let (status, _) = json_request(
        &server.router,
        "DELETE",
        &format!("/v1/admin/images/{key}"),
        None,
        Some(TEST_ADMIN_PIN),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) =
        json_request(&server.router, "GET", &format!("/v1/images/{key}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_images_are_not_found() {
    let server = TestServer::new().await;

    let (status, body) = json_request(
        &server.router,
        "GET",
        "/v1/images/products/nope.webp",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "storage_error");
}
