//! Integration tests for the admin copy tools.
//!
//! The test server has no provider keys, so every request resolves to the
//! canned mock copy; provider and cache behavior is covered in the
//! rewrite crate's own tests.

mod common;

use axum::http::StatusCode;
use common::server::{TEST_ADMIN_PIN, TestServer, json_request};
use serde_json::json;

#[tokio::test]
async fn rewrite_always_answers_with_mock_copy_when_unconfigured() {
    let server = TestServer::new().await;

    let (status, body) = json_request(
        &server.router,
        "POST",
        "/v1/admin/rewrite",
        Some(json!({ "text": "original product title", "field": "title" })),
        Some(TEST_ADMIN_PIN),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "mock_fallback");
    assert!(!body["text"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn rewrite_requires_text() {
    let server = TestServer::new().await;

    for payload in [json!({ "field": "title" }), json!({ "text": "   " })] {
        let (status, body) = json_request(
            &server.router,
            "POST",
            "/v1/admin/rewrite",
            Some(payload),
            Some(TEST_ADMIN_PIN),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "bad_request");
    }
}

#[tokio::test]
async fn unknown_fields_still_get_an_answer() {
    let server = TestServer::new().await;

    let (status, body) = json_request(
        &server.router,
        "POST",
        "/v1/admin/rewrite",
        Some(json!({ "text": "whatever", "field": "meta_keywords" })),
        Some(TEST_ADMIN_PIN),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["text"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn benefits_fall_back_to_the_canned_set() {
    let server = TestServer::new().await;

    let (status, body) = json_request(
        &server.router,
        "POST",
        "/v1/admin/generate-benefits",
        Some(json!({ "text": "deep hydration oil" })),
        Some(TEST_ADMIN_PIN),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "mock_fallback");
    let benefits = body["benefits"].as_array().unwrap();
    assert_eq!(benefits.len(), 4);
    assert_eq!(benefits[0], "ترطيب عميق");
}

#[tokio::test]
async fn benefits_require_text() {
    let server = TestServer::new().await;

    let (status, _) = json_request(
        &server.router,
        "POST",
        "/v1/admin/generate-benefits",
        Some(json!({})),
        Some(TEST_ADMIN_PIN),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn copy_tools_are_pin_gated() {
    let server = TestServer::new().await;

    let (status, _) = json_request(
        &server.router,
        "POST",
        "/v1/admin/rewrite",
        Some(json!({ "text": "anything" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
