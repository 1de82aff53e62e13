//! Engine tests against mocked provider endpoints.

use atelier_core::config::RewriteConfig;
use atelier_rewrite::{MOCK_BENEFITS, RewriteEngine, RewriteSource};
use httpmock::prelude::*;
use serde_json::json;

fn config_with(server: &MockServer, google: bool, openrouter: bool) -> RewriteConfig {
    RewriteConfig {
        google_api_key: google.then(|| "google-test-key".to_string()),
        openrouter_api_key: openrouter.then(|| "openrouter-test-key".to_string()),
        google_endpoint: server.url("/gemini/generate"),
        openrouter_endpoint: server.url("/openrouter/chat"),
        ..RewriteConfig::default()
    }
}

fn gemini_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    })
}

fn openrouter_body(content: &str) -> serde_json::Value {
    json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn repeated_rewrite_hits_cache_after_one_provider_call() {
    let server = MockServer::start();
    let gemini = server.mock(|when, then| {
        when.method(POST)
            .path("/gemini/generate")
            .query_param("key", "google-test-key");
        then.status(200).json_body(gemini_body("عنوان جديد"));
    });

    let engine = RewriteEngine::from_config(&config_with(&server, true, false)).unwrap();

    let first = engine.rewrite("title", "old product title").await;
    assert_eq!(first.source, RewriteSource::Primary);
    assert_eq!(first.text, "عنوان جديد");

    let second = engine.rewrite("title", "old product title").await;
    assert_eq!(second.source, RewriteSource::Cache);
    assert_eq!(second.text, "عنوان جديد");

    gemini.assert_hits(1);
}

#[tokio::test]
async fn expired_entries_go_back_to_the_provider() {
    let server = MockServer::start();
    let gemini = server.mock(|when, then| {
        when.method(POST).path("/gemini/generate");
        then.status(200).json_body(gemini_body("عنوان متجدد"));
    });

    let config = RewriteConfig {
        cache_ttl_secs: 0,
        ..config_with(&server, true, false)
    };
    let engine = RewriteEngine::from_config(&config).unwrap();

    let first = engine.rewrite("title", "stale product title").await;
    assert_eq!(first.source, RewriteSource::Primary);

    // The entry written by the first call is already past its TTL.
    let second = engine.rewrite("title", "stale product title").await;
    assert_eq!(second.source, RewriteSource::Primary);

    gemini.assert_hits(2);
}

#[tokio::test]
async fn benefit_field_bypasses_the_cache() {
    let server = MockServer::start();
    let gemini = server.mock(|when, then| {
        when.method(POST).path("/gemini/generate");
        then.status(200).json_body(gemini_body("نعومة فورية"));
    });

    let engine = RewriteEngine::from_config(&config_with(&server, true, false)).unwrap();

    let first = engine.rewrite("benefit", "softness").await;
    let second = engine.rewrite("benefit", "softness").await;
    assert_eq!(first.source, RewriteSource::Primary);
    assert_eq!(second.source, RewriteSource::Primary);

    gemini.assert_hits(2);
}

#[tokio::test]
async fn primary_answer_strips_wrapping_quotes() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/gemini/generate");
        then.status(200).json_body(gemini_body("\"سحر الطبيعة\""));
    });

    let engine = RewriteEngine::from_config(&config_with(&server, true, false)).unwrap();
    let outcome = engine.rewrite("title", "something").await;
    assert_eq!(outcome.text, "سحر الطبيعة");
}

#[tokio::test]
async fn failing_primary_falls_back_to_secondary_without_caching() {
    let server = MockServer::start();
    let gemini = server.mock(|when, then| {
        when.method(POST).path("/gemini/generate");
        then.status(500).json_body(json!({"error": "overloaded"}));
    });
    let openrouter = server.mock(|when, then| {
        when.method(POST)
            .path("/openrouter/chat")
            .header("authorization", "Bearer openrouter-test-key");
        then.status(200).json_body(openrouter_body("وصف بديل"));
    });

    let engine = RewriteEngine::from_config(&config_with(&server, true, true)).unwrap();

    let first = engine.rewrite("description", "old description").await;
    assert_eq!(first.source, RewriteSource::Secondary);
    assert_eq!(first.text, "وصف بديل");

    // A degraded-path answer must not be served from cache next time.
    let second = engine.rewrite("description", "old description").await;
    assert_eq!(second.source, RewriteSource::Secondary);

    gemini.assert_hits(2);
    openrouter.assert_hits(2);
}

#[tokio::test]
async fn both_providers_failing_yields_mock_copy() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/gemini/generate");
        then.status(503);
    });
    server.mock(|when, then| {
        when.method(POST).path("/openrouter/chat");
        then.status(503);
    });

    let engine = RewriteEngine::from_config(&config_with(&server, true, true)).unwrap();
    let outcome = engine.rewrite("ingredients", "argan oil, vitamin E").await;
    assert_eq!(outcome.source, RewriteSource::Mock);
    assert!(!outcome.text.is_empty());
}

#[tokio::test]
async fn no_configured_keys_serves_mock_without_network() {
    let server = MockServer::start();
    let engine = RewriteEngine::from_config(&config_with(&server, false, false)).unwrap();

    let outcome = engine.rewrite("title", "anything").await;
    assert_eq!(outcome.source, RewriteSource::Mock);

    let benefits = engine.generate_benefits("anything").await;
    assert_eq!(benefits.source, RewriteSource::Mock);
    assert_eq!(benefits.benefits, MOCK_BENEFITS.to_vec());
}

#[tokio::test]
async fn benefits_parses_primary_json_array() {
    let server = MockServer::start();
    let gemini = server.mock(|when, then| {
        when.method(POST).path("/gemini/generate");
        then.status(200)
            .json_body(gemini_body(r#"["ترطيب عميق", "لمعان صحي", "حماية يومية", "ملمس ناعم"]"#));
    });

    let engine = RewriteEngine::from_config(&config_with(&server, true, false)).unwrap();
    let outcome = engine.generate_benefits("deep hydration and shine").await;
    assert_eq!(outcome.source, RewriteSource::Primary);
    assert_eq!(outcome.benefits.len(), 4);
    assert_eq!(outcome.benefits[0], "ترطيب عميق");

    gemini.assert_hits(1);
}

#[tokio::test]
async fn benefits_cleans_fenced_secondary_output() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/gemini/generate");
        then.status(500);
    });
    server.mock(|when, then| {
        when.method(POST).path("/openrouter/chat");
        then.status(200).json_body(openrouter_body(
            "```json\n[\"نتيجة مضمونة\", \"خامة فاخرة\", \"راحة طول اليوم\", \"سعر مناسب\"]\n```",
        ));
    });

    let engine = RewriteEngine::from_config(&config_with(&server, true, true)).unwrap();
    let outcome = engine.generate_benefits("comfort and quality").await;
    assert_eq!(outcome.source, RewriteSource::Secondary);
    assert_eq!(outcome.benefits.len(), 4);
}

#[tokio::test]
async fn unparseable_benefit_answers_fall_back_to_mock() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/gemini/generate");
        then.status(200).json_body(gemini_body("مش هينفع أرد بصيغة JSON"));
    });

    let engine = RewriteEngine::from_config(&config_with(&server, true, false)).unwrap();
    let outcome = engine.generate_benefits("whatever").await;
    assert_eq!(outcome.source, RewriteSource::Mock);
    assert_eq!(outcome.benefits.len(), 4);
}
