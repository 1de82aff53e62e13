//! HTTP clients for the upstream text-generation providers.

use crate::error::{RewriteError, RewriteResult};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

/// Strip a single pair of wrapping quotes, which the models sometimes add
/// despite the prompt.
pub fn strip_wrapping_quotes(text: &str) -> &str {
    let trimmed = text.trim();
    for quote in ['"', '\''] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}

// =============================================================================
// Primary: Gemini-style generateContent
// =============================================================================

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

/// Client for the primary provider (Google generateContent API shape).
pub struct GeminiProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> RewriteResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Send a single-prompt generation request and return the first
    /// candidate's text.
    ///
    /// `json_output` asks the model for a raw JSON response body (used by the
    /// benefit generator).
    pub async fn generate(&self, prompt: &str, json_output: bool) -> RewriteResult<String> {
        let generation_config = if json_output {
            json!({ "response_mime_type": "application/json" })
        } else {
            json!({ "temperature": 0.7, "maxOutputTokens": 1000 })
        };
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": generation_config,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RewriteError::ProviderStatus {
                provider: "gemini",
                status: response.status().as_u16(),
            });
        }

        let parsed: GeminiResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        text.ok_or(RewriteError::EmptyResponse { provider: "gemini" })
    }
}

// =============================================================================
// Secondary: OpenRouter chat completions
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Client for the secondary provider (OpenRouter chat completions).
pub struct OpenRouterProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenRouterProvider {
    pub fn new(
        endpoint: &str,
        api_key: &str,
        model: &str,
        timeout: Duration,
    ) -> RewriteResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    /// Send a system+user chat request and return the first choice's content.
    pub async fn chat(&self, system_prompt: &str, user_prompt: &str) -> RewriteResult<String> {
        let body = json!({
            "model": self.model,
            "messages": [
                ChatMessage { role: "system", content: system_prompt },
                ChatMessage { role: "user", content: user_prompt },
            ],
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("X-Title", "Atelier Admin")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RewriteError::ProviderStatus {
                provider: "openrouter",
                status: response.status().as_u16(),
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        text.ok_or(RewriteError::EmptyResponse {
            provider: "openrouter",
        })
    }
}
