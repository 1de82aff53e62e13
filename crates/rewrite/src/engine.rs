//! Rewrite engine: cache, provider chain, mock fallback.

use crate::cache::RewriteCache;
use crate::error::{RewriteError, RewriteResult};
use crate::mock::{mock_benefits, mock_rewrite};
use crate::prompts::{BENEFITS_SYSTEM_PROMPT, rewrite_system_prompt};
use crate::provider::{GeminiProvider, OpenRouterProvider, strip_wrapping_quotes};
use atelier_core::FieldKind;
use atelier_core::config::RewriteConfig;
use std::sync::Arc;

/// Where a rewrite answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteSource {
    Cache,
    Primary,
    Secondary,
    Mock,
}

impl RewriteSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewriteSource::Cache => "cache",
            RewriteSource::Primary => "primary",
            RewriteSource::Secondary => "secondary",
            RewriteSource::Mock => "mock_fallback",
        }
    }
}

/// Result of a single-field rewrite.
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    pub text: String,
    pub source: RewriteSource,
}

/// Result of the four-benefit generator.
#[derive(Debug, Clone)]
pub struct BenefitsOutcome {
    pub benefits: Vec<String>,
    pub source: RewriteSource,
}

/// Cache-backed AI rewrite engine.
///
/// The answer chain is cache, primary provider, secondary provider, canned
/// mock copy. Only primary answers are cached; the secondary is a degraded
/// path and its output should not mask a recovered primary for a full TTL.
pub struct RewriteEngine {
    cache: Arc<RewriteCache>,
    primary: Option<GeminiProvider>,
    secondary: Option<OpenRouterProvider>,
}

impl RewriteEngine {
    pub fn from_config(config: &RewriteConfig) -> RewriteResult<Self> {
        config.validate().map_err(RewriteError::Config)?;

        let cache = Arc::new(RewriteCache::new(
            config.cache_ttl(),
            config.cache_max_entries,
        ));

        let primary = config
            .google_api_key
            .as_deref()
            .map(|key| {
                GeminiProvider::new(
                    &config.google_endpoint,
                    key,
                    std::time::Duration::from_secs(config.primary_timeout_secs),
                )
            })
            .transpose()?;

        let secondary = config
            .openrouter_api_key
            .as_deref()
            .map(|key| {
                OpenRouterProvider::new(
                    &config.openrouter_endpoint,
                    key,
                    &config.openrouter_model,
                    std::time::Duration::from_secs(config.secondary_timeout_secs),
                )
            })
            .transpose()?;

        if primary.is_none() && secondary.is_none() {
            tracing::warn!("No rewrite provider keys configured, serving mock copy only");
        }

        Ok(Self {
            cache,
            primary,
            secondary,
        })
    }

    /// Shared handle to the response cache, for the background sweep task and
    /// admin metrics.
    pub fn cache(&self) -> Arc<RewriteCache> {
        Arc::clone(&self.cache)
    }

    /// Rewrite one product field.
    ///
    /// `field` is taken as a raw string: unknown values still get a rewrite
    /// with a generic instruction, matching how the admin panel sends ad-hoc
    /// fields. Single-benefit requests bypass the cache so regenerating gives
    /// a different variation each time.
    pub async fn rewrite(&self, field: &str, text: &str) -> RewriteOutcome {
        let kind = FieldKind::parse(field).ok();
        let bypass_cache = kind == Some(FieldKind::Benefit);
        let cache_key = RewriteCache::fingerprint(field, text);

        if !bypass_cache {
            if let Some(cached) = self.cache.get(&cache_key) {
                tracing::debug!(field = field, "Rewrite cache hit");
                return RewriteOutcome {
                    text: cached,
                    source: RewriteSource::Cache,
                };
            }
        }

        let system_prompt = rewrite_system_prompt(kind);

        if let Some(primary) = &self.primary {
            let prompt = format!("{}\n\nINPUT TO REWRITE: \"{}\"", system_prompt, text);
            match primary.generate(&prompt, false).await {
                Ok(raw) => {
                    let rewritten = strip_wrapping_quotes(&raw).to_string();
                    self.cache.insert(cache_key, rewritten.clone());
                    return RewriteOutcome {
                        text: rewritten,
                        source: RewriteSource::Primary,
                    };
                }
                Err(err) => {
                    tracing::warn!(field = field, error = %err, "Primary rewrite provider failed");
                }
            }
        }

        if let Some(secondary) = &self.secondary {
            let user_prompt = format!("Input: \"{}\"", text);
            match secondary.chat(&system_prompt, &user_prompt).await {
                Ok(raw) => {
                    return RewriteOutcome {
                        text: strip_wrapping_quotes(&raw).to_string(),
                        source: RewriteSource::Secondary,
                    };
                }
                Err(err) => {
                    tracing::warn!(field = field, error = %err, "Secondary rewrite provider failed");
                }
            }
        }

        RewriteOutcome {
            text: mock_rewrite(kind),
            source: RewriteSource::Mock,
        }
    }

    /// Generate exactly four benefit titles for a product.
    ///
    /// Never cached: regeneration is the point. With no providers configured
    /// the canned set is returned immediately.
    pub async fn generate_benefits(&self, text: &str) -> BenefitsOutcome {
        if self.primary.is_none() && self.secondary.is_none() {
            return BenefitsOutcome {
                benefits: mock_benefits(),
                source: RewriteSource::Mock,
            };
        }

        if let Some(primary) = &self.primary {
            let prompt = format!("{}\n\nInput: \"{}\"", BENEFITS_SYSTEM_PROMPT, text);
            match primary.generate(&prompt, true).await {
                Ok(raw) => {
                    if let Some(benefits) = parse_benefit_array(&raw) {
                        return BenefitsOutcome {
                            benefits,
                            source: RewriteSource::Primary,
                        };
                    }
                    tracing::warn!("Primary benefits response was not a JSON string array");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Primary benefits provider failed");
                }
            }
        }

        if let Some(secondary) = &self.secondary {
            let user_prompt = format!("Input: \"{}\"", text);
            match secondary.chat(BENEFITS_SYSTEM_PROMPT, &user_prompt).await {
                Ok(raw) => {
                    if let Some(benefits) = parse_benefit_array(&raw) {
                        return BenefitsOutcome {
                            benefits,
                            source: RewriteSource::Secondary,
                        };
                    }
                    tracing::warn!("Secondary benefits response was not a JSON string array");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Secondary benefits provider failed");
                }
            }
        }

        BenefitsOutcome {
            benefits: mock_benefits(),
            source: RewriteSource::Mock,
        }
    }
}

/// Extract a JSON string array from a model response, tolerating markdown
/// fences and prose around the array.
fn parse_benefit_array(raw: &str) -> Option<Vec<String>> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    let candidate = match (cleaned.find('['), cleaned.rfind(']')) {
        (Some(start), Some(end)) if start < end => &cleaned[start..=end],
        _ => cleaned,
    };

    let benefits: Vec<String> = serde_json::from_str(candidate).ok()?;
    if benefits.is_empty() {
        return None;
    }
    Some(benefits)
}
