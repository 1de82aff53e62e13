//! Cache-backed AI rewrite engine for Atelier.
//!
//! This crate provides:
//! - A TTL-bounded in-memory response cache with a background sweep task
//! - Provider clients for a primary (Gemini-style) and secondary (OpenRouter)
//!   text-generation API
//! - An engine that chains cache, primary, secondary, and canned mock copy so
//!   the admin panel always gets an answer

pub mod cache;
pub mod engine;
pub mod error;
pub mod mock;
pub mod prompts;
pub mod provider;

pub use cache::{RewriteCache, spawn_sweep_task};
pub use engine::{BenefitsOutcome, RewriteEngine, RewriteOutcome, RewriteSource};
pub use error::{RewriteError, RewriteResult};
pub use mock::MOCK_BENEFITS;
