//! In-memory response cache for rewrite results.
//!
//! # Memory Safety
//!
//! This implementation includes protection against unbounded growth:
//! - Configurable maximum entries (default: 10,000); inserts beyond the cap
//!   are dropped rather than evicting live entries
//! - Lazy expiry on read plus a background sweep task for entries that are
//!   never read again

use atelier_core::FINGERPRINT_PREFIX_CHARS;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct CacheEntry {
    value: String,
    inserted_at: Instant,
}

/// TTL-bounded cache keyed by request fingerprint.
pub struct RewriteCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    max_entries: usize,
}

impl RewriteCache {
    /// Create a new cache with the given entry TTL and capacity.
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            max_entries,
        }
    }

    /// Build the cache key for a rewrite request.
    ///
    /// The fingerprint is the field name plus a prefix of the input and its
    /// length. Collisions on long texts sharing a 50-char prefix and length
    /// only ever serve an equally valid rewrite.
    pub fn fingerprint(field: &str, text: &str) -> String {
        let prefix: String = text.chars().take(FINGERPRINT_PREFIX_CHARS).collect();
        format!("google:{}:{}{}", field, prefix, text.chars().count())
    }

    /// Look up a cached value, expiring it lazily if its TTL has passed.
    pub fn get(&self, key: &str) -> Option<String> {
        let expired = match self.entries.get(key) {
            Some(entry) => {
                if entry.inserted_at.elapsed() < self.ttl {
                    return Some(entry.value.clone());
                }
                true
            }
            None => return None,
        };
        if expired {
            self.entries.remove(key);
        }
        None
    }

    /// Insert a value. Dropped silently when the cache is full and the key is
    /// not already present.
    pub fn insert(&self, key: String, value: String) {
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&key) {
            tracing::warn!(
                max_entries = self.max_entries,
                "Rewrite cache at capacity, dropping insert"
            );
            return;
        }
        self.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Remove all expired entries. Returns the number evicted.
    pub fn sweep_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.inserted_at.elapsed() < self.ttl);
        before - self.entries.len()
    }

    /// Current number of entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Spawn a background task that periodically evicts expired cache entries.
pub fn spawn_sweep_task(
    cache: Arc<RewriteCache>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let evicted = cache.sweep_expired();
            if evicted > 0 {
                tracing::info!(
                    evicted = evicted,
                    remaining = cache.len(),
                    "Rewrite cache sweep evicted expired entries"
                );
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_uses_field_prefix_and_length() {
        let key = RewriteCache::fingerprint("title", "short text");
        assert_eq!(key, "google:title:short text10");
    }

    #[test]
    fn fingerprint_truncates_long_input_on_char_boundary() {
        let text = "م".repeat(80);
        let key = RewriteCache::fingerprint("description", &text);
        assert!(key.starts_with("google:description:"));
        assert!(key.ends_with("80"));
    }

    #[test]
    fn get_returns_inserted_value() {
        let cache = RewriteCache::new(Duration::from_secs(60), 10);
        cache.insert("k".to_string(), "v".to_string());
        assert_eq!(cache.get("k").as_deref(), Some("v"));
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn expired_entries_are_evicted_on_read() {
        let cache = RewriteCache::new(Duration::ZERO, 10);
        cache.insert("k".to_string(), "v".to_string());
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn inserts_beyond_capacity_are_dropped() {
        let cache = RewriteCache::new(Duration::from_secs(60), 2);
        cache.insert("a".to_string(), "1".to_string());
        cache.insert("b".to_string(), "2".to_string());
        cache.insert("c".to_string(), "3".to_string());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("c"), None);
        // Updating an existing key is still allowed at capacity.
        cache.insert("a".to_string(), "updated".to_string());
        assert_eq!(cache.get("a").as_deref(), Some("updated"));
    }

    #[test]
    fn sweep_removes_only_expired_entries() {
        let cache = RewriteCache::new(Duration::ZERO, 10);
        cache.insert("a".to_string(), "1".to_string());
        cache.insert("b".to_string(), "2".to_string());
        assert_eq!(cache.sweep_expired(), 2);
        assert!(cache.is_empty());

        let fresh = RewriteCache::new(Duration::from_secs(60), 10);
        fresh.insert("a".to_string(), "1".to_string());
        assert_eq!(fresh.sweep_expired(), 0);
        assert_eq!(fresh.len(), 1);
    }
}
