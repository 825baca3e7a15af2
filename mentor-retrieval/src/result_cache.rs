//! Burst result cache.
//!
//! Seconds-scale TTL keyed by (tool, context fingerprint); bounds
//! repeated provider work when the agent issues bursts of similar calls
//! and makes `advise` idempotent inside the window.

use std::time::Duration;

use moka::sync::Cache;

use mentor_core::models::AdviceCandidate;

/// Short-TTL cache of ranked candidate sets.
pub struct ResultCache {
    cache: Cache<String, Vec<AdviceCandidate>>,
}

impl ResultCache {
    /// Create a cache with the given TTL and capacity.
    pub fn new(ttl_secs: u64, capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(Duration::from_secs(ttl_secs.max(1)))
            .build();
        Self { cache }
    }

    /// Cache key for a call.
    pub fn key(tool: &str, context_fingerprint: &str) -> String {
        format!("{tool}:{context_fingerprint}")
    }

    pub fn get(&self, key: &str) -> Option<Vec<AdviceCandidate>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, candidates: Vec<AdviceCandidate>) {
        self.cache.insert(key, candidates);
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_within_ttl() {
        let cache = ResultCache::new(5, 16);
        let key = ResultCache::key("bash", "abc");
        cache.insert(key.clone(), vec![]);
        assert!(cache.get(&key).is_some());
    }

    #[test]
    fn distinct_contexts_do_not_collide() {
        let cache = ResultCache::new(5, 16);
        cache.insert(ResultCache::key("bash", "abc"), vec![]);
        assert!(cache.get(&ResultCache::key("bash", "xyz")).is_none());
    }
}
