//! Cross-call repetition controls.
//!
//! Three independent layers guard emission: the per-session shown ledger
//! (enforced by the gate), the global per-advice-id cooldown, and the
//! global exact-text fingerprint cooldown. All three must pass. The
//! global tables are shared across sessions and only eventually
//! consistent; a lost race costs one duplicate emission, not correctness.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

/// Global cooldown tables keyed by advice id and text fingerprint.
pub struct RepetitionGuard {
    advice_ids: DashMap<String, DateTime<Utc>>,
    text_fingerprints: DashMap<String, DateTime<Utc>>,
}

impl RepetitionGuard {
    pub fn new() -> Self {
        Self {
            advice_ids: DashMap::new(),
            text_fingerprints: DashMap::new(),
        }
    }

    /// Whether an advice id is outside its global cooldown.
    pub fn advice_allows(&self, advice_id: &str, cooldown_secs: u64) -> bool {
        Self::allows(&self.advice_ids, advice_id, cooldown_secs)
    }

    /// Whether an exact text fingerprint is outside its cooldown.
    pub fn text_allows(&self, fingerprint: &str, cooldown_secs: u64) -> bool {
        Self::allows(&self.text_fingerprints, fingerprint, cooldown_secs)
    }

    /// Record an emission against both tables.
    pub fn record(&self, advice_ids: &[String], fingerprint: &str) {
        let now = Utc::now();
        for id in advice_ids {
            self.advice_ids.insert(id.clone(), now);
        }
        self.text_fingerprints.insert(fingerprint.to_string(), now);
    }

    /// Drop entries older than the longest cooldown still in force.
    pub fn sweep(&self, max_cooldown_secs: u64) -> usize {
        let cutoff = Utc::now() - Duration::seconds(max_cooldown_secs as i64);
        let before = self.advice_ids.len() + self.text_fingerprints.len();
        self.advice_ids.retain(|_, at| *at > cutoff);
        self.text_fingerprints.retain(|_, at| *at > cutoff);
        before - (self.advice_ids.len() + self.text_fingerprints.len())
    }

    fn allows(table: &DashMap<String, DateTime<Utc>>, key: &str, cooldown_secs: u64) -> bool {
        match table.get(key) {
            Some(at) => Utc::now() - *at > Duration::seconds(cooldown_secs as i64),
            None => true,
        }
    }
}

impl Default for RepetitionGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_keys_are_allowed() {
        let guard = RepetitionGuard::new();
        assert!(guard.advice_allows("a1", 600));
        assert!(guard.text_allows("ff00", 600));
    }

    #[test]
    fn recorded_emission_enters_cooldown() {
        let guard = RepetitionGuard::new();
        guard.record(&["a1".to_string()], "ff00");
        assert!(!guard.advice_allows("a1", 600));
        assert!(!guard.text_allows("ff00", 600));
        // Other keys are unaffected.
        assert!(guard.advice_allows("a2", 600));
    }

    #[test]
    fn cooldown_expires() {
        let guard = RepetitionGuard::new();
        guard.record(&["a1".to_string()], "ff00");
        assert!(guard.advice_allows("a1", 0));
        assert!(guard.text_allows("ff00", 0));
    }

    #[test]
    fn sweep_drops_stale_entries() {
        let guard = RepetitionGuard::new();
        guard.record(&["a1".to_string()], "ff00");
        assert_eq!(guard.sweep(0), 2);
        assert!(guard.advice_allows("a1", 600));
    }
}
