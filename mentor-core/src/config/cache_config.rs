use serde::{Deserialize, Serialize};

use super::defaults;

/// Packet cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Packet freshness window (seconds).
    pub packet_ttl_secs: u64,
    /// Hard capacity cap on indexed packets.
    pub capacity: usize,
    /// Index rows scored during a relaxed lookup.
    pub relaxed_top_k: usize,
    /// Minimum weighted similarity for a relaxed hit.
    pub relaxed_threshold: f64,
    /// Multiplier applied to relaxed scores of low-effectiveness rows.
    pub effectiveness_penalty: f64,
    /// Effectiveness below which the penalty applies.
    pub low_effectiveness: f64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            packet_ttl_secs: defaults::DEFAULT_PACKET_TTL_SECS,
            capacity: defaults::DEFAULT_PACKET_CAPACITY,
            relaxed_top_k: defaults::DEFAULT_RELAXED_TOP_K,
            relaxed_threshold: defaults::DEFAULT_RELAXED_THRESHOLD,
            effectiveness_penalty: defaults::DEFAULT_EFFECTIVENESS_PENALTY,
            low_effectiveness: defaults::DEFAULT_LOW_EFFECTIVENESS,
        }
    }
}
