use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Weights for the three fusion components. Must sum to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionWeights {
    pub relevance: f64,
    pub quality: f64,
    pub trust: f64,
}

impl FusionWeights {
    /// Validate: non-negative, sum within epsilon of 1.0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sum = self.relevance + self.quality + self.trust;
        if self.relevance < 0.0 || self.quality < 0.0 || self.trust < 0.0 {
            return Err(ConfigError::InvalidWeights { sum });
        }
        if (sum - 1.0).abs() > 1e-6 {
            return Err(ConfigError::InvalidWeights { sum });
        }
        Ok(())
    }
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            relevance: defaults::DEFAULT_RELEVANCE_WEIGHT,
            quality: defaults::DEFAULT_QUALITY_WEIGHT,
            trust: defaults::DEFAULT_TRUST_WEIGHT,
        }
    }
}

/// Retrieval aggregator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Maximum candidates returned per call.
    pub max_candidates: usize,
    /// Fusion score floor; a candidate exactly at the floor is retained.
    pub score_floor: f64,
    /// Fusion blend weights.
    pub weights: FusionWeights,
    /// Per-provider call deadline (milliseconds).
    pub provider_timeout_ms: u64,
    /// Burst result cache TTL (seconds).
    pub result_cache_ttl_secs: u64,
    /// Burst result cache capacity (entries).
    pub result_cache_capacity: u64,
    /// Jaccard similarity at or above which two texts are near-duplicates.
    pub near_dup_threshold: f64,
    /// Multiplicative noise penalties by severity.
    pub noise_penalty_severe: f64,
    pub noise_penalty_moderate: f64,
    pub noise_penalty_mild: f64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            max_candidates: defaults::DEFAULT_MAX_CANDIDATES,
            score_floor: defaults::DEFAULT_SCORE_FLOOR,
            weights: FusionWeights::default(),
            provider_timeout_ms: defaults::DEFAULT_PROVIDER_TIMEOUT_MS,
            result_cache_ttl_secs: defaults::DEFAULT_RESULT_CACHE_TTL_SECS,
            result_cache_capacity: defaults::DEFAULT_RESULT_CACHE_CAPACITY,
            near_dup_threshold: defaults::DEFAULT_NEAR_DUP_THRESHOLD,
            noise_penalty_severe: defaults::DEFAULT_NOISE_PENALTY_SEVERE,
            noise_penalty_moderate: defaults::DEFAULT_NOISE_PENALTY_MODERATE,
            noise_penalty_mild: defaults::DEFAULT_NOISE_PENALTY_MILD,
        }
    }
}
