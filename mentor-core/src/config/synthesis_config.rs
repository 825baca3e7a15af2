use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::Authority;

/// Synthesizer and emitter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Feature toggle for tier-2 enhanced composition.
    pub tier2_enabled: bool,
    /// Minimum authority that qualifies for tier-2 composition.
    pub tier2_min_authority: Authority,
    /// Hard deadline for the tier-2 backend call (milliseconds).
    pub tier2_timeout_ms: u64,
    /// Minimum remaining engine budget required to attempt tier-2.
    pub tier2_min_budget_ms: u64,
    /// Output character ceiling, enforced by synthesizer and emitter both.
    pub max_chars: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            tier2_enabled: true,
            tier2_min_authority: Authority::Warning,
            tier2_timeout_ms: defaults::DEFAULT_TIER2_TIMEOUT_MS,
            tier2_min_budget_ms: defaults::DEFAULT_TIER2_MIN_BUDGET_MS,
            max_chars: defaults::DEFAULT_MAX_CHARS,
        }
    }
}
