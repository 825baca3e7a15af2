use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Score thresholds per authority tier, ordered highest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorityThresholds {
    pub block: f64,
    pub warning: f64,
    pub note: f64,
    pub whisper: f64,
}

impl AuthorityThresholds {
    /// Validate strict descending order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block > self.warning && self.warning > self.note && self.note > self.whisper {
            Ok(())
        } else {
            Err(ConfigError::Parse {
                reason: format!(
                    "authority thresholds must descend: block={} warning={} note={} whisper={}",
                    self.block, self.warning, self.note, self.whisper
                ),
            })
        }
    }
}

impl Default for AuthorityThresholds {
    fn default() -> Self {
        Self {
            block: defaults::DEFAULT_BLOCK_THRESHOLD,
            warning: defaults::DEFAULT_WARNING_THRESHOLD,
            note: defaults::DEFAULT_NOTE_THRESHOLD,
            whisper: defaults::DEFAULT_WHISPER_THRESHOLD,
        }
    }
}

/// Quality gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Base score relevance weight.
    pub relevance_weight: f64,
    /// Base score confidence weight.
    pub confidence_weight: f64,
    /// Constant reflecting that candidates already passed upstream filters.
    pub floor_constant: f64,
    /// Authority tier thresholds.
    pub thresholds: AuthorityThresholds,
    /// Whether the whisper tier may emit at all.
    pub whisper_enabled: bool,
    /// Hard cap on advisories emitted per call.
    pub emission_budget: usize,
    /// Boost for sources that match the current task phase.
    pub phase_boost: f64,
    /// Cap on the urgency-language boost.
    pub urgency_boost_cap: f64,
    /// Boost for cautionary advice during high-risk phases.
    pub caution_boost: f64,
    /// Cap on the external outcome-risk boost.
    pub risk_boost_cap: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            relevance_weight: defaults::DEFAULT_GATE_RELEVANCE_WEIGHT,
            confidence_weight: defaults::DEFAULT_GATE_CONFIDENCE_WEIGHT,
            floor_constant: defaults::DEFAULT_GATE_FLOOR_CONSTANT,
            thresholds: AuthorityThresholds::default(),
            whisper_enabled: true,
            emission_budget: defaults::DEFAULT_EMISSION_BUDGET,
            phase_boost: defaults::DEFAULT_PHASE_BOOST,
            urgency_boost_cap: defaults::DEFAULT_URGENCY_BOOST_CAP,
            caution_boost: defaults::DEFAULT_CAUTION_BOOST,
            risk_boost_cap: defaults::DEFAULT_RISK_BOOST_CAP,
        }
    }
}
