//! Configuration for every subsystem.
//!
//! Formulas live in code; magnitudes live here. Each section is
//! `#[serde(default)]` so a partial baseline file only overrides what it
//! names. Resolution precedence: schema defaults → baseline TOML →
//! runtime overrides → environment variables (`MENTOR_*`).

mod bus;
mod cache_config;
pub mod defaults;
mod engine_config;
mod gate_config;
mod resolver;
mod retrieval_config;
mod session_config;
mod synthesis_config;

pub use bus::ConfigBus;
pub use cache_config::CacheConfig;
pub use engine_config::EngineConfig;
pub use gate_config::{AuthorityThresholds, GateConfig};
pub use resolver::{resolve, resolve_with_env};
pub use retrieval_config::{FusionWeights, RetrievalConfig};
pub use session_config::SessionConfig;
pub use synthesis_config::SynthesisConfig;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Aggregated configuration bundle for the whole engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MentorConfig {
    pub session: SessionConfig,
    pub retrieval: RetrievalConfig,
    pub cache: CacheConfig,
    pub gate: GateConfig,
    pub synthesis: SynthesisConfig,
    pub engine: EngineConfig,
}

impl MentorConfig {
    /// Validate cross-field invariants (weight sums, threshold ordering).
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.retrieval.weights.validate()?;
        self.gate.thresholds.validate()?;
        Ok(())
    }
}
