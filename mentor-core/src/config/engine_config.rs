use serde::{Deserialize, Serialize};

use super::defaults;

/// Orchestrator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Overall wall-clock budget per call (milliseconds).
    pub budget_ms: u64,
    /// Cross-session exact-text cooldown (seconds).
    pub text_dedup_cooldown_secs: u64,
    /// Global per-advice-id cooldown (seconds). Independent of the
    /// per-session shown ledger and the exact-text table.
    pub advice_cooldown_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            budget_ms: defaults::DEFAULT_ENGINE_BUDGET_MS,
            text_dedup_cooldown_secs: defaults::DEFAULT_TEXT_DEDUP_COOLDOWN_SECS,
            advice_cooldown_secs: defaults::DEFAULT_ADVICE_COOLDOWN_SECS,
        }
    }
}
