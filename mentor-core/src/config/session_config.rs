use serde::{Deserialize, Serialize};

use super::defaults;

/// Session tracker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Bounded ring buffer size for recent tool calls.
    pub history_cap: usize,
    /// How many recent calls the phase inference window considers.
    pub phase_window: usize,
    /// Shown-advice ledger entry TTL (seconds).
    pub shown_ttl_secs: u64,
    /// Session idle expiry (seconds).
    pub session_ttl_secs: u64,
    /// Consecutive failures that force the debugging phase.
    pub failure_debug_threshold: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_cap: defaults::DEFAULT_HISTORY_CAP,
            phase_window: defaults::DEFAULT_PHASE_WINDOW,
            shown_ttl_secs: defaults::DEFAULT_SHOWN_TTL_SECS,
            session_ttl_secs: defaults::DEFAULT_SESSION_TTL_SECS,
            failure_debug_threshold: defaults::DEFAULT_FAILURE_DEBUG_THRESHOLD,
        }
    }
}
