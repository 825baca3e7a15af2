//! Per-call diagnostics record.
//!
//! One structured record per engine call: stage timings, provider hit
//! counts, suppression reasons, final authority/score, emitted flag.
//! This is the only channel where failures are visible; the tool-call
//! path itself always degrades to silence.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::decision::{Authority, SuppressReason};

/// Elapsed time for one pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageTiming {
    pub stage: String,
    pub elapsed_ms: u64,
}

/// Structured diagnostics for a single engine call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallDiagnostics {
    pub session_id: String,
    pub tool_name: String,
    /// Stage → elapsed, in execution order.
    pub stages: Vec<StageTiming>,
    /// Provider name → hit count for this call.
    pub provider_hits: HashMap<String, usize>,
    /// Every suppression reason recorded during the call.
    pub suppressions: Vec<SuppressReason>,
    /// Final authority of the emitted (or withheld) advisory.
    pub authority: Option<Authority>,
    /// Final gate score of the top decision.
    pub final_score: Option<f64>,
    /// Whether anything was written to the output channel.
    pub emitted: bool,
    /// Packet served or created by this call, for feedback routing.
    pub packet_id: Option<String>,
    /// Whether the packet cache satisfied the call.
    pub cache_hit: bool,
    /// Error code when the call degraded to silence on failure.
    pub error_code: Option<String>,
}

impl CallDiagnostics {
    pub fn new(session_id: impl Into<String>, tool_name: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            tool_name: tool_name.into(),
            ..Default::default()
        }
    }

    /// Record a stage's elapsed time.
    pub fn record_stage(&mut self, stage: &str, elapsed_ms: u64) {
        self.stages.push(StageTiming {
            stage: stage.to_string(),
            elapsed_ms,
        });
    }

    /// Record a suppression reason.
    pub fn record_suppression(&mut self, reason: SuppressReason) {
        self.suppressions.push(reason);
    }

    /// Total time across recorded stages.
    pub fn total_elapsed_ms(&self) -> u64 {
        self.stages.iter().map(|s| s.elapsed_ms).sum()
    }
}
