//! Relaxed-match scoring for packet lookup.
//!
//! When no exact composite key matches, index rows are scored by weighted
//! similarity across the stored dimensions. Rows with low measured
//! effectiveness take a penalty multiplier; only a row above the minimum
//! threshold is returned.

use std::collections::HashSet;

use mentor_core::models::PacketKey;

/// Per-dimension weights for relaxed matching. Tool identity dominates,
/// mirroring the exact-key component order.
#[derive(Debug, Clone)]
pub struct RelaxedWeights {
    pub tool: f64,
    pub intent: f64,
    pub plane: f64,
    pub session: f64,
    pub context: f64,
}

impl Default for RelaxedWeights {
    fn default() -> Self {
        Self {
            tool: 0.40,
            intent: 0.25,
            plane: 0.15,
            session: 0.10,
            context: 0.10,
        }
    }
}

/// Score a stored key against the requested key in [0, 1].
pub fn relaxed_score(wanted: &PacketKey, stored: &PacketKey, weights: &RelaxedWeights) -> f64 {
    let mut score = 0.0;
    if wanted.tool == stored.tool {
        score += weights.tool;
    }
    if wanted.intent == stored.intent {
        score += weights.intent;
    } else {
        score += weights.intent * token_overlap(&wanted.intent, &stored.intent);
    }
    if wanted.plane == stored.plane {
        score += weights.plane;
    }
    if wanted.session == stored.session {
        score += weights.session;
    }
    score += weights.context * token_overlap(&wanted.intent, &stored.tool);
    score
}

fn token_overlap(a: &str, b: &str) -> f64 {
    let ta: HashSet<&str> = a.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty()).collect();
    let tb: HashSet<&str> = b.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty()).collect();
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }
    ta.intersection(&tb).count() as f64 / ta.len().max(tb.len()) as f64
}
