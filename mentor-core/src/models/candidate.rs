//! Advice candidates as they flow out of providers and through ranking.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::score::Score;

/// Knowledge source that produced a candidate.
///
/// Each tag carries a fixed reliability prior (`tier`) reflecting how often
/// that source class has produced advice worth following. Tiers bound but
/// never override relevance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    /// Safety rules and guardrail knowledge.
    Safety,
    /// Hard project constraints (build rules, API contracts).
    Constraint,
    /// Mined code patterns and conventions.
    Pattern,
    /// Distilled insights from past sessions.
    Insight,
    /// Raw history of the current or recent sessions.
    History,
    /// Static per-tool heuristics.
    Heuristic,
    /// Unprocessed transcript fragments.
    Transcript,
}

impl SourceTag {
    /// Fixed reliability prior in [0.40, 0.90].
    pub fn tier(self) -> f64 {
        match self {
            SourceTag::Safety => 0.90,
            SourceTag::Constraint => 0.85,
            SourceTag::Pattern => 0.75,
            SourceTag::Insight => 0.65,
            SourceTag::History => 0.55,
            SourceTag::Heuristic => 0.45,
            SourceTag::Transcript => 0.40,
        }
    }

    /// Whether this source is allowed to reach BLOCK authority.
    pub fn is_safety_critical(self) -> bool {
        matches!(self, SourceTag::Safety)
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceTag::Safety => "safety",
            SourceTag::Constraint => "constraint",
            SourceTag::Pattern => "pattern",
            SourceTag::Insight => "insight",
            SourceTag::History => "history",
            SourceTag::Heuristic => "heuristic",
            SourceTag::Transcript => "transcript",
        };
        write!(f, "{name}")
    }
}

/// Broad advice category, used by the gate's boost chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceCategory {
    Caution,
    Correctness,
    Performance,
    Process,
    Style,
}

impl Default for AdviceCategory {
    fn default() -> Self {
        AdviceCategory::Process
    }
}

/// Raw hit returned by a knowledge provider, before fusion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderHit {
    /// Advice text as stored by the provider.
    pub text: String,
    /// Which source class produced it.
    pub source: SourceTag,
    /// Provider-reported confidence in [0, 1].
    pub confidence: f64,
}

/// A ranked advice candidate, ephemeral to one engine call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceCandidate {
    /// Stable advice identity (fingerprint of normalized text + source).
    pub id: String,
    /// Advice text.
    pub text: String,
    /// Source class.
    pub source: SourceTag,
    /// Query relevance in [0, 1].
    pub relevance: f64,
    /// Blended quality in [0, 1]: max(actionability, source tier).
    pub quality: f64,
    /// Blended trust in [0, 1]: max(confidence, measured effectiveness).
    pub trust: f64,
    /// Advice category for gate boosts.
    pub category: AdviceCategory,
    /// Final fusion score.
    pub score: Score,
}

impl AdviceCandidate {
    /// Stable advice id: blake3 of normalized text plus the source tag.
    ///
    /// Normalization collapses whitespace and case so trivially reworded
    /// duplicates share an identity across calls and sessions.
    pub fn compute_id(text: &str, source: SourceTag) -> String {
        let normalized: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let mut hasher = blake3::Hasher::new();
        hasher.update(normalized.to_lowercase().as_bytes());
        hasher.update(source.to_string().as_bytes());
        hasher.finalize().to_hex()[..16].to_string()
    }
}
