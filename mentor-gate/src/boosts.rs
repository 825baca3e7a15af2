//! Base score and the fixed-order boost chain.
//!
//! base = w1·relevance + w2·confidence + floor_constant. The floor
//! constant reflects that candidates reaching the gate already passed
//! retrieval filtering. Boosts apply in a fixed order: phase relevance,
//! capped urgency, negative-advisory, external outcome risk.

use mentor_core::config::GateConfig;
use mentor_core::models::{AdviceCandidate, AdviceCategory, SourceTag, TaskContext};
use mentor_core::traits::IRiskSignal;
use mentor_core::Phase;

/// Base gate score before boosts.
pub fn base_score(candidate: &AdviceCandidate, config: &GateConfig) -> f64 {
    config.relevance_weight * candidate.relevance
        + config.confidence_weight * candidate.trust
        + config.floor_constant
}

/// Source classes weighted up in each task phase.
fn phase_matches_source(phase: Phase, source: SourceTag) -> bool {
    match phase {
        Phase::Exploration => matches!(source, SourceTag::Insight | SourceTag::History),
        Phase::Planning => matches!(source, SourceTag::Constraint | SourceTag::Insight),
        Phase::Implementation => matches!(source, SourceTag::Pattern | SourceTag::Constraint),
        Phase::Testing => matches!(source, SourceTag::Pattern | SourceTag::Heuristic),
        Phase::Debugging => matches!(source, SourceTag::Insight | SourceTag::History),
        Phase::Deployment => matches!(source, SourceTag::Safety | SourceTag::Constraint),
    }
}

/// Urgency markers in advice text.
const URGENCY_MARKERS: &[&str] = &["critical", "urgent", "immediately", "must", "breaking"];

fn urgency_boost(text: &str, cap: f64) -> f64 {
    let lower = text.to_lowercase();
    let hits = URGENCY_MARKERS
        .iter()
        .filter(|marker| lower.contains(*marker))
        .count();
    (hits as f64 * 0.04).min(cap)
}

/// Apply the boost chain to a base score.
pub fn boosted_score(
    candidate: &AdviceCandidate,
    phase: Phase,
    tool: &str,
    context: &TaskContext,
    risk: &dyn IRiskSignal,
    config: &GateConfig,
) -> f64 {
    let mut score = base_score(candidate, config);

    // 1. Phase relevance.
    if phase_matches_source(phase, candidate.source) {
        score += config.phase_boost;
    }

    // 2. Capped urgency language.
    score += urgency_boost(&candidate.text, config.urgency_boost_cap);

    // 3. Negative advisory during high-risk phases.
    if candidate.category == AdviceCategory::Caution && phase.is_high_risk() {
        score += config.caution_boost;
    }

    // 4. External outcome risk, when a signal exists.
    if let Some(risk_level) = risk.outcome_risk(tool, context) {
        score += risk_level.clamp(0.0, 1.0) * config.risk_boost_cap;
    }

    score
}
