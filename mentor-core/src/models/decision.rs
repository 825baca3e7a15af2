//! Gate output: authority tiers and suppression reasons.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::candidate::AdviceCandidate;
use super::score::Score;

/// Discrete authority tier controlling whether and how advice surfaces.
///
/// Ordered from strongest to weakest. `Silent` is always logged and never
/// emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Authority {
    Silent,
    Whisper,
    Note,
    Warning,
    Block,
}

impl Authority {
    /// Whether this tier produces agent-visible output.
    pub fn is_emittable(self) -> bool {
        self != Authority::Silent
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Authority::Block => "block",
            Authority::Warning => "warning",
            Authority::Note => "note",
            Authority::Whisper => "whisper",
            Authority::Silent => "silent",
        };
        write!(f, "{name}")
    }
}

/// Why a candidate was forced to `Silent` (or an emission withheld).
///
/// Every suppression carries its specific reason so diagnostics can tell
/// the filter stages apart even though the visible result is identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressReason {
    /// Shown to this session within the shown-advice TTL.
    AlreadyShown,
    /// The target tool is under an active cooldown.
    ToolCooldown,
    /// The advice restates what the current context already makes obvious.
    ObviousFromContext,
    /// The per-call emission budget was already spent.
    EmissionBudget,
    /// Same advice id emitted recently (global advice-id cooldown).
    AdviceCooldown,
    /// Byte-identical text emitted recently in any session.
    CrossSessionDuplicate,
    /// The safety classifier flagged the final text.
    UnsafeContent,
}

impl fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SuppressReason::AlreadyShown => "already_shown",
            SuppressReason::ToolCooldown => "tool_cooldown",
            SuppressReason::ObviousFromContext => "obvious_from_context",
            SuppressReason::EmissionBudget => "emission_budget",
            SuppressReason::AdviceCooldown => "advice_cooldown",
            SuppressReason::CrossSessionDuplicate => "cross_session_duplicate",
            SuppressReason::UnsafeContent => "unsafe_content",
        };
        write!(f, "{name}")
    }
}

/// A gate decision for one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorityDecision {
    /// The evaluated candidate.
    pub candidate: AdviceCandidate,
    /// Granted authority tier.
    pub authority: Authority,
    /// Final gate score after boosts.
    pub final_score: Score,
    /// Set when the candidate was suppressed to `Silent`.
    pub suppression: Option<SuppressReason>,
}
