use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::MentorResult;
use crate::models::{Authority, AuthorityDecision};
use crate::phase::Phase;

/// Input handed to the tier-2 composition backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftAdvisory {
    /// Tier-1 deterministic rendering, always present as the fallback.
    pub tier1_text: String,
    /// Decisions the draft was assembled from.
    pub decisions: Vec<AuthorityDecision>,
    /// Top authority among the decisions.
    pub authority: Authority,
    /// Current task phase.
    pub phase: Phase,
}

/// Enhanced natural-language composition backend (external generation).
///
/// The engine wraps every call in its own hard timeout, strictly smaller
/// than the remaining budget, and falls back to tier-1 output on timeout
/// or error without retry.
#[async_trait]
pub trait IComposerBackend: Send + Sync {
    async fn compose(&self, draft: &DraftAdvisory) -> MentorResult<String>;
}
