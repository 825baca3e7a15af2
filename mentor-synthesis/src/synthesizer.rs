//! Two-tier synthesizer.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

use mentor_core::config::SynthesisConfig;
use mentor_core::models::{Authority, AuthorityDecision, TaskContext};
use mentor_core::traits::{DraftAdvisory, IComposerBackend};
use mentor_core::Phase;

use crate::template::compose_tier1;
use crate::truncate::truncate_preserving_action;

/// Synthesized advisory text plus which tier produced it.
#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    pub text: String,
    pub authority: Authority,
    pub tier2_used: bool,
}

/// Composes advisory text from gate decisions.
pub struct Synthesizer {
    backend: Option<Arc<dyn IComposerBackend>>,
}

impl Synthesizer {
    pub fn new(backend: Option<Arc<dyn IComposerBackend>>) -> Self {
        Self { backend }
    }

    /// Synthesize one advisory. Returns `None` when no decision may emit.
    ///
    /// Tier 2 runs only when toggled on, a backend exists, the top
    /// authority qualifies, and enough engine budget remains; its own
    /// deadline is strictly smaller than the remaining budget and a
    /// timeout or error falls back to tier-1 output without retry.
    pub async fn synthesize(
        &self,
        decisions: &[AuthorityDecision],
        tool: &str,
        context: &TaskContext,
        phase: Phase,
        remaining_budget: Duration,
        config: &SynthesisConfig,
    ) -> Option<SynthesisOutput> {
        let tier1 = compose_tier1(decisions, tool, context);
        if tier1.is_empty() {
            return None;
        }
        let authority = decisions
            .iter()
            .filter(|d| d.authority.is_emittable())
            .map(|d| d.authority)
            .max()
            .unwrap_or(Authority::Silent);

        let remaining_ms = remaining_budget.as_millis() as u64;
        let tier2_eligible = config.tier2_enabled
            && authority >= config.tier2_min_authority
            && remaining_ms >= config.tier2_min_budget_ms;

        if let (true, Some(backend)) = (tier2_eligible, self.backend.as_ref()) {
            let draft = DraftAdvisory {
                tier1_text: tier1.clone(),
                decisions: decisions.to_vec(),
                authority,
                phase,
            };
            // Hard deadline strictly below the remaining engine budget.
            let deadline_ms = config
                .tier2_timeout_ms
                .min(remaining_ms.saturating_sub(100).max(1));
            match timeout(Duration::from_millis(deadline_ms), backend.compose(&draft)).await {
                Ok(Ok(composed)) if !composed.trim().is_empty() => {
                    debug!("tier-2 composition succeeded");
                    return Some(SynthesisOutput {
                        text: truncate_preserving_action(composed.trim(), config.max_chars),
                        authority,
                        tier2_used: true,
                    });
                }
                Ok(Ok(_)) => {
                    warn!("tier-2 returned empty text, using tier-1");
                }
                Ok(Err(e)) => {
                    warn!(error = %e, "tier-2 composition failed, using tier-1");
                }
                Err(_) => {
                    warn!(deadline_ms, "tier-2 composition timed out, using tier-1");
                }
            }
        }

        Some(SynthesisOutput {
            text: truncate_preserving_action(&tier1, config.max_chars),
            authority,
            tier2_used: false,
        })
    }
}
