//! QualityGate — evaluates ranked candidates into authority decisions.

use std::sync::Arc;

use tracing::debug;

use mentor_core::config::GateConfig;
use mentor_core::models::{AdviceCandidate, Authority, AuthorityDecision, TaskContext};
use mentor_core::traits::IRiskSignal;
use mentor_core::{Phase, Score};
use mentor_session::SessionTracker;

use crate::authority::map_authority;
use crate::boosts::boosted_score;
use crate::suppression::SuppressionChain;

/// The quality gate. Pure over its inputs apart from lazy TTL pruning in
/// the session ledger; no decision mutates shown-state (the orchestrator
/// records shown advice only after emission succeeds).
pub struct QualityGate {
    sessions: Arc<SessionTracker>,
    risk: Arc<dyn IRiskSignal>,
}

impl QualityGate {
    pub fn new(sessions: Arc<SessionTracker>, risk: Arc<dyn IRiskSignal>) -> Self {
        Self { sessions, risk }
    }

    /// Evaluate candidates in rank order.
    ///
    /// Every candidate gets a decision; suppressed ones become SILENT
    /// with their specific reason attached.
    pub fn evaluate(
        &self,
        candidates: &[AdviceCandidate],
        session_id: &str,
        tool: &str,
        context: &TaskContext,
        phase: Phase,
        config: &GateConfig,
    ) -> Vec<AuthorityDecision> {
        let mut chain = SuppressionChain::new(
            &self.sessions,
            session_id,
            tool,
            context,
            config.emission_budget,
        );

        candidates
            .iter()
            .map(|candidate| {
                let score = boosted_score(
                    candidate,
                    phase,
                    tool,
                    context,
                    self.risk.as_ref(),
                    config,
                );
                let mut authority = map_authority(score, candidate.source, config);
                let mut suppression = None;

                if authority.is_emittable() {
                    match chain.check(&candidate.id, &candidate.text) {
                        Some(reason) => {
                            debug!(advice_id = %candidate.id, reason = %reason, "suppressed");
                            suppression = Some(reason);
                            authority = Authority::Silent;
                        }
                        None => chain.grant(),
                    }
                }

                AuthorityDecision {
                    candidate: candidate.clone(),
                    authority,
                    final_score: Score::new(score),
                    suppression,
                }
            })
            .collect()
    }
}
