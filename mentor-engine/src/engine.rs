//! AdvisoryEngine — call sequencing under the hard wall-clock budget.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::FutureExt;
use tracing::{debug, error, info};

use mentor_cache::PacketStore;
use mentor_core::config::ConfigBus;
use mentor_core::errors::{EngineError, MentorResult};
use mentor_core::models::{
    AdviceItem, AdviseRequest, AdvisoryPacket, Authority, CallDiagnostics, PacketKey,
    SuppressReason,
};
use mentor_core::traits::{
    IAdviceProvider, IComposerBackend, IEffectivenessIndex, IOutputChannel, IRiskSignal,
    ISafetyClassifier, NoRiskSignal,
};
use mentor_core::MentorConfig;
use mentor_gate::QualityGate;
use mentor_retrieval::RetrievalAggregator;
use mentor_session::SessionTracker;
use mentor_synthesis::{Emitter, Synthesizer};

use crate::channel::TracingChannel;
use crate::deadline::Deadline;
use crate::repetition::RepetitionGuard;
use crate::safety::PatternSafetyClassifier;

/// Everything the engine resolved for one emission attempt.
struct Composed {
    text: String,
    authority: Authority,
    advice_ids: Vec<String>,
    packet_id: String,
}

/// The advisory engine. One `advise` call per tool-use event; safe to
/// call concurrently across sessions (all shared state is per-key
/// locked). Failures anywhere degrade to "no advisory emitted."
pub struct AdvisoryEngine {
    bus: Arc<ConfigBus>,
    sessions: Arc<SessionTracker>,
    packets: Arc<PacketStore>,
    aggregator: RetrievalAggregator,
    gate: QualityGate,
    synthesizer: Synthesizer,
    emitter: Emitter,
    safety: Arc<dyn ISafetyClassifier>,
    guard: RepetitionGuard,
}

impl AdvisoryEngine {
    /// Full constructor with every seam injected.
    pub fn new(
        bus: Arc<ConfigBus>,
        providers: Vec<Arc<dyn IAdviceProvider>>,
        composer: Option<Arc<dyn IComposerBackend>>,
        safety: Arc<dyn ISafetyClassifier>,
        channel: Arc<dyn IOutputChannel>,
        risk: Arc<dyn IRiskSignal>,
    ) -> Self {
        let config = bus.current();
        let sessions = Arc::new(SessionTracker::new(config.session.clone()));
        let packets = Arc::new(PacketStore::new());
        let aggregator = RetrievalAggregator::new(
            providers,
            Arc::clone(&packets) as Arc<dyn IEffectivenessIndex>,
            &config.retrieval,
        );
        let gate = QualityGate::new(Arc::clone(&sessions), risk);
        Self {
            bus,
            sessions,
            packets,
            aggregator,
            gate,
            synthesizer: Synthesizer::new(composer),
            emitter: Emitter::new(channel),
            safety,
            guard: RepetitionGuard::new(),
        }
    }

    /// Constructor with the default safety classifier, output channel,
    /// and no risk signal or tier-2 backend.
    pub fn with_defaults(bus: Arc<ConfigBus>, providers: Vec<Arc<dyn IAdviceProvider>>) -> Self {
        Self::new(
            bus,
            providers,
            None,
            Arc::new(PatternSafetyClassifier),
            Arc::new(TracingChannel),
            Arc::new(NoRiskSignal),
        )
    }

    /// Produce at most one advisory for an imminent tool call.
    ///
    /// Never errors and never blocks the tool call beyond the configured
    /// budget: every failure path, including panics, collapses to a
    /// diagnostics record with no emission.
    pub async fn advise(&self, request: &AdviseRequest) -> CallDiagnostics {
        let config = self.bus.current();
        let deadline = Deadline::new(Duration::from_millis(config.engine.budget_ms));
        let mut diagnostics = CallDiagnostics::new(&request.session_id, &request.tool_name);

        let outcome = std::panic::AssertUnwindSafe(self.advise_inner(
            request,
            &config,
            deadline,
            &mut diagnostics,
        ))
        .catch_unwind()
        .await;

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                diagnostics.error_code = Some(e.code().to_string());
                debug!(code = e.code(), error = %e, "call degraded to no advisory");
            }
            Err(_) => {
                diagnostics.error_code = Some("internal_panic".to_string());
                error!("advisory call panicked; no advisory emitted");
            }
        }

        self.log_diagnostics(&diagnostics);
        diagnostics
    }

    async fn advise_inner(
        &self,
        request: &AdviseRequest,
        config: &MentorConfig,
        deadline: Deadline,
        diagnostics: &mut CallDiagnostics,
    ) -> MentorResult<()> {
        let session_id = request.session_id.as_str();
        let tool = request.tool_name.as_str();

        // Stage 1: session load + history update.
        let stage = Instant::now();
        self.sessions
            .record_tool_call(session_id, tool, &request.tool_input);
        let phase = self.sessions.phase(session_id);
        // File paths named in the tool input sharpen retrieval and the
        // obviousness check alongside the caller-declared context.
        let mut context = request.context.clone();
        for hint in mentor_session::extract_file_hints(&request.tool_input) {
            if !context.active_files.contains(&hint) {
                context.active_files.push(hint);
            }
        }
        diagnostics.record_stage("session_load", stage.elapsed().as_millis() as u64);

        // Stage 2: packet lookup.
        deadline.check("packet_lookup")?;
        let stage = Instant::now();
        let key = PacketKey::new(
            session_id,
            tool,
            request.context.intent.as_str(),
            request.plane,
        );
        let hit = self.packets.lookup(&key, &config.cache);
        diagnostics.record_stage("packet_lookup", stage.elapsed().as_millis() as u64);

        let composed = match hit {
            Some(hit) => {
                diagnostics.cache_hit = true;
                // The gate did not run on this path; the session-level
                // repetition and cooldown controls still apply.
                if self.sessions.is_suppressed(session_id, tool) {
                    diagnostics.record_suppression(SuppressReason::ToolCooldown);
                    return Ok(());
                }
                let advice_ids: Vec<String> = hit
                    .packet
                    .items
                    .iter()
                    .map(|item| item.advice_id.clone())
                    .collect();
                if advice_ids
                    .iter()
                    .any(|id| self.sessions.is_shown(session_id, id))
                {
                    diagnostics.record_suppression(SuppressReason::AlreadyShown);
                    return Ok(());
                }
                Composed {
                    text: hit.packet.text.clone(),
                    authority: hit.packet.authority,
                    advice_ids,
                    packet_id: hit.packet.id.clone(),
                }
            }
            None => {
                match self
                    .compose(request, &context, config, deadline, phase, diagnostics, key)
                    .await?
                {
                    Some(composed) => composed,
                    None => return Ok(()),
                }
            }
        };
        diagnostics.authority = Some(composed.authority);
        diagnostics.packet_id = Some(composed.packet_id.clone());

        // Global repetition controls: exact text and advice identity.
        deadline.check("emission")?;
        let fingerprint = AdvisoryPacket::fingerprint_text(&composed.text);
        if !self
            .guard
            .text_allows(&fingerprint, config.engine.text_dedup_cooldown_secs)
        {
            diagnostics.record_suppression(SuppressReason::CrossSessionDuplicate);
            return Ok(());
        }
        if composed
            .advice_ids
            .iter()
            .any(|id| !self.guard.advice_allows(id, config.engine.advice_cooldown_secs))
        {
            diagnostics.record_suppression(SuppressReason::AdviceCooldown);
            return Ok(());
        }

        // Unconditional safety check, every path, immediately before
        // emission. Classifier failure counts as unsafe.
        let stage = Instant::now();
        let is_unsafe = self.safety.is_unsafe(&composed.text).unwrap_or(true);
        diagnostics.record_stage("safety", stage.elapsed().as_millis() as u64);
        if is_unsafe {
            diagnostics.record_suppression(SuppressReason::UnsafeContent);
            return Err(EngineError::UnsafeContent.into());
        }

        // Emission: the single agent-visible side effect.
        let stage = Instant::now();
        let emitted = self
            .emitter
            .emit(&composed.text, composed.authority, &config.synthesis);
        diagnostics.emitted = emitted;
        diagnostics.record_stage("emit", stage.elapsed().as_millis() as u64);

        // Post-call bookkeeping.
        if emitted {
            let stage = Instant::now();
            for advice_id in &composed.advice_ids {
                self.sessions.mark_shown(session_id, advice_id);
            }
            self.guard.record(&composed.advice_ids, &fingerprint);
            self.packets.record_delivery(&composed.packet_id);
            diagnostics.record_stage("bookkeeping", stage.elapsed().as_millis() as u64);
        }
        Ok(())
    }

    /// Cache-miss path: retrieval → gate → synthesis → packet store.
    #[allow(clippy::too_many_arguments)]
    async fn compose(
        &self,
        request: &AdviseRequest,
        context: &mentor_core::models::TaskContext,
        config: &MentorConfig,
        deadline: Deadline,
        phase: mentor_core::Phase,
        diagnostics: &mut CallDiagnostics,
        key: PacketKey,
    ) -> MentorResult<Option<Composed>> {
        let session_id = request.session_id.as_str();
        let tool = request.tool_name.as_str();

        // Stage 3: retrieval fan-out, bounded by the remaining budget.
        deadline.check("retrieval")?;
        let stage = Instant::now();
        let retrieval = tokio::time::timeout(
            deadline.remaining(),
            self.aggregator.advise(tool, context, &config.retrieval),
        )
        .await
        .map_err(|_| EngineError::BudgetExceeded {
            stage: "retrieval".to_string(),
            elapsed_ms: deadline.elapsed().as_millis() as u64,
        })?;
        diagnostics.provider_hits = retrieval.provider_hits;
        diagnostics.record_stage("retrieval", stage.elapsed().as_millis() as u64);
        if retrieval.candidates.is_empty() {
            debug!(tool, "no candidates above floor");
            return Ok(None);
        }

        // Stage 4: quality gate.
        deadline.check("gate")?;
        let stage = Instant::now();
        let decisions = self.gate.evaluate(
            &retrieval.candidates,
            session_id,
            tool,
            context,
            phase,
            &config.gate,
        );
        for decision in &decisions {
            if let Some(reason) = &decision.suppression {
                diagnostics.record_suppression(reason.clone());
            }
        }
        diagnostics.final_score = decisions.first().map(|d| d.final_score.value());
        diagnostics.record_stage("gate", stage.elapsed().as_millis() as u64);

        // Stage 5: synthesis (tier 2 inside its own nested deadline).
        deadline.check("synthesis")?;
        let stage = Instant::now();
        let synthesis = self
            .synthesizer
            .synthesize(
                &decisions,
                tool,
                context,
                phase,
                deadline.remaining(),
                &config.synthesis,
            )
            .await;
        diagnostics.record_stage("synthesis", stage.elapsed().as_millis() as u64);
        let Some(output) = synthesis else {
            return Ok(None);
        };

        // Persist the packet for future exact/relaxed hits.
        let items: Vec<AdviceItem> = decisions
            .iter()
            .filter(|d| d.authority.is_emittable())
            .map(|d| AdviceItem {
                advice_id: d.candidate.id.clone(),
                text: d.candidate.text.clone(),
                source: d.candidate.source,
                score: d.final_score.value(),
            })
            .collect();
        let advice_ids: Vec<String> = items.iter().map(|i| i.advice_id.clone()).collect();
        let packet = AdvisoryPacket::new(
            key,
            output.text.clone(),
            output.authority,
            items,
            config.cache.packet_ttl_secs,
        );
        let packet_id = packet.id.clone();
        self.packets.store(packet, &config.cache);

        Ok(Some(Composed {
            text: output.text,
            authority: output.authority,
            advice_ids,
            packet_id,
        }))
    }

    /// Route observed feedback into the packet store.
    ///
    /// Accepts either a packet id or an advice id; the advice-id form
    /// updates every packet still carrying that advice.
    pub fn record_feedback(
        &self,
        packet_or_advice_id: &str,
        helpful: Option<bool>,
        followed: Option<bool>,
    ) -> bool {
        if self
            .packets
            .record_feedback(packet_or_advice_id, helpful, followed)
        {
            return true;
        }
        self.packets
            .record_feedback_by_advice(packet_or_advice_id, helpful, followed)
            > 0
    }

    /// Record the outcome of the tool call this engine advised on.
    pub fn record_outcome(&self, session_id: &str, success: bool) {
        self.sessions.record_outcome(session_id, success);
    }

    /// Invalidate packets whose full content references the file hint.
    pub fn invalidate_packets(&self, file_hint: &str) -> Vec<String> {
        self.packets.invalidate_packets(file_hint)
    }

    /// Put a tool under cooldown for one session.
    pub fn suppress_tool(&self, session_id: &str, tool: &str, duration: chrono::Duration) {
        self.sessions.suppress_tool(session_id, tool, duration);
    }

    /// Session tracker handle (maintenance, tests).
    pub fn sessions(&self) -> &Arc<SessionTracker> {
        &self.sessions
    }

    /// Packet store handle (maintenance, tests).
    pub fn packets(&self) -> &Arc<PacketStore> {
        &self.packets
    }

    /// Repetition guard handle (maintenance).
    pub fn repetition_guard(&self) -> &RepetitionGuard {
        &self.guard
    }

    /// Config bus handle.
    pub fn config_bus(&self) -> &Arc<ConfigBus> {
        &self.bus
    }

    /// One structured record per call on the diagnostics channel.
    fn log_diagnostics(&self, diagnostics: &CallDiagnostics) {
        let record = serde_json::to_string(diagnostics).unwrap_or_default();
        info!(
            target: "mentor::diagnostics",
            session = %diagnostics.session_id,
            tool = %diagnostics.tool_name,
            emitted = diagnostics.emitted,
            cache_hit = diagnostics.cache_hit,
            elapsed_ms = diagnostics.total_elapsed_ms(),
            record = %record,
            "advisory call complete"
        );
    }
}
