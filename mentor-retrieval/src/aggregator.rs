//! RetrievalAggregator: fan-out → fuse → rank → dedup → floor → cap.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use mentor_core::config::RetrievalConfig;
use mentor_core::models::{AdviceCandidate, TaskContext};
use mentor_core::traits::{IAdviceProvider, IEffectivenessIndex};

use crate::dedup::dedup_near_identical;
use crate::fanout::fan_out;
use crate::fusion::fuse;
use crate::result_cache::ResultCache;

/// Ranked retrieval output plus diagnostics.
#[derive(Debug, Default)]
pub struct RetrievalOutput {
    /// Ranked candidates, capped and floored.
    pub candidates: Vec<AdviceCandidate>,
    /// Provider name → hit count.
    pub provider_hits: HashMap<String, usize>,
    /// Whether the burst cache satisfied the call.
    pub from_cache: bool,
}

/// The retrieval aggregator. Provider-agnostic: every source implements
/// the same search contract and is queried through the common fan-out.
pub struct RetrievalAggregator {
    providers: Vec<Arc<dyn IAdviceProvider>>,
    effectiveness: Arc<dyn IEffectivenessIndex>,
    /// Burst cache; TTL/capacity fixed at construction.
    result_cache: ResultCache,
}

impl RetrievalAggregator {
    pub fn new(
        providers: Vec<Arc<dyn IAdviceProvider>>,
        effectiveness: Arc<dyn IEffectivenessIndex>,
        config: &RetrievalConfig,
    ) -> Self {
        Self {
            providers,
            effectiveness,
            result_cache: ResultCache::new(
                config.result_cache_ttl_secs,
                config.result_cache_capacity,
            ),
        }
    }

    /// Retrieve ranked advice candidates for an imminent tool call.
    ///
    /// Always returns within the providers' shared deadline envelope; a
    /// provider failure or timeout removes only that provider's
    /// contribution.
    pub async fn advise(
        &self,
        tool_name: &str,
        context: &TaskContext,
        config: &RetrievalConfig,
    ) -> RetrievalOutput {
        let cache_key = ResultCache::key(tool_name, &context.fingerprint());
        if let Some(cached) = self.result_cache.get(&cache_key) {
            debug!(tool = tool_name, "burst cache hit");
            return RetrievalOutput {
                candidates: cached,
                provider_hits: HashMap::new(),
                from_cache: true,
            };
        }

        let query = build_query(tool_name, context);
        let report = fan_out(
            &self.providers,
            &query,
            context,
            Duration::from_millis(config.provider_timeout_ms),
        )
        .await;

        let mut candidates = fuse(
            &report.hits,
            &query,
            &context.active_files,
            self.effectiveness.as_ref(),
            config,
        );

        // Rank by fusion score descending.
        candidates.sort_by(|a, b| {
            b.score
                .value()
                .partial_cmp(&a.score.value())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        // Near-identical dedup keeps the strongest representative.
        let deduped = dedup_near_identical(candidates, config.near_dup_threshold);

        // Floor filter (at-floor retained) and cap.
        let mut kept = apply_floor(deduped, config.score_floor);
        kept.truncate(config.max_candidates);

        info!(
            tool = tool_name,
            raw = report.hits.len(),
            kept = kept.len(),
            "retrieval complete"
        );

        self.result_cache.insert(cache_key, kept.clone());
        RetrievalOutput {
            candidates: kept,
            provider_hits: report.provider_hits,
            from_cache: false,
        }
    }

    /// Drop all burst-cache entries (config reload, tests).
    pub fn invalidate_cache(&self) {
        self.result_cache.invalidate_all();
    }
}

/// Drop candidates below the score floor. The comparison is inclusive:
/// a candidate exactly at the floor is retained.
pub fn apply_floor(candidates: Vec<AdviceCandidate>, floor: f64) -> Vec<AdviceCandidate> {
    candidates
        .into_iter()
        .filter(|c| c.score.meets_floor(floor))
        .collect()
}

/// Build the provider query from the call's observable context.
fn build_query(tool_name: &str, context: &TaskContext) -> String {
    let mut parts = vec![tool_name.to_string()];
    if !context.intent.is_empty() {
        parts.push(context.intent.clone());
    }
    if !context.focus.is_empty() {
        parts.push(context.focus.clone());
    }
    for file in context.active_files.iter().take(4) {
        parts.push(file.clone());
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mentor_core::errors::MentorResult;
    use mentor_core::models::{ProviderHit, SourceTag};
    use mentor_core::traits::NoEffectiveness;

    struct Canned(Vec<ProviderHit>);

    #[async_trait]
    impl IAdviceProvider for Canned {
        fn name(&self) -> &str {
            "canned"
        }
        fn tag(&self) -> SourceTag {
            SourceTag::Pattern
        }
        async fn search(&self, _q: &str, _c: &TaskContext) -> MentorResult<Vec<ProviderHit>> {
            Ok(self.0.clone())
        }
    }

    fn aggregator(hits: Vec<ProviderHit>) -> RetrievalAggregator {
        RetrievalAggregator::new(
            vec![Arc::new(Canned(hits))],
            Arc::new(NoEffectiveness),
            &RetrievalConfig::default(),
        )
    }

    fn strong_hit(text: &str) -> ProviderHit {
        ProviderHit {
            text: text.to_string(),
            source: SourceTag::Constraint,
            confidence: 0.95,
        }
    }

    #[tokio::test]
    async fn results_are_capped() {
        let hits: Vec<ProviderHit> = (0..20)
            .map(|i| strong_hit(&format!("Run distinct check number {i} on module alpha{i}.")))
            .collect();
        let agg = aggregator(hits);
        let config = RetrievalConfig::default();
        let context = TaskContext {
            intent: "modify".to_string(),
            focus: "run check module".to_string(),
            ..Default::default()
        };
        let out = agg.advise("edit_file", &context, &config).await;
        assert!(out.candidates.len() <= config.max_candidates);
    }

    #[tokio::test]
    async fn burst_calls_are_idempotent() {
        let agg = aggregator(vec![strong_hit("Run the module checks before editing.")]);
        let config = RetrievalConfig::default();
        let context = TaskContext {
            focus: "editing module checks".to_string(),
            ..Default::default()
        };
        let first = agg.advise("edit_file", &context, &config).await;
        let second = agg.advise("edit_file", &context, &config).await;
        assert!(!first.from_cache);
        assert!(second.from_cache);
        let ids_first: Vec<_> = first.candidates.iter().map(|c| c.id.clone()).collect();
        let ids_second: Vec<_> = second.candidates.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids_first, ids_second);
    }

    #[tokio::test]
    async fn ranking_is_descending() {
        let hits = vec![
            ProviderHit {
                text: "vaguely related words".to_string(),
                source: SourceTag::Transcript,
                confidence: 0.2,
            },
            strong_hit("Run module checks before editing the parser."),
        ];
        let agg = aggregator(hits);
        let config = RetrievalConfig::default();
        let context = TaskContext {
            focus: "editing the parser module checks".to_string(),
            ..Default::default()
        };
        let out = agg.advise("edit_file", &context, &config).await;
        for pair in out.candidates.windows(2) {
            assert!(pair[0].score.value() >= pair[1].score.value());
        }
    }
}
