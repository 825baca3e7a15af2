//! Provider fan-out under per-call deadlines.
//!
//! Each provider is queried concurrently; a timeout or error removes that
//! provider's contribution only. The fan-out itself always returns.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::timeout;
use tracing::{debug, warn};

use mentor_core::models::{ProviderHit, TaskContext};
use mentor_core::traits::IAdviceProvider;
use mentor_core::Outcome;

/// What the fan-out observed, for diagnostics.
#[derive(Debug, Default)]
pub struct FanoutReport {
    /// All surviving hits across providers.
    pub hits: Vec<ProviderHit>,
    /// Provider name → hit count (0 for failed/timed-out providers).
    pub provider_hits: HashMap<String, usize>,
    /// Provider name → outcome label (success / error / timeout).
    pub provider_outcomes: HashMap<String, &'static str>,
}

/// Query every provider concurrently, each bounded by `provider_timeout`.
pub async fn fan_out(
    providers: &[Arc<dyn IAdviceProvider>],
    query: &str,
    context: &TaskContext,
    provider_timeout: Duration,
) -> FanoutReport {
    let calls = providers.iter().map(|provider| {
        let provider = Arc::clone(provider);
        async move {
            let name = provider.name().to_string();
            let outcome: Outcome<Vec<ProviderHit>> =
                match timeout(provider_timeout, provider.search(query, context)).await {
                    Ok(Ok(hits)) => Outcome::Success(hits),
                    Ok(Err(e)) => Outcome::Error(e.to_string()),
                    Err(_) => Outcome::TimedOut(provider_timeout),
                };
            (name, outcome)
        }
    });

    let mut report = FanoutReport::default();
    for (name, outcome) in join_all(calls).await {
        report.provider_outcomes.insert(name.clone(), outcome.label());
        match &outcome {
            Outcome::Success(hits) => {
                debug!(provider = %name, hits = hits.len(), "provider returned");
            }
            Outcome::Error(reason) => {
                warn!(provider = %name, reason = %reason, "provider failed, skipping");
            }
            Outcome::TimedOut(after) => {
                warn!(provider = %name, after_ms = after.as_millis() as u64, "provider timed out, skipping");
            }
        }
        let hits = outcome.collapse();
        report.provider_hits.insert(name, hits.len());
        report.hits.extend(hits);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mentor_core::errors::{MentorResult, RetrievalError};
    use mentor_core::models::SourceTag;

    struct Good;
    #[async_trait]
    impl IAdviceProvider for Good {
        fn name(&self) -> &str {
            "good"
        }
        fn tag(&self) -> SourceTag {
            SourceTag::Insight
        }
        async fn search(&self, _q: &str, _c: &TaskContext) -> MentorResult<Vec<ProviderHit>> {
            Ok(vec![ProviderHit {
                text: "run the tests".to_string(),
                source: SourceTag::Insight,
                confidence: 0.8,
            }])
        }
    }

    struct Failing;
    #[async_trait]
    impl IAdviceProvider for Failing {
        fn name(&self) -> &str {
            "failing"
        }
        fn tag(&self) -> SourceTag {
            SourceTag::History
        }
        async fn search(&self, _q: &str, _c: &TaskContext) -> MentorResult<Vec<ProviderHit>> {
            Err(RetrievalError::ProviderFailed {
                provider: "failing".to_string(),
                reason: "backend down".to_string(),
            }
            .into())
        }
    }

    struct Slow;
    #[async_trait]
    impl IAdviceProvider for Slow {
        fn name(&self) -> &str {
            "slow"
        }
        fn tag(&self) -> SourceTag {
            SourceTag::Pattern
        }
        async fn search(&self, _q: &str, _c: &TaskContext) -> MentorResult<Vec<ProviderHit>> {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn failure_and_timeout_lose_only_their_contribution() {
        let providers: Vec<Arc<dyn IAdviceProvider>> =
            vec![Arc::new(Good), Arc::new(Failing), Arc::new(Slow)];
        let report = fan_out(
            &providers,
            "query",
            &TaskContext::default(),
            Duration::from_millis(50),
        )
        .await;

        assert_eq!(report.hits.len(), 1);
        assert_eq!(report.provider_hits["good"], 1);
        assert_eq!(report.provider_hits["failing"], 0);
        assert_eq!(report.provider_hits["slow"], 0);
        assert_eq!(report.provider_outcomes["failing"], "error");
        assert_eq!(report.provider_outcomes["slow"], "timeout");
    }
}
