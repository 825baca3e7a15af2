//! Fusion scoring: score = wr·relevance + wq·quality + wt·trust.
//!
//! quality = max(actionability(text), source_tier(source));
//! trust = max(provider confidence, measured effectiveness).
//! Source tiers bound but never override relevance. The noise penalty is
//! applied after the blend.

use std::collections::HashSet;

use mentor_core::config::RetrievalConfig;
use mentor_core::models::{AdviceCandidate, AdviceCategory, ProviderHit};
use mentor_core::traits::IEffectivenessIndex;
use mentor_core::Score;

use crate::actionability::actionability;
use crate::noise::noise_penalty;

/// Lexical relevance of a hit to the query in [0, 1].
///
/// Token-overlap similarity: |query ∩ text| / |query|, with a small boost
/// when the text mentions an active file. Providers have already done
/// semantic narrowing; this re-grounds their output in the actual call.
pub fn relevance(query: &str, text: &str, active_files: &[String]) -> f64 {
    let query_tokens: HashSet<String> = tokenize(query);
    if query_tokens.is_empty() {
        return 0.0;
    }
    let text_tokens: HashSet<String> = tokenize(text);
    let overlap = query_tokens.intersection(&text_tokens).count() as f64;
    let base = overlap / query_tokens.len() as f64;

    let file_bonus = if active_files.iter().any(|f| text.contains(f.as_str())) {
        0.15
    } else {
        0.0
    };

    (base + file_bonus).clamp(0.0, 1.0)
}

fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_' && c != '/' && c != '.')
        .filter(|t| t.len() > 2)
        .map(|t| t.to_string())
        .collect()
}

/// Infer a broad category from advice text, for gate boosts.
fn categorize(text: &str) -> AdviceCategory {
    let lower = text.to_lowercase();
    if lower.contains("never")
        || lower.contains("do not")
        || lower.contains("don't")
        || lower.contains("avoid")
        || lower.contains("danger")
        || lower.contains("careful")
    {
        AdviceCategory::Caution
    } else if lower.contains("slow") || lower.contains("performance") || lower.contains("memory") {
        AdviceCategory::Performance
    } else if lower.contains("bug") || lower.contains("incorrect") || lower.contains("breaks") {
        AdviceCategory::Correctness
    } else if lower.contains("format") || lower.contains("style") || lower.contains("naming") {
        AdviceCategory::Style
    } else {
        AdviceCategory::Process
    }
}

/// Fuse raw provider hits into scored candidates. Unranked, unfiltered;
/// the aggregator sorts, deduplicates, floors, and caps.
pub fn fuse(
    hits: &[ProviderHit],
    query: &str,
    active_files: &[String],
    effectiveness: &dyn IEffectivenessIndex,
    config: &RetrievalConfig,
) -> Vec<AdviceCandidate> {
    hits.iter()
        .map(|hit| {
            let id = AdviceCandidate::compute_id(&hit.text, hit.source);

            let rel = relevance(query, &hit.text, active_files);
            let quality = actionability(&hit.text).max(hit.source.tier());
            let measured = effectiveness.measured_effectiveness(&id).unwrap_or(0.0);
            let trust = hit.confidence.clamp(0.0, 1.0).max(measured);

            let blended = config.weights.relevance * rel
                + config.weights.quality * quality
                + config.weights.trust * trust;
            let penalized = blended
                * noise_penalty(
                    &hit.text,
                    config.noise_penalty_severe,
                    config.noise_penalty_moderate,
                    config.noise_penalty_mild,
                );

            AdviceCandidate {
                id,
                text: hit.text.clone(),
                source: hit.source,
                relevance: rel,
                quality,
                trust,
                category: categorize(&hit.text),
                score: Score::new(penalized),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_core::models::SourceTag;
    use mentor_core::traits::NoEffectiveness;

    fn hit(text: &str, source: SourceTag, confidence: f64) -> ProviderHit {
        ProviderHit {
            text: text.to_string(),
            source,
            confidence,
        }
    }

    #[test]
    fn relevance_rewards_token_overlap() {
        let high = relevance("edit the parser module", "Check the parser module tests", &[]);
        let low = relevance("edit the parser module", "Database migrations are pending", &[]);
        assert!(high > low);
    }

    #[test]
    fn active_file_mention_boosts_relevance() {
        let files = vec!["src/parser.rs".to_string()];
        let with = relevance("edit parser", "src/parser.rs uses a pratt parser", &files);
        let without = relevance("edit parser", "a pratt parser is used", &files);
        assert!(with > without);
    }

    #[test]
    fn fusion_score_stays_in_unit_interval() {
        let hits = vec![hit("Run tests before editing.", SourceTag::Safety, 1.0)];
        let out = fuse(&hits, "edit", &[], &NoEffectiveness, &RetrievalConfig::default());
        assert!(out[0].score.value() <= 1.0);
        assert!(out[0].score.value() >= 0.0);
    }

    #[test]
    fn noise_penalty_drops_log_spam() {
        let config = RetrievalConfig::default();
        let clean = hit("Run the linter before committing changes.", SourceTag::Insight, 0.9);
        let noisy = hit(
            "2024-01-01 10:00:00 error: connection refused while committing changes",
            SourceTag::Insight,
            0.9,
        );
        let out = fuse(
            &[clean, noisy],
            "committing changes",
            &[],
            &NoEffectiveness,
            &config,
        );
        assert!(out[0].score.value() > out[1].score.value());
    }

    #[test]
    fn measured_effectiveness_lifts_trust() {
        struct Fixed;
        impl IEffectivenessIndex for Fixed {
            fn measured_effectiveness(&self, _id: &str) -> Option<f64> {
                Some(0.9)
            }
        }
        let config = RetrievalConfig::default();
        let h = hit("Run tests first.", SourceTag::Heuristic, 0.1);
        let boosted = fuse(&[h.clone()], "tests", &[], &Fixed, &config);
        let plain = fuse(&[h], "tests", &[], &NoEffectiveness, &config);
        assert!(boosted[0].trust > plain[0].trust);
    }

    #[test]
    fn cautionary_text_is_categorized() {
        let hits = vec![hit("Never force-push to main.", SourceTag::Constraint, 0.8)];
        let out = fuse(&hits, "push", &[], &NoEffectiveness, &RetrievalConfig::default());
        assert_eq!(out[0].category, AdviceCategory::Caution);
    }
}
