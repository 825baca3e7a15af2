//! Near-identical text deduplication before ranking.
//!
//! Token-set Jaccard similarity; above the threshold only the
//! higher-scoring representative survives.

use std::collections::HashSet;

use mentor_core::models::AdviceCandidate;

/// Jaccard similarity over lowercase token sets.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    let ta: HashSet<&str> = a.split_whitespace().collect();
    let tb: HashSet<&str> = b.split_whitespace().collect();
    if ta.is_empty() && tb.is_empty() {
        return 1.0;
    }
    let intersection = ta.intersection(&tb).count() as f64;
    let union = ta.union(&tb).count() as f64;
    intersection / union
}

/// Drop near-duplicates, keeping the higher-scoring representative.
///
/// Input must already be sorted by score descending; survivors keep that
/// order.
pub fn dedup_near_identical(candidates: Vec<AdviceCandidate>, threshold: f64) -> Vec<AdviceCandidate> {
    let mut kept: Vec<AdviceCandidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let lower = candidate.text.to_lowercase();
        let duplicate = kept.iter().any(|existing| {
            existing.id == candidate.id
                || text_similarity(&existing.text.to_lowercase(), &lower) >= threshold
        });
        if !duplicate {
            kept.push(candidate);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_core::models::{AdviceCategory, SourceTag};
    use mentor_core::Score;

    fn candidate(text: &str, score: f64) -> AdviceCandidate {
        AdviceCandidate {
            id: AdviceCandidate::compute_id(text, SourceTag::Insight),
            text: text.to_string(),
            source: SourceTag::Insight,
            relevance: 0.5,
            quality: 0.5,
            trust: 0.5,
            category: AdviceCategory::Process,
            score: Score::new(score),
        }
    }

    #[test]
    fn identical_similarity_is_one() {
        assert!((text_similarity("run the tests", "run the tests") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn near_identical_texts_collapse_to_strongest() {
        let candidates = vec![
            candidate("always run the full test suite before pushing", 0.9),
            candidate("always run the full test suite before pushing now", 0.7),
            candidate("pin dependency versions in the lockfile", 0.6),
        ];
        let out = dedup_near_identical(candidates, 0.85);
        assert_eq!(out.len(), 2);
        assert!(out[0].text.starts_with("always run"));
        assert!((out[0].score.value() - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn distinct_texts_all_survive() {
        let candidates = vec![
            candidate("run the linter", 0.9),
            candidate("check the changelog", 0.8),
        ];
        assert_eq!(dedup_near_identical(candidates, 0.85).len(), 2);
    }
}
