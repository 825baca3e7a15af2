//! Tier-1 deterministic template assembly.
//!
//! Shape: "When <context>: <action>. Because <reasoning>." Sub-millisecond
//! and always available as the fallback for tier 2.

use mentor_core::models::{AuthorityDecision, SourceTag, TaskContext};

/// Human-readable grounding for each source class.
fn source_reasoning(source: SourceTag) -> &'static str {
    match source {
        SourceTag::Safety => "a safety rule applies here",
        SourceTag::Constraint => "a project constraint applies here",
        SourceTag::Pattern => "the codebase follows this pattern",
        SourceTag::Insight => "past sessions ran into this",
        SourceTag::History => "recent session history suggests it",
        SourceTag::Heuristic => "tool heuristics suggest it",
        SourceTag::Transcript => "earlier discussion mentioned it",
    }
}

/// Strip a trailing period so clause joins stay clean.
fn trim_clause(text: &str) -> &str {
    text.trim().trim_end_matches('.')
}

/// Compose the tier-1 advisory from emittable decisions.
///
/// The first (strongest) decision fills the template; any further ones
/// are appended as short "Also:" clauses.
pub fn compose_tier1(
    decisions: &[AuthorityDecision],
    tool: &str,
    context: &TaskContext,
) -> String {
    let emittable: Vec<&AuthorityDecision> = decisions
        .iter()
        .filter(|d| d.authority.is_emittable())
        .collect();
    let Some(primary) = emittable.first() else {
        return String::new();
    };

    let when = if context.focus.is_empty() {
        format!("running {tool}")
    } else {
        context.focus.clone()
    };
    let action = trim_clause(&primary.candidate.text);
    let reasoning = source_reasoning(primary.candidate.source);

    let mut text = format!("When {when}: {action}. Because {reasoning}.");
    for extra in emittable.iter().skip(1) {
        text.push_str(&format!(" Also: {}.", trim_clause(&extra.candidate.text)));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_core::models::{AdviceCandidate, AdviceCategory, Authority};
    use mentor_core::Score;

    fn decision(text: &str, authority: Authority) -> AuthorityDecision {
        AuthorityDecision {
            candidate: AdviceCandidate {
                id: "id".to_string(),
                text: text.to_string(),
                source: SourceTag::Pattern,
                relevance: 0.8,
                quality: 0.8,
                trust: 0.8,
                category: AdviceCategory::Process,
                score: Score::new(0.8),
            },
            authority,
            final_score: Score::new(0.8),
            suppression: None,
        }
    }

    #[test]
    fn template_has_all_three_clauses() {
        let context = TaskContext {
            focus: "editing the scheduler".to_string(),
            ..Default::default()
        };
        let text = compose_tier1(&[decision("Run the timer tests.", Authority::Note)], "edit_file", &context);
        assert_eq!(
            text,
            "When editing the scheduler: Run the timer tests. Because the codebase follows this pattern."
        );
    }

    #[test]
    fn empty_focus_falls_back_to_tool_name() {
        let text = compose_tier1(
            &[decision("Check the lockfile.", Authority::Note)],
            "bash",
            &TaskContext::default(),
        );
        assert!(text.starts_with("When running bash: "));
    }

    #[test]
    fn secondary_decisions_become_also_clauses() {
        let text = compose_tier1(
            &[
                decision("Run the timer tests.", Authority::Note),
                decision("Pin the tokio version.", Authority::Whisper),
            ],
            "edit_file",
            &TaskContext::default(),
        );
        assert!(text.contains("Also: Pin the tokio version."));
    }

    #[test]
    fn silent_decisions_produce_nothing() {
        let text = compose_tier1(
            &[decision("ignored", Authority::Silent)],
            "edit_file",
            &TaskContext::default(),
        );
        assert!(text.is_empty());
    }
}
