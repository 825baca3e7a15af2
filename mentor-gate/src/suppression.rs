//! Fixed-order suppression filter chain.
//!
//! Evaluated per candidate, short-circuiting at the first failure. Each
//! failure records its specific reason for diagnostics even though the
//! candidate uniformly becomes SILENT.

use std::collections::HashSet;

use mentor_core::models::{SuppressReason, TaskContext};
use mentor_session::SessionTracker;

/// Words too common to signal anything on their own.
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "to", "of", "in", "on", "for", "is", "are", "be", "this", "that", "with",
    "and", "or", "when", "before", "after", "your", "you",
];

/// Whether advice text restates what the current context already shows.
///
/// True when every content-bearing token of the advice already appears in
/// the tool name, focus text, or active file list.
pub fn is_obvious(text: &str, tool: &str, context: &TaskContext) -> bool {
    let known: HashSet<String> = format!(
        "{} {} {}",
        tool,
        context.focus,
        context.active_files.join(" ")
    )
    .to_lowercase()
    .split(|c: char| !c.is_alphanumeric() && c != '_' && c != '/' && c != '.')
    .filter(|t| !t.is_empty())
    .map(|t| t.to_string())
    .collect();

    let content_tokens: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_' && c != '/' && c != '.')
        .filter(|t| t.len() > 2 && !STOPWORDS.contains(t))
        .map(|t| t.to_string())
        .collect();

    !content_tokens.is_empty() && content_tokens.iter().all(|t| known.contains(t))
}

/// The per-call suppression chain. Holds the running emission count so
/// the budget check sees earlier grants within the same call.
pub struct SuppressionChain<'a> {
    sessions: &'a SessionTracker,
    session_id: &'a str,
    tool: &'a str,
    context: &'a TaskContext,
    emission_budget: usize,
    granted: usize,
}

impl<'a> SuppressionChain<'a> {
    pub fn new(
        sessions: &'a SessionTracker,
        session_id: &'a str,
        tool: &'a str,
        context: &'a TaskContext,
        emission_budget: usize,
    ) -> Self {
        Self {
            sessions,
            session_id,
            tool,
            context,
            emission_budget,
            granted: 0,
        }
    }

    /// Run the chain for one candidate. `None` means the candidate may
    /// emit; the caller must then call [`SuppressionChain::grant`].
    pub fn check(&mut self, advice_id: &str, text: &str) -> Option<SuppressReason> {
        // 1. Already shown within the ledger TTL.
        if self.sessions.is_shown(self.session_id, advice_id) {
            return Some(SuppressReason::AlreadyShown);
        }
        // 2. Tool under cooldown.
        if self.sessions.is_suppressed(self.session_id, self.tool) {
            return Some(SuppressReason::ToolCooldown);
        }
        // 3. Obvious from current context.
        if is_obvious(text, self.tool, self.context) {
            return Some(SuppressReason::ObviousFromContext);
        }
        // 4. Per-call emission budget.
        if self.granted >= self.emission_budget {
            return Some(SuppressReason::EmissionBudget);
        }
        None
    }

    /// Count a granted emission against the per-call budget.
    pub fn grant(&mut self) {
        self.granted += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advice_restating_context_is_obvious() {
        let context = TaskContext {
            intent: "modify".to_string(),
            focus: "editing the parser module".to_string(),
            active_files: vec!["src/parser.rs".to_string()],
        };
        assert!(is_obvious("editing parser module", "edit_file", &context));
    }

    #[test]
    fn advice_with_new_information_is_not_obvious() {
        let context = TaskContext {
            intent: "modify".to_string(),
            focus: "editing the parser module".to_string(),
            active_files: vec![],
        };
        assert!(!is_obvious(
            "Run the grammar snapshot tests after editing the parser",
            "edit_file",
            &context
        ));
    }

    #[test]
    fn empty_advice_is_not_obvious() {
        assert!(!is_obvious("", "edit_file", &TaskContext::default()));
    }
}
