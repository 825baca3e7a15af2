//! Actionability heuristic for advice text.
//!
//! Scores how directly a piece of text tells the agent what to do.
//! Feeds the quality component as max(actionability, source tier).

/// Imperative leads that mark directly actionable advice.
const IMPERATIVE_LEADS: &[&str] = &[
    "run", "use", "avoid", "check", "verify", "add", "remove", "prefer", "never", "always",
    "ensure", "update", "set", "keep", "do not", "don't", "test", "restart", "pin",
];

/// Score actionability of advice text in [0, 1].
pub fn actionability(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let lower = trimmed.to_lowercase();
    let mut score: f64 = 0.2;

    // Imperative lead-in.
    if IMPERATIVE_LEADS
        .iter()
        .any(|lead| lower.starts_with(lead))
    {
        score += 0.35;
    } else if lower
        .split(". ")
        .any(|sentence| IMPERATIVE_LEADS.iter().any(|lead| sentence.starts_with(lead)))
    {
        score += 0.20;
    }

    // Concrete references: a path, a flag, or a backticked command.
    if lower.contains('/') || lower.contains("--") || trimmed.contains('`') {
        score += 0.25;
    }

    // Length band: one to three sentences is the sweet spot. Fragments
    // carry no instruction; walls of text bury it.
    let words = trimmed.split_whitespace().count();
    if (4..=60).contains(&words) {
        score += 0.20;
    } else if words > 120 {
        score -= 0.15;
    }

    score.clamp(0.0, 1.0)
}
