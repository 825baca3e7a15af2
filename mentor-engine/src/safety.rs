//! Default unsafe-content classifier.
//!
//! Pattern-based: advisory text that would leak credentials or push the
//! agent toward destructive commands is suppressed before emission. A
//! classifier failure counts as unsafe; the advisory is optional, the
//! check is not.

use regex::Regex;
use std::sync::OnceLock;

use mentor_core::errors::MentorResult;
use mentor_core::traits::ISafetyClassifier;

fn unsafe_patterns() -> &'static Vec<Regex> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            Regex::new(r"(?i)(password|passwd|api[_-]?key|secret|token)\s*[:=]\s*\S+").unwrap(),
            Regex::new(r"(?i)-----BEGIN [A-Z ]*PRIVATE KEY-----").unwrap(),
            Regex::new(r"rm\s+-rf\s+[/~]").unwrap(),
            Regex::new(r"(?i)curl[^|]*\|\s*(ba)?sh").unwrap(),
            Regex::new(r"(?i)git\s+push\s+--force\s+\S*\s*(main|master)").unwrap(),
            Regex::new(r"(?i)DROP\s+(TABLE|DATABASE)\s").unwrap(),
            Regex::new(r"(?i)chmod\s+777\s+/").unwrap(),
        ]
    })
}

/// Regex-backed safety classifier.
pub struct PatternSafetyClassifier;

impl ISafetyClassifier for PatternSafetyClassifier {
    fn is_unsafe(&self, text: &str) -> MentorResult<bool> {
        Ok(unsafe_patterns().iter().any(|re| re.is_match(text)))
    }
}
