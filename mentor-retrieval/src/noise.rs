//! Low-signal text detection.
//!
//! Some providers surface raw material (verbatim logs, metadata-only
//! strings, transcript fragments) that scores well lexically but carries
//! no guidance. A multiplicative penalty is applied after the fusion
//! blend, tiered by severity.

use regex::Regex;
use std::sync::OnceLock;

/// Severity tiers, strongest penalty first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseSeverity {
    /// Verbatim logs, stack traces, tracebacks.
    Severe,
    /// Metadata-only strings (ids, timestamps, key=value dumps).
    Moderate,
    /// Raw conversational transcript fragments.
    Mild,
}

fn severe_patterns() -> &'static Vec<Regex> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            Regex::new(r"(?i)traceback \(most recent call last\)").unwrap(),
            Regex::new(r"(?i)^\s*(error|warn|info|debug|trace)\[?[:\]]").unwrap(),
            Regex::new(r"at [\w$.]+\([\w./ :-]+:\d+:\d+\)").unwrap(),
            Regex::new(r"(?i)panicked at ").unwrap(),
            Regex::new(r"\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}").unwrap(),
        ]
    })
}

fn moderate_patterns() -> &'static Vec<Regex> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            Regex::new(r"^[\w-]+=[\w-]+([ ,;][\w-]+=[\w-]+)+$").unwrap(),
            Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap(),
            Regex::new(r#"^\s*[{\[]"#).unwrap(),
        ]
    })
}

fn mild_patterns() -> &'static Vec<Regex> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            Regex::new(r"(?i)^(user|assistant|human|ai)\s*:").unwrap(),
            Regex::new(r"(?i)\b(i think|i'll|let me|okay, so)\b").unwrap(),
        ]
    })
}

/// Classify text against the known low-signal pattern tiers.
pub fn classify_noise(text: &str) -> Option<NoiseSeverity> {
    if severe_patterns().iter().any(|re| re.is_match(text)) {
        return Some(NoiseSeverity::Severe);
    }
    if moderate_patterns().iter().any(|re| re.is_match(text)) {
        return Some(NoiseSeverity::Moderate);
    }
    if mild_patterns().iter().any(|re| re.is_match(text)) {
        return Some(NoiseSeverity::Mild);
    }
    None
}

/// Multiplicative penalty for a text, 1.0 when the text is clean.
pub fn noise_penalty(text: &str, severe: f64, moderate: f64, mild: f64) -> f64 {
    match classify_noise(text) {
        Some(NoiseSeverity::Severe) => severe,
        Some(NoiseSeverity::Moderate) => moderate,
        Some(NoiseSeverity::Mild) => mild,
        None => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_trace_is_severe() {
        let text = "Traceback (most recent call last)\n  File \"x.py\", line 3";
        assert_eq!(classify_noise(text), Some(NoiseSeverity::Severe));
    }

    #[test]
    fn timestamped_log_line_is_severe() {
        let text = "2024-11-02 13:44:01 connection refused";
        assert_eq!(classify_noise(text), Some(NoiseSeverity::Severe));
    }

    #[test]
    fn metadata_dump_is_moderate() {
        assert_eq!(
            classify_noise("run_id=abc123 status=ok attempt=2"),
            Some(NoiseSeverity::Moderate)
        );
    }

    #[test]
    fn transcript_fragment_is_mild() {
        assert_eq!(
            classify_noise("user: can you fix the test?"),
            Some(NoiseSeverity::Mild)
        );
    }

    #[test]
    fn clean_advice_has_no_penalty() {
        assert_eq!(noise_penalty("Run the linter first.", 0.05, 0.4, 0.6), 1.0);
    }
}
