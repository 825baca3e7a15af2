//! Bounded-time outcome of an external call.
//!
//! Every suspension point (provider search, packet-store I/O, Tier-2
//! composition) resolves to one of these three states and is collapsed
//! explicitly to an empty contribution at the call site. No call path
//! relies on ambient error suppression.

use std::time::Duration;

/// Result of a time-bounded external call.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    /// The call completed within its deadline.
    Success(T),
    /// The call returned an error before its deadline.
    Error(String),
    /// The call exceeded its deadline and was abandoned.
    TimedOut(Duration),
}

impl<T> Outcome<T> {
    /// Collapse to the successful value, or an explicit empty contribution.
    pub fn collapse(self) -> T
    where
        T: Default,
    {
        match self {
            Outcome::Success(value) => value,
            Outcome::Error(_) | Outcome::TimedOut(_) => T::default(),
        }
    }

    /// Whether the call completed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Short label for diagnostics fields.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "success",
            Outcome::Error(_) => "error",
            Outcome::TimedOut(_) => "timeout",
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Outcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(e) => Outcome::Error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_collapses_to_value() {
        let outcome: Outcome<Vec<u32>> = Outcome::Success(vec![1, 2]);
        assert_eq!(outcome.collapse(), vec![1, 2]);
    }

    #[test]
    fn error_collapses_to_empty() {
        let outcome: Outcome<Vec<u32>> = Outcome::Error("boom".to_string());
        assert!(outcome.collapse().is_empty());
    }

    #[test]
    fn timeout_collapses_to_empty() {
        let outcome: Outcome<Vec<u32>> = Outcome::TimedOut(Duration::from_millis(250));
        assert!(outcome.collapse().is_empty());
    }
}
