use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};

/// Fusion/decision score clamped to [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Score(f64);

impl Score {
    /// Scores at or above this are considered strong signals.
    pub const STRONG: f64 = 0.8;
    /// Default retrieval floor; candidates below this are dropped.
    pub const DEFAULT_FLOOR: f64 = 0.35;

    /// Create a new Score, clamping to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether this score meets the given floor (inclusive).
    pub fn meets_floor(self, floor: f64) -> bool {
        self.0 >= floor
    }
}

impl Default for Score {
    fn default() -> Self {
        Self(0.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Score> for f64 {
    fn from(s: Score) -> Self {
        s.0
    }
}

impl Add for Score {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.0 + rhs.0)
    }
}

impl Mul<f64> for Score {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_out_of_range() {
        assert_eq!(Score::new(1.5).value(), 1.0);
        assert_eq!(Score::new(-0.2).value(), 0.0);
    }

    #[test]
    fn floor_is_inclusive() {
        assert!(Score::new(0.35).meets_floor(0.35));
        assert!(!Score::new(0.35 - 1e-9).meets_floor(0.35));
    }
}
