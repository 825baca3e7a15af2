//! Task phase — inferred stage of work used to bias ranking and boosts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Inferred stage of the agent's current work.
///
/// Driven primarily by the recent tool-call window; a run of consecutive
/// failures overrides the tool signal and forces `Debugging`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Exploration,
    Planning,
    Implementation,
    Testing,
    Debugging,
    Deployment,
}

impl Phase {
    /// Phases in which cautionary advice is weighted up by the gate.
    pub fn is_high_risk(self) -> bool {
        matches!(self, Phase::Debugging | Phase::Deployment)
    }

    /// All phases, for exhaustive iteration in tests and config validation.
    pub fn all() -> [Phase; 6] {
        [
            Phase::Exploration,
            Phase::Planning,
            Phase::Implementation,
            Phase::Testing,
            Phase::Debugging,
            Phase::Deployment,
        ]
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Exploration
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Exploration => "exploration",
            Phase::Planning => "planning",
            Phase::Implementation => "implementation",
            Phase::Testing => "testing",
            Phase::Debugging => "debugging",
            Phase::Deployment => "deployment",
        };
        write!(f, "{name}")
    }
}
