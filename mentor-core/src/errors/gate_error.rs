/// Quality gate errors. Evaluation is side-effect-free; any failure here
/// collapses to "no advice" for the call.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("gate evaluation failed: {reason}")]
    Evaluation { reason: String },

    #[error("gate thresholds invalid: {reason}")]
    InvalidThresholds { reason: String },
}
