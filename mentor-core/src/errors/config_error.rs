/// Configuration resolution errors. Resolution failure falls back to
/// last-known-good, or schema defaults on first load.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("baseline parse failed: {reason}")]
    Parse { reason: String },

    #[error("environment override invalid: {key}={value}")]
    Env { key: String, value: String },

    #[error("weights must be non-negative and sum to 1.0, got {sum:.3}")]
    InvalidWeights { sum: f64 },
}
