/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("provider '{provider}' timed out after {timeout_ms}ms")]
    ProviderTimeout { provider: String, timeout_ms: u64 },

    #[error("provider '{provider}' failed: {reason}")]
    ProviderFailed { provider: String, reason: String },

    #[error("fusion weights invalid: {reason}")]
    InvalidWeights { reason: String },
}
