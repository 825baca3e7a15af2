/// Orchestrator-level errors.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine budget exceeded in stage '{stage}' after {elapsed_ms}ms")]
    BudgetExceeded { stage: String, elapsed_ms: u64 },

    #[error("unsafe content detected before emission")]
    UnsafeContent,

    #[error("internal failure: {reason}")]
    Internal { reason: String },
}
