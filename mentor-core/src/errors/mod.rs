//! Error taxonomy for the advisory engine.
//!
//! Every variant here is recovered locally inside the orchestrator; none
//! propagate to the calling agent process. User-visible failure is silence.

mod cache_error;
mod config_error;
mod engine_error;
mod gate_error;
mod retrieval_error;
mod synthesis_error;

pub use cache_error::CacheError;
pub use config_error::ConfigError;
pub use engine_error::EngineError;
pub use gate_error::GateError;
pub use retrieval_error::RetrievalError;
pub use synthesis_error::SynthesisError;

/// Top-level error type aggregating all subsystems.
#[derive(Debug, thiserror::Error)]
pub enum MentorError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl MentorError {
    /// Stable short code for the diagnostics channel.
    pub fn code(&self) -> &'static str {
        match self {
            MentorError::Retrieval(RetrievalError::ProviderTimeout { .. }) => "provider_timeout",
            MentorError::Retrieval(_) => "provider_error",
            MentorError::Cache(_) => "cache_io_error",
            MentorError::Gate(_) => "gate_error",
            MentorError::Synthesis(SynthesisError::Timeout { .. }) => "synthesis_timeout",
            MentorError::Synthesis(_) => "synthesis_error",
            MentorError::Config(_) => "config_resolution_error",
            MentorError::Engine(EngineError::BudgetExceeded { .. }) => "budget_exceeded",
            MentorError::Engine(EngineError::UnsafeContent) => "unsafe_content",
            MentorError::Engine(_) => "engine_error",
        }
    }
}

/// Crate-wide result alias.
pub type MentorResult<T> = Result<T, MentorError>;
