/// Synthesis errors. Tier-2 failures fall back to Tier-1 output.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("tier-2 composition timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("tier-2 backend failed: {reason}")]
    BackendFailed { reason: String },

    #[error("nothing to synthesize: no emittable decisions")]
    EmptyDraft,
}
