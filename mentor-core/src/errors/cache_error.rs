/// Packet cache errors. I/O failures are treated as cache misses upstream.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("packet store I/O failed: {reason}")]
    Io { reason: String },

    #[error("packet record corrupt: {reason}")]
    Corrupt { reason: String },

    #[error("packet not found: {id}")]
    NotFound { id: String },
}
