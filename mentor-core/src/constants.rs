/// Mentor system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of index rows scored during a relaxed cache lookup.
pub const MAX_RELAXED_SCAN: usize = 64;

/// Maximum recorded tool calls kept per session.
pub const MAX_SESSION_HISTORY: usize = 50;

/// Maximum providers queried per retrieval fan-out.
pub const MAX_PROVIDERS: usize = 16;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "MENTOR_";

/// Feature flags.
pub const FEATURE_TIER2_SYNTHESIS: bool = true;
pub const FEATURE_WHISPER: bool = true;
