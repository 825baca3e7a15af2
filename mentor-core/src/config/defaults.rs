//! Default magnitudes for every tunable. Tuned externally over time; the
//! values here are the schema-default layer of the precedence chain.

// Session
pub const DEFAULT_HISTORY_CAP: usize = 20;
pub const DEFAULT_PHASE_WINDOW: usize = 5;
pub const DEFAULT_SHOWN_TTL_SECS: u64 = 600;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 7_200;
pub const DEFAULT_FAILURE_DEBUG_THRESHOLD: u32 = 2;

// Retrieval
pub const DEFAULT_MAX_CANDIDATES: usize = 8;
pub const DEFAULT_SCORE_FLOOR: f64 = 0.35;
pub const DEFAULT_RELEVANCE_WEIGHT: f64 = 0.45;
pub const DEFAULT_QUALITY_WEIGHT: f64 = 0.30;
pub const DEFAULT_TRUST_WEIGHT: f64 = 0.25;
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 800;
pub const DEFAULT_RESULT_CACHE_TTL_SECS: u64 = 5;
pub const DEFAULT_RESULT_CACHE_CAPACITY: u64 = 256;
pub const DEFAULT_NEAR_DUP_THRESHOLD: f64 = 0.85;
pub const DEFAULT_NOISE_PENALTY_SEVERE: f64 = 0.05;
pub const DEFAULT_NOISE_PENALTY_MODERATE: f64 = 0.40;
pub const DEFAULT_NOISE_PENALTY_MILD: f64 = 0.60;

// Packet cache
pub const DEFAULT_PACKET_TTL_SECS: u64 = 720;
pub const DEFAULT_PACKET_CAPACITY: usize = 512;
pub const DEFAULT_RELAXED_TOP_K: usize = 16;
pub const DEFAULT_RELAXED_THRESHOLD: f64 = 0.55;
pub const DEFAULT_EFFECTIVENESS_PENALTY: f64 = 0.5;
pub const DEFAULT_LOW_EFFECTIVENESS: f64 = 0.35;

// Gate
pub const DEFAULT_GATE_RELEVANCE_WEIGHT: f64 = 0.5;
pub const DEFAULT_GATE_CONFIDENCE_WEIGHT: f64 = 0.3;
pub const DEFAULT_GATE_FLOOR_CONSTANT: f64 = 0.15;
pub const DEFAULT_BLOCK_THRESHOLD: f64 = 0.95;
pub const DEFAULT_WARNING_THRESHOLD: f64 = 0.80;
pub const DEFAULT_NOTE_THRESHOLD: f64 = 0.60;
pub const DEFAULT_WHISPER_THRESHOLD: f64 = 0.45;
pub const DEFAULT_EMISSION_BUDGET: usize = 2;
pub const DEFAULT_PHASE_BOOST: f64 = 0.10;
pub const DEFAULT_URGENCY_BOOST_CAP: f64 = 0.08;
pub const DEFAULT_CAUTION_BOOST: f64 = 0.12;
pub const DEFAULT_RISK_BOOST_CAP: f64 = 0.10;

// Synthesis
pub const DEFAULT_MAX_CHARS: usize = 480;
pub const DEFAULT_TIER2_TIMEOUT_MS: u64 = 1_500;
pub const DEFAULT_TIER2_MIN_BUDGET_MS: u64 = 2_000;

// Engine
pub const DEFAULT_ENGINE_BUDGET_MS: u64 = 4_000;
pub const DEFAULT_TEXT_DEDUP_COOLDOWN_SECS: u64 = 600;
pub const DEFAULT_ADVICE_COOLDOWN_SECS: u64 = 600;
