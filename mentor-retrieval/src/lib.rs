//! # mentor-retrieval
//!
//! Multi-source advice retrieval: fans out to independent knowledge
//! providers under per-call deadlines, fuses results into a single
//! ranking, penalizes low-signal text, deduplicates near-identical
//! advice, and caps the result. A short-TTL cache makes bursts of
//! identical calls idempotent.

mod actionability;
mod aggregator;
mod dedup;
mod fanout;
mod fusion;
mod noise;
mod result_cache;

pub use actionability::actionability;
pub use aggregator::{apply_floor, RetrievalAggregator, RetrievalOutput};
pub use dedup::dedup_near_identical;
pub use fanout::{fan_out, FanoutReport};
pub use fusion::{fuse, relevance};
pub use noise::{noise_penalty, NoiseSeverity};
pub use result_cache::ResultCache;
