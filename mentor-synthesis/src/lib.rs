//! # mentor-synthesis
//!
//! Turns gate decisions into one advisory string. Tier 1 is deterministic
//! template assembly and always available; tier 2 is an optional enhanced
//! composition call with a hard timeout that falls back to tier 1. The
//! emitter formats the final line and performs the single agent-visible
//! write.

mod emitter;
mod synthesizer;
mod template;
mod truncate;

pub use emitter::{authority_prefix, Emitter};
pub use synthesizer::{SynthesisOutput, Synthesizer};
pub use template::compose_tier1;
pub use truncate::truncate_preserving_action;
