//! # mentor-core
//!
//! Foundation crate for the Mentor advisory engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod outcome;
pub mod phase;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::MentorConfig;
pub use errors::{MentorError, MentorResult};
pub use models::{AdviceCandidate, Authority, Score, SourceTag, SuppressReason};
pub use outcome::Outcome;
pub use phase::Phase;
