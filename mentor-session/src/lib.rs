//! # mentor-session
//!
//! Session state tracking for the advisory engine: recent tool-call
//! history, task-phase inference, the shown-advice ledger, and per-tool
//! cooldowns. This tracker must never be the reason a tool call is
//! blocked; every load failure degrades to a fresh session.

mod inference;
mod state;
mod tracker;

pub use inference::{classify_tool, infer_phase, ToolKind};
pub use state::{SessionState, ToolCallRecord};
pub use tracker::{cleanup_stale_sessions, extract_file_hints, SessionTracker};
