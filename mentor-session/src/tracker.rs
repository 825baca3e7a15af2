//! SessionTracker — concurrent per-session access via DashMap.
//!
//! Each session record has a single writer at a time (the DashMap entry
//! lock); cooldown and shown checks within one session observe the
//! effects of the immediately preceding call on that session key.

use chrono::{Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;

use mentor_core::config::SessionConfig;
use mentor_core::Phase;
use tracing::debug;

use crate::inference::infer_phase;
use crate::state::{SessionState, ToolCallRecord};

/// Thread-safe session tracker.
pub struct SessionTracker {
    sessions: Arc<DashMap<String, SessionState>>,
    config: SessionConfig,
}

impl SessionTracker {
    /// Create a tracker with the given configuration.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            config,
        }
    }

    /// Load a session, creating a fresh record on first sight.
    ///
    /// Any unreadable prior state is indistinguishable from a new session;
    /// this path never errors.
    pub fn load_or_create(&self, session_id: &str) -> SessionState {
        if let Some(state) = self.sessions.get(session_id) {
            return state.clone();
        }
        debug!(session_id, "creating fresh session state");
        let state = SessionState::new(session_id.to_string());
        self.sessions
            .insert(session_id.to_string(), state.clone());
        state
    }

    /// Record a tool call and re-infer the phase.
    pub fn record_tool_call(&self, session_id: &str, tool: &str, input: &serde_json::Value) {
        let mut entry = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionState::new(session_id.to_string()));
        let record = ToolCallRecord {
            tool: tool.to_string(),
            at: Utc::now(),
            files: extract_file_hints(input),
        };
        entry.push_call(record, self.config.history_cap);
        let tools = entry.recent_tools(self.config.phase_window);
        entry.phase = infer_phase(
            &tools,
            entry.consecutive_failures,
            self.config.failure_debug_threshold,
            entry.phase,
        );
    }

    /// Record the observed outcome of the last tool call.
    pub fn record_outcome(&self, session_id: &str, success: bool) {
        if let Some(mut entry) = self.sessions.get_mut(session_id) {
            if success {
                entry.consecutive_failures = 0;
            } else {
                entry.consecutive_failures += 1;
            }
            let tools = entry.recent_tools(self.config.phase_window);
            entry.phase = infer_phase(
                &tools,
                entry.consecutive_failures,
                self.config.failure_debug_threshold,
                entry.phase,
            );
        }
    }

    /// Current inferred phase for a session.
    pub fn phase(&self, session_id: &str) -> Phase {
        self.sessions
            .get(session_id)
            .map(|s| s.phase)
            .unwrap_or_default()
    }

    /// Record that an advice id was shown to this session.
    pub fn mark_shown(&self, session_id: &str, advice_id: &str) {
        if let Some(mut entry) = self.sessions.get_mut(session_id) {
            entry.mark_shown(advice_id);
        }
    }

    /// Whether an advice id is within its shown TTL for this session.
    pub fn is_shown(&self, session_id: &str, advice_id: &str) -> bool {
        self.sessions
            .get_mut(session_id)
            .map(|mut s| s.is_shown(advice_id, self.config.shown_ttl_secs))
            .unwrap_or(false)
    }

    /// Put a tool under cooldown for this session.
    pub fn suppress_tool(&self, session_id: &str, tool: &str, duration: Duration) {
        if let Some(mut entry) = self.sessions.get_mut(session_id) {
            entry.suppress_tool(tool, duration);
        }
    }

    /// Whether a tool is under an active cooldown for this session.
    pub fn is_suppressed(&self, session_id: &str, tool: &str) -> bool {
        self.sessions
            .get_mut(session_id)
            .map(|mut s| s.is_suppressed(tool))
            .unwrap_or(false)
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Access the shared map (maintenance sweeps).
    pub(crate) fn sessions(&self) -> &DashMap<String, SessionState> {
        &self.sessions
    }

    /// Session idle TTL from config.
    pub fn session_ttl(&self) -> Duration {
        Duration::seconds(self.config.session_ttl_secs as i64)
    }
}

/// Remove sessions idle past their TTL. Returns how many were removed.
///
/// Scans entry-by-entry; no lock is held across the whole map.
pub fn cleanup_stale_sessions(tracker: &SessionTracker) -> usize {
    let ttl = tracker.session_ttl();
    let stale: Vec<String> = tracker
        .sessions()
        .iter()
        .filter(|entry| entry.idle_duration() > ttl)
        .map(|entry| entry.key().clone())
        .collect();
    let mut removed = 0;
    for key in stale {
        if tracker.sessions().remove(&key).is_some() {
            removed += 1;
        }
    }
    if removed > 0 {
        debug!(removed, "cleaned up stale sessions");
    }
    removed
}

/// Pull file-path-looking strings out of a raw tool input.
pub fn extract_file_hints(input: &serde_json::Value) -> Vec<String> {
    let mut files = Vec::new();
    collect_file_hints(input, &mut files);
    files.truncate(8);
    files
}

fn collect_file_hints(value: &serde_json::Value, out: &mut Vec<String>) {
    match value {
        serde_json::Value::String(s) => {
            if s.len() < 256 && s.contains('/') && !s.contains(' ') {
                out.push(s.clone());
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                collect_file_hints(item, out);
            }
        }
        serde_json::Value::Object(map) => {
            for (_k, v) in map {
                collect_file_hints(v, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn file_hints_come_from_nested_input() {
        let input = json!({"file_path": "src/lib.rs", "content": "fn main() {}", "flags": [1, 2]});
        let hints = extract_file_hints(&input);
        assert_eq!(hints, vec!["src/lib.rs".to_string()]);
    }

    #[test]
    fn read_after_write_within_one_session() {
        let tracker = SessionTracker::new(SessionConfig::default());
        tracker.load_or_create("s1");
        tracker.mark_shown("s1", "a1");
        assert!(tracker.is_shown("s1", "a1"));
    }
}
