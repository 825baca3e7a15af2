//! Engine call inputs.

use serde::{Deserialize, Serialize};

use super::packet::Plane;

/// Context the calling agent supplies alongside a tool call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskContext {
    /// Caller-declared intent (e.g. "modify", "investigate", "verify").
    pub intent: String,
    /// Files currently in focus.
    pub active_files: Vec<String>,
    /// Short free-text description of what the agent is doing.
    pub focus: String,
}

impl TaskContext {
    /// Stable fingerprint over intent + focus + active files, used for
    /// burst-level result caching.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.intent.as_bytes());
        hasher.update(self.focus.as_bytes());
        for file in &self.active_files {
            hasher.update(file.as_bytes());
        }
        hasher.finalize().to_hex()[..16].to_string()
    }
}

/// One advisory request, issued immediately before a tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviseRequest {
    /// Owning session id.
    pub session_id: String,
    /// Tool about to run.
    pub tool_name: String,
    /// Raw tool input as supplied by the agent runtime.
    pub tool_input: serde_json::Value,
    /// Delivery plane.
    #[serde(default)]
    pub plane: Plane,
    /// Task context.
    #[serde(default)]
    pub context: TaskContext,
}

impl AdviseRequest {
    pub fn new(session_id: impl Into<String>, tool_name: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            tool_name: tool_name.into(),
            tool_input: serde_json::Value::Null,
            plane: Plane::PreTool,
            context: TaskContext::default(),
        }
    }

    /// Attach task context.
    pub fn with_context(mut self, context: TaskContext) -> Self {
        self.context = context;
        self
    }

    /// Attach raw tool input.
    pub fn with_input(mut self, input: serde_json::Value) -> Self {
        self.tool_input = input;
        self
    }
}
