//! SessionState — one record per session id, single writer per key.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

use mentor_core::Phase;

/// One recorded tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRecord {
    pub tool: String,
    pub at: DateTime<Utc>,
    /// File paths extracted from the tool input, if any.
    pub files: Vec<String>,
}

/// Per-session state: recent history, inferred phase, shown-advice ledger,
/// tool cooldowns, and the consecutive-failure counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Unique session identifier.
    pub session_id: String,
    /// When this session was created.
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp; drives idle expiry.
    pub last_activity: DateTime<Utc>,
    /// Bounded ring buffer of recent tool calls, newest at the back.
    pub recent_calls: VecDeque<ToolCallRecord>,
    /// Currently inferred task phase.
    pub phase: Phase,
    /// Advice id → last-shown timestamp. Entries expire independently.
    pub shown: HashMap<String, DateTime<Utc>>,
    /// Tool → suppressed-until timestamp.
    pub suppressed_tools: HashMap<String, DateTime<Utc>>,
    /// Consecutive recorded failures; two or more force the debugging phase.
    pub consecutive_failures: u32,
}

impl SessionState {
    /// Create a fresh session record.
    pub fn new(session_id: String) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            created_at: now,
            last_activity: now,
            recent_calls: VecDeque::new(),
            phase: Phase::default(),
            shown: HashMap::new(),
            suppressed_tools: HashMap::new(),
            consecutive_failures: 0,
        }
    }

    /// Append a tool call, evicting the oldest entry past `history_cap`.
    pub fn push_call(&mut self, record: ToolCallRecord, history_cap: usize) {
        self.recent_calls.push_back(record);
        while self.recent_calls.len() > history_cap {
            self.recent_calls.pop_front();
        }
        self.last_activity = Utc::now();
    }

    /// Record that an advice id was shown now.
    pub fn mark_shown(&mut self, advice_id: &str) {
        self.shown.insert(advice_id.to_string(), Utc::now());
        self.last_activity = Utc::now();
    }

    /// Whether an advice id was shown within `ttl_secs`.
    ///
    /// An entry older than the TTL is never honored; it is removed on
    /// sight so the ledger cannot grow without bound.
    pub fn is_shown(&mut self, advice_id: &str, ttl_secs: u64) -> bool {
        let fresh = match self.shown.get(advice_id) {
            Some(at) => Utc::now() - *at <= Duration::seconds(ttl_secs as i64),
            None => return false,
        };
        if !fresh {
            self.shown.remove(advice_id);
        }
        fresh
    }

    /// Put a tool under cooldown for `duration`.
    pub fn suppress_tool(&mut self, tool: &str, duration: Duration) {
        self.suppressed_tools
            .insert(tool.to_string(), Utc::now() + duration);
        self.last_activity = Utc::now();
    }

    /// Whether a tool is under an active cooldown. Expired entries are
    /// dropped on sight.
    pub fn is_suppressed(&mut self, tool: &str) -> bool {
        let active = match self.suppressed_tools.get(tool) {
            Some(until) => *until > Utc::now(),
            None => return false,
        };
        if !active {
            self.suppressed_tools.remove(tool);
        }
        active
    }

    /// Duration since last activity.
    pub fn idle_duration(&self) -> Duration {
        Utc::now() - self.last_activity
    }

    /// Tool names in the recent window, oldest first.
    pub fn recent_tools(&self, window: usize) -> Vec<&str> {
        let skip = self.recent_calls.len().saturating_sub(window);
        self.recent_calls
            .iter()
            .skip(skip)
            .map(|c| c.tool.as_str())
            .collect()
    }
}
