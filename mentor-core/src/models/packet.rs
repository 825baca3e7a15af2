//! Advisory packets: cached, previously synthesized advisory responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::candidate::SourceTag;
use super::decision::Authority;

/// Delivery plane an advisory is keyed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plane {
    /// Delivered immediately before the tool call runs.
    PreTool,
    /// Delivered after the tool call, from observed outcomes.
    PostTool,
}

impl Default for Plane {
    fn default() -> Self {
        Plane::PreTool
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plane::PreTool => write!(f, "pre_tool"),
            Plane::PostTool => write!(f, "post_tool"),
        }
    }
}

/// Composite cache key for an advisory packet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PacketKey {
    pub session: String,
    pub tool: String,
    pub intent: String,
    pub plane: Plane,
}

impl PacketKey {
    pub fn new(
        session: impl Into<String>,
        tool: impl Into<String>,
        intent: impl Into<String>,
        plane: Plane,
    ) -> Self {
        Self {
            session: session.into(),
            tool: tool.into(),
            intent: intent.into(),
            plane,
        }
    }
}

impl fmt::Display for PacketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.session, self.tool, self.intent, self.plane
        )
    }
}

/// One constituent advice item stored inside a packet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceItem {
    pub advice_id: String,
    pub text: String,
    pub source: SourceTag,
    pub score: f64,
}

/// Why a packet was invalidated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidationReason {
    /// Full packet content matched a file hint.
    FileHint(String),
    /// Freshness TTL elapsed.
    Expired,
    /// Evicted to enforce the capacity cap.
    CapacityEvicted,
}

/// A cached advisory response.
///
/// The full record (synthesized text plus serialized advice items) is the
/// unit of storage; index rows derived from it are a lookup accelerator
/// only and never a substitute for the record during invalidation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryPacket {
    /// Unique packet id.
    pub id: String,
    /// Composite lookup key.
    pub key: PacketKey,
    /// Final synthesized advisory text.
    pub text: String,
    /// Authority granted when the packet was composed.
    pub authority: Authority,
    /// Constituent advice items, serialized with the record.
    pub items: Vec<AdviceItem>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Freshness window in seconds.
    pub ttl_secs: u64,
    /// Set once the packet has been invalidated.
    pub invalidated: Option<InvalidationReason>,
    /// blake3 fingerprint of the synthesized text.
    pub fingerprint: String,
}

impl AdvisoryPacket {
    /// Build a packet, computing id and content fingerprint.
    pub fn new(
        key: PacketKey,
        text: String,
        authority: Authority,
        items: Vec<AdviceItem>,
        ttl_secs: u64,
    ) -> Self {
        let fingerprint = Self::fingerprint_text(&text);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            key,
            text,
            authority,
            items,
            created_at: Utc::now(),
            ttl_secs,
            invalidated: None,
            fingerprint,
        }
    }

    /// blake3 hex fingerprint of advisory text.
    pub fn fingerprint_text(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    /// Whether the packet is past its freshness window at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        let age = now - self.created_at;
        age > chrono::Duration::seconds(self.ttl_secs as i64)
    }

    /// Whether any part of the full record references the file hint.
    ///
    /// Matches the synthesized text and every stored advice item. Index
    /// metadata is not consulted here; callers must pass the full record.
    pub fn references_file(&self, file_hint: &str) -> bool {
        if self.text.contains(file_hint) {
            return true;
        }
        self.items.iter().any(|item| item.text.contains(file_hint))
    }
}
