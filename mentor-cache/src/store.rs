//! PacketStore — concurrent packet index with exact and relaxed lookup.

use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;

use tracing::{debug, info};

use mentor_core::constants::MAX_RELAXED_SCAN;
use mentor_core::config::CacheConfig;
use mentor_core::models::{AdvisoryPacket, InvalidationReason, PacketKey};
use mentor_core::traits::IEffectivenessIndex;

use crate::entry::PacketEntry;
use crate::relaxed::{relaxed_score, RelaxedWeights};

/// A successful cache lookup.
#[derive(Debug)]
pub struct CacheHit {
    /// Full packet record.
    pub packet: AdvisoryPacket,
    /// Whether the hit came from relaxed matching rather than the exact key.
    pub relaxed: bool,
}

/// Concurrent advisory packet store.
///
/// Per-packet atomicity: lookups take the DashMap shard lock briefly and
/// counter updates are lock-free; no operation holds a store-wide lock.
pub struct PacketStore {
    entries: DashMap<PacketKey, Arc<PacketEntry>>,
    by_id: DashMap<String, PacketKey>,
    weights: RelaxedWeights,
}

impl PacketStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            by_id: DashMap::new(),
            weights: RelaxedWeights::default(),
        }
    }

    /// Insert a packet, enforcing the capacity cap.
    pub fn store(&self, packet: AdvisoryPacket, config: &CacheConfig) {
        if self.entries.len() >= config.capacity {
            self.evict_one(config);
        }
        let key = packet.key.clone();
        let id = packet.id.clone();
        self.by_id.insert(id, key.clone());
        self.entries.insert(key, Arc::new(PacketEntry::new(packet)));
    }

    /// Look up a packet: exact composite key first, then relaxed matching.
    ///
    /// Expired rows are skipped and removed on sight (lazy eviction).
    pub fn lookup(&self, key: &PacketKey, config: &CacheConfig) -> Option<CacheHit> {
        if let Some(packet) = self.exact(key) {
            return Some(CacheHit {
                packet,
                relaxed: false,
            });
        }
        self.relaxed(key, config).map(|packet| CacheHit {
            packet,
            relaxed: true,
        })
    }

    fn exact(&self, key: &PacketKey) -> Option<AdvisoryPacket> {
        let entry = self.entries.get(key)?;
        let packet = entry.full_record();
        drop(entry);
        if packet.invalidated.is_some() || packet.is_expired_at(Utc::now()) {
            self.remove(key, InvalidationReason::Expired);
            return None;
        }
        Some(packet)
    }

    fn relaxed(&self, key: &PacketKey, config: &CacheConfig) -> Option<AdvisoryPacket> {
        let now = Utc::now();
        // Score the index rows, keeping the best above the threshold.
        // Scan is bounded; the capacity cap keeps the index small anyway.
        let mut scored: Vec<(f64, PacketKey)> = Vec::new();
        let mut expired: Vec<PacketKey> = Vec::new();
        for entry in self.entries.iter().take(MAX_RELAXED_SCAN) {
            let packet = entry.value().full_record();
            if packet.invalidated.is_some() || packet.is_expired_at(now) {
                expired.push(entry.key().clone());
                continue;
            }
            let mut score = relaxed_score(key, entry.key(), &self.weights);
            // Penalize rows that demonstrably did not help.
            if let Some(effectiveness) = entry.value().effectiveness().score() {
                if effectiveness < config.low_effectiveness {
                    score *= config.effectiveness_penalty;
                }
            }
            scored.push((score, entry.key().clone()));
        }
        for key in expired {
            self.remove(&key, InvalidationReason::Expired);
        }

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(config.relaxed_top_k);
        let (best_score, best_key) = scored.into_iter().next()?;
        if best_score < config.relaxed_threshold {
            return None;
        }
        debug!(score = best_score, key = %best_key, "relaxed cache hit");
        self.entries.get(&best_key).map(|e| e.full_record())
    }

    /// Invalidate every packet whose *full content* references the hint.
    ///
    /// Loads the complete record (synthesized text plus serialized advice
    /// items) for each row. Matching on index metadata alone would miss
    /// packets whose stored items mention the file, so it is never used
    /// as a surrogate here.
    pub fn invalidate_packets(&self, file_hint: &str) -> Vec<String> {
        let mut matched: Vec<(PacketKey, String)> = Vec::new();
        for entry in self.entries.iter() {
            let full = entry.value().full_record();
            if full.references_file(file_hint) {
                matched.push((entry.key().clone(), full.id.clone()));
            }
        }
        let mut invalidated = Vec::with_capacity(matched.len());
        for (key, id) in matched {
            self.remove(&key, InvalidationReason::FileHint(file_hint.to_string()));
            invalidated.push(id);
        }
        if !invalidated.is_empty() {
            info!(hint = file_hint, count = invalidated.len(), "invalidated packets");
        }
        invalidated
    }

    /// Record delivery of a packet to an agent.
    pub fn record_delivery(&self, packet_id: &str) {
        if let Some(entry) = self.entry_by_id(packet_id) {
            entry.record_delivery();
        }
    }

    /// Record observed feedback for a packet. Returns false when the
    /// packet is unknown (already evicted); callers treat that as a no-op.
    pub fn record_feedback(
        &self,
        packet_id: &str,
        helpful: Option<bool>,
        followed: Option<bool>,
    ) -> bool {
        match self.entry_by_id(packet_id) {
            Some(entry) => {
                entry.record_feedback(helpful, followed);
                true
            }
            None => false,
        }
    }

    /// Record feedback against every packet that carried an advice id.
    /// Returns how many packets were updated.
    pub fn record_feedback_by_advice(
        &self,
        advice_id: &str,
        helpful: Option<bool>,
        followed: Option<bool>,
    ) -> usize {
        let mut updated = 0;
        for entry in self.entries.iter() {
            let packet = entry.value().full_record();
            if packet.items.iter().any(|item| item.advice_id == advice_id) {
                entry.value().record_feedback(helpful, followed);
                updated += 1;
            }
        }
        updated
    }

    /// Counters for a packet, if it is still indexed.
    pub fn effectiveness_of(&self, packet_id: &str) -> Option<crate::entry::EffectivenessSnapshot> {
        self.entry_by_id(packet_id).map(|e| e.effectiveness())
    }

    /// Drop every expired row. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let stale: Vec<PacketKey> = self
            .entries
            .iter()
            .filter(|entry| entry.value().full_record().is_expired_at(now))
            .map(|entry| entry.key().clone())
            .collect();
        let count = stale.len();
        for key in stale {
            self.remove(&key, InvalidationReason::Expired);
        }
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_by_id(&self, packet_id: &str) -> Option<Arc<PacketEntry>> {
        let key = self.by_id.get(packet_id)?.clone();
        self.entries.get(&key).map(|e| Arc::clone(e.value()))
    }

    fn remove(&self, key: &PacketKey, reason: InvalidationReason) {
        if let Some((_, entry)) = self.entries.remove(key) {
            entry.invalidate(reason);
            let id = entry.full_record().id;
            self.by_id.remove(&id);
        }
    }

    /// Evict one row to make room: expired rows first, then the least
    /// effective, oldest row.
    fn evict_one(&self, _config: &CacheConfig) {
        if self.purge_expired() > 0 {
            return;
        }
        let victim = self
            .entries
            .iter()
            .map(|entry| {
                let packet = entry.value().full_record();
                let effectiveness = entry.value().effectiveness().score().unwrap_or(0.5);
                (entry.key().clone(), effectiveness, packet.created_at)
            })
            .min_by(|a, b| {
                a.1.partial_cmp(&b.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.2.cmp(&b.2))
            });
        if let Some((key, _, _)) = victim {
            debug!(key = %key, "capacity eviction");
            self.remove(&key, InvalidationReason::CapacityEvicted);
        }
    }
}

impl Default for PacketStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IEffectivenessIndex for PacketStore {
    /// Aggregate vote ratio across every packet that carried this advice.
    fn measured_effectiveness(&self, advice_id: &str) -> Option<f64> {
        let mut helpful = 0u64;
        let mut unhelpful = 0u64;
        for entry in self.entries.iter() {
            let packet = entry.value().full_record();
            if packet.items.iter().any(|item| item.advice_id == advice_id) {
                let snap = entry.value().effectiveness();
                helpful += snap.helpful;
                unhelpful += snap.unhelpful;
            }
        }
        let voted = helpful + unhelpful;
        if voted == 0 {
            None
        } else {
            Some(helpful as f64 / voted as f64)
        }
    }
}
