//! PacketEntry — one cached packet with atomic effectiveness counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use mentor_core::models::{AdvisoryPacket, InvalidationReason};

/// Point-in-time view of a packet's effectiveness counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectivenessSnapshot {
    pub helpful: u64,
    pub unhelpful: u64,
    pub delivered: u64,
}

impl EffectivenessSnapshot {
    /// Effectiveness in [0, 1], or `None` before any feedback.
    pub fn score(&self) -> Option<f64> {
        let voted = self.helpful + self.unhelpful;
        if voted == 0 {
            return None;
        }
        Some(self.helpful as f64 / voted as f64)
    }
}

/// A stored packet. The record itself is read-mostly after creation;
/// the effectiveness counters are append-only atomic increments so
/// concurrent feedback never takes the record lock.
pub struct PacketEntry {
    packet: RwLock<AdvisoryPacket>,
    helpful: AtomicU64,
    unhelpful: AtomicU64,
    delivered: AtomicU64,
}

impl PacketEntry {
    pub fn new(packet: AdvisoryPacket) -> Self {
        Self {
            packet: RwLock::new(packet),
            helpful: AtomicU64::new(0),
            unhelpful: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
        }
    }

    /// Clone the full record (text plus serialized advice items).
    pub fn full_record(&self) -> AdvisoryPacket {
        // A poisoned lock still holds a usable record; recover it.
        self.packet
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Mark the record invalidated.
    pub fn invalidate(&self, reason: InvalidationReason) {
        let mut packet = self
            .packet
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        packet.invalidated = Some(reason);
    }

    /// Record one delivery to an agent.
    pub fn record_delivery(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    /// Record observed feedback.
    ///
    /// Whenever a `helpful` signal is present the matching counter moves,
    /// independent of `followed`: implicit feedback still counts. A vote
    /// that arrives without a recorded delivery implies one, keeping
    /// helpful + unhelpful ≤ delivered.
    pub fn record_feedback(&self, helpful: Option<bool>, _followed: Option<bool>) {
        let Some(helpful) = helpful else {
            return;
        };
        if helpful {
            self.helpful.fetch_add(1, Ordering::Relaxed);
        } else {
            self.unhelpful.fetch_add(1, Ordering::Relaxed);
        }
        let voted =
            self.helpful.load(Ordering::Relaxed) + self.unhelpful.load(Ordering::Relaxed);
        self.delivered.fetch_max(voted, Ordering::Relaxed);
    }

    /// Current counters.
    pub fn effectiveness(&self) -> EffectivenessSnapshot {
        EffectivenessSnapshot {
            helpful: self.helpful.load(Ordering::Relaxed),
            unhelpful: self.unhelpful.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
        }
    }
}
