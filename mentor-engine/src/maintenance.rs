//! In-process maintenance sweeps.
//!
//! Periodic cleanup of stale sessions, expired packets, and old
//! repetition fingerprints. Each sweep works entry-by-entry so a live
//! call is never stalled behind a long-held lock.

use tracing::debug;

use mentor_session::cleanup_stale_sessions;

use crate::engine::AdvisoryEngine;

/// What one sweep removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaintenanceReport {
    pub stale_sessions: usize,
    pub expired_packets: usize,
    pub swept_fingerprints: usize,
}

impl AdvisoryEngine {
    /// Run one maintenance sweep. Safe to call from a background task on
    /// any cadence.
    pub fn maintenance_sweep(&self) -> MaintenanceReport {
        let config = self.config_bus().current();
        let max_cooldown = config
            .engine
            .text_dedup_cooldown_secs
            .max(config.engine.advice_cooldown_secs);

        let report = MaintenanceReport {
            stale_sessions: cleanup_stale_sessions(self.sessions()),
            expired_packets: self.packets().purge_expired(),
            swept_fingerprints: self.repetition_guard().sweep(max_cooldown),
        };
        debug!(
            stale_sessions = report.stale_sessions,
            expired_packets = report.expired_packets,
            swept_fingerprints = report.swept_fingerprints,
            "maintenance sweep complete"
        );
        report
    }
}
