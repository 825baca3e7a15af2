//! ConfigBus — hot-reload change-notification bus.
//!
//! Components hold a receiver and pull a freshly-resolved snapshot per
//! call; nothing mutates shared config in place. A failed re-resolution
//! keeps the last-known-good snapshot live.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::{resolver, MentorConfig};
use crate::errors::ConfigError;

/// Publishes resolved configuration snapshots to subscribers.
pub struct ConfigBus {
    tx: watch::Sender<Arc<MentorConfig>>,
}

impl ConfigBus {
    /// Create a bus seeded with an already-resolved configuration.
    pub fn new(initial: MentorConfig) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(initial));
        Self { tx }
    }

    /// Create a bus seeded with schema defaults.
    pub fn with_defaults() -> Self {
        Self::new(MentorConfig::default())
    }

    /// Current snapshot.
    pub fn current(&self) -> Arc<MentorConfig> {
        self.tx.borrow().clone()
    }

    /// Subscribe for change notifications.
    pub fn subscribe(&self) -> watch::Receiver<Arc<MentorConfig>> {
        self.tx.subscribe()
    }

    /// Publish a pre-resolved configuration.
    pub fn publish(&self, config: MentorConfig) {
        let _ = self.tx.send(Arc::new(config));
    }

    /// Re-resolve from the layered sources and publish on success.
    ///
    /// On failure the previous snapshot stays live and the error is
    /// returned for the caller's diagnostics only.
    pub fn reload(
        &self,
        baseline: Option<&str>,
        overrides: Option<&toml::Table>,
    ) -> Result<(), ConfigError> {
        match resolver::resolve(baseline, overrides) {
            Ok(config) => {
                info!("configuration reloaded");
                self.publish(config);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "config reload failed, keeping last-known-good");
                Err(e)
            }
        }
    }
}

impl Default for ConfigBus {
    fn default() -> Self {
        Self::with_defaults()
    }
}
