//! Emitter — final formatting and the single agent-visible write.
//!
//! Re-enforces the character ceiling independently of the synthesizer.
//! Never raises: channel failures are swallowed and logged.

use std::sync::Arc;

use tracing::{error, trace};

use mentor_core::config::SynthesisConfig;
use mentor_core::models::Authority;
use mentor_core::traits::IOutputChannel;

use crate::truncate::truncate_preserving_action;

/// Fixed prefix per authority tier. `Silent` has no prefix because it
/// never reaches the emitter.
pub fn authority_prefix(authority: Authority) -> &'static str {
    match authority {
        Authority::Block => "[BLOCK] ",
        Authority::Warning => "[WARNING] ",
        Authority::Note => "[NOTE] ",
        Authority::Whisper => "[WHISPER] ",
        Authority::Silent => "",
    }
}

/// Writes formatted advisories to the agent-visible channel.
pub struct Emitter {
    channel: Arc<dyn IOutputChannel>,
}

impl Emitter {
    pub fn new(channel: Arc<dyn IOutputChannel>) -> Self {
        Self { channel }
    }

    /// Emit one advisory. Returns whether the write succeeded; a failed
    /// write is logged and otherwise invisible to the caller's flow.
    pub fn emit(&self, text: &str, authority: Authority, config: &SynthesisConfig) -> bool {
        if !authority.is_emittable() || text.is_empty() {
            return false;
        }
        let prefix = authority_prefix(authority);
        let body_budget = config.max_chars.saturating_sub(prefix.chars().count());
        let line = format!("{prefix}{}", truncate_preserving_action(text, body_budget));

        match self.channel.write(&line) {
            Ok(()) => {
                trace!(authority = %authority, chars = line.chars().count(), "advisory emitted");
                true
            }
            Err(e) => {
                error!(error = %e, "output channel write failed, swallowing");
                false
            }
        }
    }
}
