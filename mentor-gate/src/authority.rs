//! Score → authority tier mapping.

use mentor_core::config::GateConfig;
use mentor_core::models::{Authority, SourceTag};

/// Map a boosted score to an authority tier.
///
/// Thresholds are checked highest first. BLOCK is reserved for
/// safety-critical sources; anything else clearing the block threshold
/// caps at WARNING. The whisper tier only exists while its toggle is on.
pub fn map_authority(score: f64, source: SourceTag, config: &GateConfig) -> Authority {
    let t = &config.thresholds;
    if score >= t.block && source.is_safety_critical() {
        return Authority::Block;
    }
    if score >= t.warning {
        return Authority::Warning;
    }
    if score >= t.note {
        return Authority::Note;
    }
    if score >= t.whisper && config.whisper_enabled {
        return Authority::Whisper;
    }
    Authority::Silent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_requires_safety_critical_source() {
        let config = GateConfig::default();
        assert_eq!(
            map_authority(0.99, SourceTag::Safety, &config),
            Authority::Block
        );
        assert_eq!(
            map_authority(0.99, SourceTag::Pattern, &config),
            Authority::Warning
        );
    }

    #[test]
    fn tiers_map_in_descending_order() {
        let config = GateConfig::default();
        assert_eq!(map_authority(0.85, SourceTag::Pattern, &config), Authority::Warning);
        assert_eq!(map_authority(0.65, SourceTag::Pattern, &config), Authority::Note);
        assert_eq!(map_authority(0.50, SourceTag::Pattern, &config), Authority::Whisper);
        assert_eq!(map_authority(0.10, SourceTag::Pattern, &config), Authority::Silent);
    }

    #[test]
    fn whisper_toggle_silences_the_tier() {
        let config = GateConfig {
            whisper_enabled: false,
            ..Default::default()
        };
        assert_eq!(map_authority(0.50, SourceTag::Pattern, &config), Authority::Silent);
    }
}
