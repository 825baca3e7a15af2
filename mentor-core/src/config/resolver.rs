//! Configuration resolution: schema defaults → baseline TOML → runtime
//! overrides → environment variables.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::MentorConfig;
use crate::constants::ENV_PREFIX;
use crate::errors::ConfigError;

/// Resolve a configuration bundle from the layered sources.
///
/// `baseline` is the versioned baseline TOML document; `overrides` is a
/// runtime override table merged on top of it. Environment variables are
/// read from the process environment. Validation failures reject the whole
/// resolution so callers can fall back to last-known-good.
pub fn resolve(
    baseline: Option<&str>,
    overrides: Option<&toml::Table>,
) -> Result<MentorConfig, ConfigError> {
    let env: HashMap<String, String> = std::env::vars()
        .filter(|(k, _)| k.starts_with(ENV_PREFIX))
        .collect();
    resolve_with_env(baseline, overrides, &env)
}

/// Resolve with an explicit environment map (injectable for tests).
pub fn resolve_with_env(
    baseline: Option<&str>,
    overrides: Option<&toml::Table>,
    env: &HashMap<String, String>,
) -> Result<MentorConfig, ConfigError> {
    // Layer 1: schema defaults, expressed as an empty table deserialized
    // through the serde(default) chain.
    let mut table = toml::Table::new();

    // Layer 2: versioned baseline.
    if let Some(doc) = baseline {
        let parsed: toml::Table = doc.parse().map_err(|e: toml::de::Error| {
            ConfigError::Parse {
                reason: e.to_string(),
            }
        })?;
        merge_tables(&mut table, &parsed);
    }

    // Layer 3: runtime overrides.
    if let Some(over) = overrides {
        merge_tables(&mut table, over);
    }

    let mut config: MentorConfig =
        toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::Parse {
                reason: e.to_string(),
            })?;

    // Layer 4: explicit environment overrides.
    apply_env(&mut config, env)?;

    config.validate()?;
    debug!(
        budget_ms = config.engine.budget_ms,
        score_floor = config.retrieval.score_floor,
        "configuration resolved"
    );
    Ok(config)
}

/// Deep-merge `incoming` into `base`. Tables merge recursively; any other
/// value replaces wholesale.
fn merge_tables(base: &mut toml::Table, incoming: &toml::Table) {
    for (key, value) in incoming {
        match (base.get_mut(key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(new)) => {
                merge_tables(existing, new);
            }
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Apply the documented `MENTOR_*` environment overrides.
fn apply_env(config: &mut MentorConfig, env: &HashMap<String, String>) -> Result<(), ConfigError> {
    for (key, value) in env {
        let invalid = || ConfigError::Env {
            key: key.clone(),
            value: value.clone(),
        };
        match key.as_str() {
            "MENTOR_ENGINE_BUDGET_MS" => {
                config.engine.budget_ms = value.parse().map_err(|_| invalid())?;
            }
            "MENTOR_SCORE_FLOOR" => {
                config.retrieval.score_floor = value.parse().map_err(|_| invalid())?;
            }
            "MENTOR_PACKET_TTL_SECS" => {
                config.cache.packet_ttl_secs = value.parse().map_err(|_| invalid())?;
            }
            "MENTOR_EMISSION_BUDGET" => {
                config.gate.emission_budget = value.parse().map_err(|_| invalid())?;
            }
            "MENTOR_TIER2_ENABLED" => {
                config.synthesis.tier2_enabled = value.parse().map_err(|_| invalid())?;
            }
            "MENTOR_WHISPER_ENABLED" => {
                config.gate.whisper_enabled = value.parse().map_err(|_| invalid())?;
            }
            other => {
                // Unknown MENTOR_ keys are ignored, not fatal.
                warn!(key = other, "ignoring unrecognized environment override");
            }
        }
    }
    Ok(())
}
