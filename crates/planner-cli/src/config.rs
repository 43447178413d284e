use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use planner_engine::SlotFinderConfig;
use serde::Deserialize;

static CONFIG_FILE: &str = "config.toml";

/// Configuration at ~/.config/planner/config.toml
///
/// Every field is optional. Command-line flags win over file values.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// IANA time zone used for wall-clock arithmetic. Defaults to UTC.
    pub timezone: Option<String>,
    pub days_to_check: Option<u32>,
    pub default_duration_minutes: Option<i64>,
    pub slots: SlotFinderConfig,
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("planner");

        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Load from `explicit` if given (it must exist), otherwise from the
    /// default location if present, otherwise all defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::config_path() {
                Ok(path) if path.exists() => path,
                _ => {
                    tracing::debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Slot finder settings with the top-level shortcuts applied.
    pub fn slot_finder_config(&self) -> SlotFinderConfig {
        let mut slots = self.slots.clone();
        if let Some(days) = self.days_to_check {
            slots.default_days_to_check = days;
        }
        if let Some(minutes) = self.default_duration_minutes {
            slots.default_duration_minutes = minutes;
        }
        slots
    }
}
