//! Configuration settings for breather.
//!
//! Settings are loaded from `~/.breather/config.yaml`.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::breath::{CycleConfig, PhaseLabels};
use crate::cli::args::OutputFormat;
use crate::core::Variant;
use crate::error::BreatherError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Breathing cycle settings.
    pub cycle: CycleSettings,
    /// Presentation settings.
    pub display: DisplayConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to all `colored` output.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Breathing cycle settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CycleSettings {
    /// Length of one full Inhale/Hold/Exhale cycle in milliseconds.
    #[serde(default = "default_total_ms")]
    pub total_ms: u64,
    /// Stop the headless runner after this many cycles (unset = endless).
    #[serde(default)]
    pub cycles: Option<u32>,
    /// Text shown for each phase.
    #[serde(default)]
    pub labels: PhaseLabels,
}

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Widget variant.
    #[serde(default)]
    pub variant: Variant,
    /// TUI redraw interval in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_total_ms() -> u64 {
    7500
}

const fn default_tick_rate_ms() -> u64 {
    50
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            total_ms: default_total_ms(),
            cycles: None,
            labels: PhaseLabels::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl CycleSettings {
    /// Validate the configured total and build the cycle timing.
    ///
    /// # Errors
    ///
    /// Returns `BreatherError::InvalidCycle` if the total is out of range.
    pub fn cycle_config(&self) -> Result<CycleConfig, BreatherError> {
        CycleConfig::from_millis(self.total_ms)
    }
}

impl DisplayConfig {
    /// TUI redraw interval, never shorter than 10ms.
    #[must_use]
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, BreatherError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            BreatherError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        // An empty file deserializes to null rather than an empty mapping.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            BreatherError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), BreatherError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| BreatherError::Config(format!("Failed to serialize config: {e}")))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, contents).map_err(|e| {
            BreatherError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}
