//! Configuration management for breather.
//!
//! This module handles loading and saving configuration from `~/.breather/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, CycleSettings, DisplayConfig, GeneralConfig};
