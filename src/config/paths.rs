//! Path resolution for breather configuration and log files.
//!
//! All breather files live in `~/.breather/`:
//! - `config.yaml` - Main configuration file
//! - `breather.log` - Log output of the interactive TUI
//!
//! With `--config`, the log file moves next to the chosen config file.

use std::path::PathBuf;

use crate::error::BreatherError;

/// Paths to breather configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.breather/`
    pub root: PathBuf,
    /// Config file: `~/.breather/config.yaml`
    pub config_file: PathBuf,
    /// Log file: `~/.breather/breather.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, BreatherError> {
        let home = std::env::var("HOME").map_err(|_| {
            BreatherError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".breather")))
    }

    /// Resolve paths from an explicit config file, or the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no config file was given and the home directory
    /// cannot be determined.
    pub fn resolve(config_file: Option<PathBuf>) -> Result<Self, BreatherError> {
        config_file.map_or_else(Self::new, |file| Ok(Self::for_config(file)))
    }

    /// Paths for a config file at a custom location.
    ///
    /// The log file sits next to it.
    #[must_use]
    pub fn for_config(config_file: PathBuf) -> Self {
        let root = config_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), PathBuf::from);
        Self {
            log_file: root.join("breather.log"),
            config_file,
            root,
        }
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            log_file: root.join("breather.log"),
            root,
        }
    }
}
