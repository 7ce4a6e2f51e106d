//! Error types for breather.

use thiserror::Error;

/// Errors that can occur while configuring or running a breathing session.
#[derive(Debug, Error)]
pub enum BreatherError {
    /// Configuration could not be read, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The cycle configuration is unusable.
    #[error("Invalid cycle: {0}")]
    InvalidCycle(String),

    /// The terminal could not be set up, drawn to, or read from.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
