//! Logging setup.
//!
//! `RUST_LOG` takes precedence; otherwise the level is derived from the
//! number of `-v` flags. Headless commands log to stderr. The TUI owns the
//! screen, so it logs to a file instead.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::BreatherError;

/// Where log lines go.
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    /// Standard error.
    Stderr,
    /// Append to a file.
    File(&'a Path),
}

/// Default filter directive for a verbosity count.
#[must_use]
pub const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)))
}

/// Install the global subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init(verbosity: u8, target: LogTarget<'_>) -> Result<(), BreatherError> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter(verbosity));

    let installed = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}
