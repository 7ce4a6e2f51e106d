//! Command implementations for breather.
//!
//! This module contains the implementation of all CLI commands.

mod config;
mod run;

pub use config::config;
pub use run::{drive, run, LineSink};

use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::Shell;
use tracing::warn;

use crate::breath::CycleConfig;
use crate::cli::args::{Cli, CycleArgs, OutputFormat, ScheduleArgs, TuiArgs};
use crate::config::{Config, Paths};
use crate::core::parse_duration;
use crate::error::BreatherError;
use crate::output::format_schedule;

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration.
    pub config: Config,
    /// Where the configuration was (or would be) loaded from.
    pub config_path: PathBuf,
    /// Output format for this invocation.
    pub format: OutputFormat,
}

impl Context {
    /// Load the configuration and resolve the output format.
    ///
    /// An explicit `--output` wins over the config file's default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load(paths: &Paths, output: Option<OutputFormat>) -> Result<Self, BreatherError> {
        let config = Config::load_from_path(&paths.config_file)?;
        Ok(Self::with_config(paths, config, output))
    }

    /// Like [`load`](Self::load), but an unreadable config file falls back
    /// to the defaults.
    ///
    /// Used by commands that must work on a broken file, such as
    /// `config init --force`.
    #[must_use]
    pub fn load_or_default(paths: &Paths, output: Option<OutputFormat>) -> Self {
        let config = Config::load_from_path(&paths.config_file).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring unreadable config file");
            Config::default()
        });
        Self::with_config(paths, config, output)
    }

    fn with_config(paths: &Paths, config: Config, output: Option<OutputFormat>) -> Self {
        let format = output.unwrap_or(config.general.default_output);
        Self {
            config,
            config_path: paths.config_file.clone(),
            format,
        }
    }
}

/// Build the cycle timing from `--total`, falling back to the config file.
///
/// # Errors
///
/// Returns `BreatherError::InvalidCycle` if the duration cannot be parsed
/// or is out of range.
pub fn resolve_cycle(ctx: &Context, args: &CycleArgs) -> Result<CycleConfig, BreatherError> {
    match args.total.as_deref() {
        Some(raw) => {
            let total = parse_duration(raw).ok_or_else(|| {
                BreatherError::InvalidCycle(format!(
                    "could not parse duration '{raw}' (try 7500, 7500ms, 7.5s or 1m)"
                ))
            })?;
            CycleConfig::new(total)
        }
        None => ctx.config.cycle.cycle_config(),
    }
}

/// Execute the schedule command.
///
/// # Errors
///
/// Returns an error if the cycle settings are invalid or formatting fails.
pub fn schedule(ctx: &Context, args: &ScheduleArgs) -> Result<String, BreatherError> {
    let cycle = resolve_cycle(ctx, &args.cycle)?;
    format_schedule(&cycle, &ctx.config.cycle.labels, ctx.format)
}

/// Execute the tui command.
///
/// # Errors
///
/// Returns an error if the cycle settings are invalid or the terminal fails.
pub fn tui(ctx: &Context, args: &TuiArgs) -> Result<(), BreatherError> {
    let cycle = resolve_cycle(ctx, &args.cycle)?;
    let variant = args.variant.unwrap_or(ctx.config.display.variant);
    crate::tui::run(
        cycle,
        ctx.config.cycle.labels.clone(),
        variant,
        ctx.config.display.tick_rate(),
    )
}

/// Generate shell completions for the specified shell.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn completions(shell: Shell) -> Result<String, BreatherError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "breather", &mut buf);
    String::from_utf8(buf).map_err(|e| BreatherError::Config(format!("UTF-8 error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn context() -> Context {
        Context {
            config: Config::default(),
            config_path: PathBuf::from("config.yaml"),
            format: OutputFormat::Json,
        }
    }

    #[test]
    fn test_context_load_prefers_flag() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "general:\n  default_output: json\n").unwrap();

        let paths = Paths::for_config(path.clone());

        let ctx = Context::load(&paths, None).unwrap();
        assert_eq!(ctx.format, OutputFormat::Json);
        assert_eq!(ctx.config_path, path);

        let ctx = Context::load(&paths, Some(OutputFormat::Pretty)).unwrap();
        assert_eq!(ctx.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_context_load_or_default_survives_broken_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "cycle: [oops").unwrap();
        let paths = Paths::for_config(path.clone());

        assert!(matches!(
            Context::load(&paths, None),
            Err(BreatherError::Config(_))
        ));

        let ctx = Context::load_or_default(&paths, Some(OutputFormat::Json));
        assert_eq!(ctx.config, Config::default());
        assert_eq!(ctx.config_path, path);
        assert_eq!(ctx.format, OutputFormat::Json);
    }

    #[test]
    fn test_resolve_cycle_override() {
        let ctx = context();
        let args = CycleArgs {
            total: Some("10s".to_string()),
        };
        assert_eq!(
            resolve_cycle(&ctx, &args).unwrap().total(),
            Duration::from_secs(10)
        );

        let args = CycleArgs::default();
        assert_eq!(
            resolve_cycle(&ctx, &args).unwrap().total(),
            Duration::from_millis(7500)
        );
    }

    #[test]
    fn test_resolve_cycle_rejects_garbage() {
        let ctx = context();
        let args = CycleArgs {
            total: Some("soon".to_string()),
        };
        assert!(matches!(
            resolve_cycle(&ctx, &args),
            Err(BreatherError::InvalidCycle(_))
        ));
    }

    #[test]
    fn test_schedule_json() {
        let out = schedule(&context(), &ScheduleArgs { cycle: CycleArgs::default() }).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["total_ms"], 7500);
    }

    #[test]
    fn test_completions() {
        let script = completions(Shell::Bash).unwrap();
        assert!(script.contains("breather"));
    }
}
