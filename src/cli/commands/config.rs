//! Config command implementation.

use colored::Colorize;
use tracing::info;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::cli::commands::Context;
use crate::config::Config;
use crate::error::BreatherError;
use crate::output::{format_config, to_json};

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config file cannot be written or formatted.
pub fn config(ctx: &Context, cmd: ConfigCommands) -> Result<String, BreatherError> {
    match cmd {
        ConfigCommands::Show => format_config(&ctx.config, ctx.format),
        ConfigCommands::Path => match ctx.format {
            OutputFormat::Json => to_json(&serde_json::json!({
                "path": ctx.config_path,
                "exists": ctx.config_path.exists(),
            })),
            OutputFormat::Pretty => Ok(ctx.config_path.display().to_string()),
        },
        ConfigCommands::Init { force } => init(ctx, force),
    }
}

fn init(ctx: &Context, force: bool) -> Result<String, BreatherError> {
    let path = &ctx.config_path;
    if path.exists() && !force {
        return Err(BreatherError::Config(format!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        )));
    }

    Config::default().save_to_path(path)?;
    info!(path = %path.display(), "wrote default config");

    match ctx.format {
        OutputFormat::Json => to_json(&serde_json::json!({ "path": path, "written": true })),
        OutputFormat::Pretty => Ok(format!("Wrote {}", path.display()).green().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context(dir: &TempDir, format: OutputFormat) -> Context {
        Context {
            config: Config::default(),
            config_path: dir.path().join("config.yaml"),
            format,
        }
    }

    #[test]
    fn test_init_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, OutputFormat::Json);

        config(&ctx, ConfigCommands::Init { force: false }).unwrap();

        let loaded = Config::load_from_path(&ctx.config_path).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, OutputFormat::Json);
        std::fs::write(&ctx.config_path, "cycle:\n  total_ms: 9000\n").unwrap();

        let err = config(&ctx, ConfigCommands::Init { force: false }).unwrap_err();
        assert!(err.to_string().contains("--force"));

        config(&ctx, ConfigCommands::Init { force: true }).unwrap();
        let loaded = Config::load_from_path(&ctx.config_path).unwrap();
        assert_eq!(loaded.cycle.total_ms, 7500);
    }

    #[test]
    fn test_show_and_path() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, OutputFormat::Pretty);

        let shown = config(&ctx, ConfigCommands::Show).unwrap();
        assert!(shown.contains("total_ms: 7500"));

        let path = config(&ctx, ConfigCommands::Path).unwrap();
        assert!(path.ends_with("config.yaml"));
    }
}
