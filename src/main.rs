use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;

use breather::cli::args::{Cli, Commands, ConfigArgs, ConfigCommands};
use breather::cli::commands::{self, Context};
use breather::config::Paths;
use breather::logging::{self, LogTarget};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let paths = Paths::resolve(cli.config_file)?;

    // The TUI owns the screen, so its logs go to a file.
    if matches!(cli.command, Commands::Tui(_)) {
        logging::init(cli.verbose, LogTarget::File(&paths.log_file))
            .context("failed to open log file")?;
    } else {
        logging::init(cli.verbose, LogTarget::Stderr)?;
    }

    // Writing or locating the file must not depend on its current contents.
    let ctx = if matches!(
        cli.command,
        Commands::Config(ConfigArgs {
            command: ConfigCommands::Init { .. } | ConfigCommands::Path,
        })
    ) {
        Context::load_or_default(&paths, cli.output)
    } else {
        Context::load(&paths, cli.output).context("failed to load config")?
    };
    ctx.config.general.color.apply();

    let output = match cli.command {
        Commands::Run(args) => {
            commands::run(&ctx, args)?;
            String::new()
        }
        Commands::Tui(args) => {
            commands::tui(&ctx, &args)?;
            String::new()
        }
        Commands::Schedule(args) => commands::schedule(&ctx, &args)?,
        Commands::Config(args) => commands::config(&ctx, args.command)?,
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
