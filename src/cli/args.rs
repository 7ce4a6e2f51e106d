use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::core::Variant;

#[derive(Parser)]
#[command(name = "breather")]
#[command(about = "A guided breathing timer for the terminal")]
#[command(long_about = "breather - A guided breathing timer for the terminal

Cycles through Inhale, Hold and Exhale on a fixed rhythm. Inhale takes two
fifths of the cycle, Hold one fifth, and Exhale the rest.

QUICK START:
  breather tui               Animated breathing circle
  breather run --cycles 4    Print four cycles of phase changes
  breather schedule          Show the timing of one cycle

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  breather <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output,
    /// or 'json' for machine-readable output suitable for scripting.
    /// Defaults to the config file's setting.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Path to the config file
    ///
    /// Defaults to ~/.breather/config.yaml. The tui log (breather.log) is
    /// written to the same directory.
    #[arg(long = "config", global = true, env = "BREATHER_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run breathing cycles and print each phase change
    ///
    /// Prints a line every time the phase changes. With --output json each
    /// line is a JSON object, suitable for piping into other tools.
    ///
    /// # Examples
    ///
    ///   breather run                    Run until interrupted
    ///   breather run --cycles 4         Stop after four cycles
    ///   breather run --total 10s        Slower rhythm
    ///   breather run -o json | jq .label
    #[command(alias = "r")]
    Run(RunArgs),

    /// Interactive animated breathing circle
    ///
    /// Keys: q/Esc quit, v switch variant.
    Tui(TuiArgs),

    /// Show the phase schedule of one cycle
    ///
    /// # Examples
    ///
    ///   breather schedule
    ///   breather schedule --total 10s -o json
    Schedule(ScheduleArgs),

    /// Manage the config file
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   breather completions zsh > ~/.zsh/completions/_breather
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by every command that runs a cycle.
#[derive(Args, Debug, Clone, Default)]
pub struct CycleArgs {
    /// Cycle length (e.g., 7500, 7500ms, 7.5s, 1m)
    #[arg(long, short = 't')]
    pub total: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub cycle: CycleArgs,

    /// Stop after this many full cycles
    #[arg(long, short = 'n')]
    pub cycles: Option<u32>,

    /// Widget variant
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,
}

#[derive(Args, Debug, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub cycle: CycleArgs,

    /// Widget variant
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,
}

#[derive(Args, Debug, Clone)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub cycle: CycleArgs,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },
}
