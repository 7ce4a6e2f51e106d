//! Output formatting for breather.
//!
//! This module provides formatters for schedules, phase changes and
//! configuration in pretty and JSON form.

mod json;
mod pretty;

use chrono::Local;

use crate::breath::{CycleConfig, PhaseLabels, Transition};
use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::core::Variant;
use crate::error::BreatherError;

pub use json::*;
pub use pretty::*;

/// Format the schedule of one cycle based on output format
///
/// # Errors
///
/// Returns `BreatherError::Json` if JSON serialization fails.
pub fn format_schedule(
    cycle: &CycleConfig,
    labels: &PhaseLabels,
    format: OutputFormat,
) -> Result<String, BreatherError> {
    match format {
        OutputFormat::Pretty => Ok(format_schedule_pretty(cycle, labels)),
        OutputFormat::Json => format_schedule_json(cycle, labels),
    }
}

/// Format a phase change based on output format
///
/// # Errors
///
/// Returns `BreatherError::Json` if JSON serialization fails.
pub fn format_transition(
    transition: &Transition,
    variant: Variant,
    format: OutputFormat,
) -> Result<String, BreatherError> {
    match format {
        OutputFormat::Pretty => Ok(format_transition_pretty(transition, variant)),
        OutputFormat::Json => format_transition_json(transition, Local::now()),
    }
}

/// Format the configuration based on output format
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn format_config(config: &Config, format: OutputFormat) -> Result<String, BreatherError> {
    match format {
        OutputFormat::Pretty => Ok(serde_yaml::to_string(config)?.trim_end().to_string()),
        OutputFormat::Json => to_json(config),
    }
}
