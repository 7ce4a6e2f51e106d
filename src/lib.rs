//! breather - A guided breathing timer for the terminal
//!
//! This crate drives a repeating Inhale / Hold / Exhale cycle and exposes
//! the current phase label and a Grow / Shrink visual hint to a
//! presentation layer: a headless line printer or an animated TUI.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod breath;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod output;
pub mod tui;

pub use breath::{BreathController, CycleConfig, Phase, PhaseSink, Transition, VisualState};
pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::BreatherError;
