//! Shared utilities for breather.
//!
//! Duration parsing/formatting and the presentation variants used by both
//! the headless runner and the TUI.

mod duration;
mod variant;

pub use duration::{
    format_duration, format_duration_mmss, format_duration_precise, parse_duration,
};
pub use variant::{Palette, Variant};
