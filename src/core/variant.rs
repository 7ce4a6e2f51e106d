//! Presentation variants of the breathing widget.
//!
//! Variants only change how phases are drawn, never their timing.

use std::fmt;

use clap::ValueEnum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::breath::VisualState;

/// Visual style of the breathing widget.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Solid circle in a calm green palette.
    #[default]
    Classic,
    /// Layered rings in a magenta and blue palette.
    Gradient,
}

/// Colors used to draw a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Color of the breathing element while growing.
    pub grow: Color,
    /// Color of the breathing element while shrinking.
    pub shrink: Color,
    /// Borders, pointer and accents.
    pub accent: Color,
}

impl Variant {
    /// Display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Gradient => "Gradient",
        }
    }

    /// The other variant.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Classic => Self::Gradient,
            Self::Gradient => Self::Classic,
        }
    }

    /// Terminal palette.
    #[must_use]
    pub const fn palette(self) -> Palette {
        match self {
            Self::Classic => Palette {
                grow: Color::Green,
                shrink: Color::Cyan,
                accent: Color::White,
            },
            Self::Gradient => Palette {
                grow: Color::Magenta,
                shrink: Color::Blue,
                accent: Color::LightMagenta,
            },
        }
    }

    /// Number of concentric rings drawn for the breathing element.
    #[must_use]
    pub const fn rings(self) -> usize {
        match self {
            Self::Classic => 1,
            Self::Gradient => 4,
        }
    }

    /// Single-character marker for a visual state in plain output.
    #[must_use]
    pub const fn glyph(self, visual: VisualState) -> &'static str {
        match (self, visual) {
            (Self::Classic, VisualState::Grow) => "●",
            (Self::Classic, VisualState::Shrink) => "·",
            (Self::Gradient, VisualState::Grow) => "◉",
            (Self::Gradient, VisualState::Shrink) => "◌",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
