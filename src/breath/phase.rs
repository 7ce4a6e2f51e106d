//! Breathing phases, visual states and their display labels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One labelled step of the breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Breathing in; the visual grows.
    Inhale,
    /// Holding the breath; the visual keeps its state.
    Hold,
    /// Breathing out; the visual shrinks.
    Exhale,
}

impl Phase {
    /// The visual state this phase switches to, if it switches at all.
    ///
    /// `Hold` keeps whatever the previous phase set.
    #[must_use]
    pub const fn visual_change(self) -> Option<VisualState> {
        match self {
            Self::Inhale => Some(VisualState::Grow),
            Self::Hold => None,
            Self::Exhale => Some(VisualState::Shrink),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Inhale => "Inhale",
            Self::Hold => "Hold",
            Self::Exhale => "Exhale",
        };
        f.write_str(name)
    }
}

/// Animation direction hint for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualState {
    /// Expand the breathing element.
    Grow,
    /// Contract the breathing element.
    Shrink,
}

impl VisualState {
    /// Lowercase name, usable as a style hook.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grow => "grow",
            Self::Shrink => "shrink",
        }
    }
}

impl fmt::Display for VisualState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text shown for each phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseLabels {
    /// Label while inhaling.
    pub inhale: String,
    /// Label while holding.
    pub hold: String,
    /// Label while exhaling.
    pub exhale: String,
}

impl PhaseLabels {
    /// Label for a phase.
    #[must_use]
    pub fn get(&self, phase: Phase) -> &str {
        match phase {
            Phase::Inhale => &self.inhale,
            Phase::Hold => &self.hold,
            Phase::Exhale => &self.exhale,
        }
    }
}

impl Default for PhaseLabels {
    fn default() -> Self {
        Self {
            inhale: "Breathe In!".to_string(),
            hold: "Hold".to_string(),
            exhale: "Breathe Out!".to_string(),
        }
    }
}
