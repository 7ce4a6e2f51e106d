//! Cycle configuration and the declarative phase schedule.
//!
//! A cycle is a fixed list of `(offset, phase, visual)` steps. The
//! controller evaluates elapsed time against this list instead of arming
//! one timer per phase.

use std::time::Duration;

use serde::Serialize;

use crate::breath::phase::{Phase, VisualState};
use crate::error::BreatherError;

/// Default length of one full breathing cycle.
pub const DEFAULT_TOTAL: Duration = Duration::from_millis(7500);

/// Shortest cycle that still gives every segment a non-zero length.
pub const MIN_TOTAL: Duration = Duration::from_millis(5);

/// Longest cycle accepted.
pub const MAX_TOTAL: Duration = Duration::from_secs(3600);

/// One entry of the cycle schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Offset from the start of the cycle.
    #[serde(rename = "offset_ms", serialize_with = "serialize_millis")]
    pub offset: Duration,
    /// How long the step lasts before the next one begins.
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
    /// Phase entered at this offset.
    pub phase: Phase,
    /// Visual state in effect during the step.
    pub visual: VisualState,
}

impl Step {
    /// A step entering `phase`; the visual carries over from `previous`
    /// unless the phase changes it.
    const fn new(
        offset: Duration,
        duration: Duration,
        phase: Phase,
        previous: VisualState,
    ) -> Self {
        let visual = match phase.visual_change() {
            Some(visual) => visual,
            None => previous,
        };
        Self {
            offset,
            duration,
            phase,
            visual,
        }
    }
}

/// Where a point in time falls within the repeating schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclePosition {
    /// 1-based cycle number.
    pub cycle: u64,
    /// Index into [`CycleConfig::steps`].
    pub step: usize,
    /// Time since the current cycle began.
    pub offset: Duration,
}

/// Immutable timing of a breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleConfig {
    total: Duration,
}

impl CycleConfig {
    /// Create a cycle with the given total length.
    ///
    /// # Errors
    ///
    /// Returns `BreatherError::InvalidCycle` if the total is shorter than
    /// [`MIN_TOTAL`] or longer than [`MAX_TOTAL`].
    pub fn new(total: Duration) -> Result<Self, BreatherError> {
        if total < MIN_TOTAL {
            return Err(BreatherError::InvalidCycle(format!(
                "total must be at least {}ms, got {}ms",
                MIN_TOTAL.as_millis(),
                total.as_millis()
            )));
        }
        if total > MAX_TOTAL {
            return Err(BreatherError::InvalidCycle(format!(
                "total must be at most {}s, got {}ms",
                MAX_TOTAL.as_secs(),
                total.as_millis()
            )));
        }
        Ok(Self { total })
    }

    /// Create a cycle from a total in milliseconds.
    ///
    /// # Errors
    ///
    /// See [`CycleConfig::new`].
    pub fn from_millis(total_ms: u64) -> Result<Self, BreatherError> {
        Self::new(Duration::from_millis(total_ms))
    }

    /// Length of one full cycle.
    #[must_use]
    pub const fn total(&self) -> Duration {
        self.total
    }

    /// Length of the inhale segment: two fifths of the cycle.
    #[must_use]
    pub fn breathe_segment(&self) -> Duration {
        (self.total / 5) * 2
    }

    /// Length of the hold segment: one fifth of the cycle.
    #[must_use]
    pub fn hold_segment(&self) -> Duration {
        self.total / 5
    }

    /// Length of the exhale segment.
    ///
    /// Exhale has no constant of its own; it runs until the next cycle.
    #[must_use]
    pub fn exhale_segment(&self) -> Duration {
        self.total
            .saturating_sub(self.breathe_segment())
            .saturating_sub(self.hold_segment())
    }

    /// The schedule of one cycle, in order.
    #[must_use]
    pub fn steps(&self) -> [Step; 3] {
        let breathe = self.breathe_segment();
        let hold = self.hold_segment();
        // The cycle wraps, so Inhale follows the previous Exhale.
        let inhale = Step::new(Duration::ZERO, breathe, Phase::Inhale, VisualState::Shrink);
        let held = Step::new(breathe, hold, Phase::Hold, inhale.visual);
        let exhale = Step::new(
            breathe + hold,
            self.exhale_segment(),
            Phase::Exhale,
            held.visual,
        );
        [inhale, held, exhale]
    }

    /// Locate `elapsed` (time since activation) within the schedule.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn position(&self, elapsed: Duration) -> CyclePosition {
        let total_nanos = self.total.as_nanos();
        let elapsed_nanos = elapsed.as_nanos();
        let completed = (elapsed_nanos / total_nanos) as u64;
        let offset = Duration::from_nanos((elapsed_nanos % total_nanos) as u64);

        let step = self
            .steps()
            .iter()
            .rposition(|s| s.offset <= offset)
            .unwrap_or(0);

        CyclePosition {
            cycle: completed + 1,
            step,
            offset,
        }
    }

    /// Absolute time, since activation, at which a step of a cycle begins.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn step_start(&self, cycle: u64, step: usize) -> Duration {
        let base = self.total.as_nanos() * u128::from(cycle.saturating_sub(1));
        let offset = self.steps().get(step).map_or(Duration::ZERO, |s| s.offset);
        Duration::from_nanos(base as u64) + offset
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            total: DEFAULT_TOTAL,
        }
    }
}

/// Serialize a duration as whole milliseconds.
#[allow(clippy::cast_possible_truncation, clippy::trivially_copy_pass_by_ref)]
pub(crate) fn serialize_millis<S: serde::Serializer>(
    d: &Duration,
    s: S,
) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}
