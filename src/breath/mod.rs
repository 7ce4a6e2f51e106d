//! The breathing cycle: phases, timing schedule and controller.
//!
//! - [`phase`]: Inhale / Hold / Exhale and the Grow / Shrink visual hint
//! - [`cycle`]: immutable cycle timing and its step schedule
//! - [`controller`]: the tick-driven state machine and its observers
//! - [`clock`]: time sources that drive the controller

pub mod clock;
pub mod controller;
pub mod cycle;
pub mod phase;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{
    Activation, BreathController, NullSink, PhaseSink, Recorder, Snapshot, Transition,
};
pub use cycle::{CycleConfig, CyclePosition, Step, DEFAULT_TOTAL, MAX_TOTAL, MIN_TOTAL};
pub use phase::{Phase, PhaseLabels, VisualState};
