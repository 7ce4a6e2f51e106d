//! The breath cycle controller.
//!
//! The controller is a tick-driven state machine. It never schedules
//! timers of its own: callers feed it clock readings through
//! [`BreathController::advance`] and it reports every schedule step that
//! has been reached since the previous reading. Stopping the controller
//! is therefore enough to guarantee that nothing fires afterwards.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::breath::clock::Clock;
use crate::breath::cycle::{serialize_millis, CycleConfig};
use crate::breath::phase::{Phase, PhaseLabels, VisualState};

/// A phase change reported to a [`PhaseSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// 1-based cycle number.
    pub cycle: u64,
    /// Phase entered.
    pub phase: Phase,
    /// Label to display for the phase.
    pub label: String,
    /// Visual state in effect from now on.
    pub visual: VisualState,
    /// Scheduled time of the change, measured from activation.
    #[serde(rename = "offset_ms", serialize_with = "serialize_millis")]
    pub at: Duration,
}

/// Receives phase changes from a running controller.
#[cfg_attr(test, mockall::automock)]
pub trait PhaseSink {
    /// Called once per phase change, in schedule order.
    fn on_transition(&mut self, transition: &Transition);
}

/// Sink that keeps every transition it receives.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    /// Transitions in the order they were reported.
    pub transitions: Vec<Transition>,
}

impl PhaseSink for Recorder {
    fn on_transition(&mut self, transition: &Transition) {
        self.transitions.push(transition.clone());
    }
}

/// Sink that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl PhaseSink for NullSink {
    fn on_transition(&mut self, _transition: &Transition) {}
}

/// Observable state of an active controller at a given instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// 1-based cycle number.
    pub cycle: u64,
    /// Current phase.
    pub phase: Phase,
    /// Label of the current phase.
    pub label: String,
    /// Current visual state.
    pub visual: VisualState,
    /// Fraction of the current phase that has elapsed (0.0 - 1.0).
    pub phase_progress: f64,
    /// Fraction of the current cycle that has elapsed (0.0 - 1.0).
    pub cycle_progress: f64,
}

#[derive(Debug, Clone, Copy)]
struct ActiveState {
    origin: Duration,
    cycle: u64,
    step: usize,
}

/// Drives the Inhale / Hold / Exhale sequence.
#[derive(Debug)]
pub struct BreathController<S> {
    cycle: CycleConfig,
    labels: PhaseLabels,
    sink: S,
    active: Option<ActiveState>,
}

impl<S: PhaseSink> BreathController<S> {
    /// Create an inactive controller.
    #[must_use]
    pub fn new(cycle: CycleConfig, sink: S) -> Self {
        Self {
            cycle,
            labels: PhaseLabels::default(),
            sink,
            active: None,
        }
    }

    /// Replace the phase labels.
    #[must_use]
    pub fn with_labels(mut self, labels: PhaseLabels) -> Self {
        self.labels = labels;
        self
    }

    /// The cycle timing this controller runs.
    #[must_use]
    pub const fn cycle_config(&self) -> &CycleConfig {
        &self.cycle
    }

    /// Borrow the sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutably borrow the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the controller and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Whether the controller is running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Activate at clock reading `now`.
    ///
    /// Immediately reports `Inhale` / `Grow`. Activating an active
    /// controller restarts it from the first cycle.
    pub fn start(&mut self, now: Duration) {
        debug!(
            total = ?self.cycle.total(),
            restart = self.active.is_some(),
            "breath controller activated"
        );
        self.active = Some(ActiveState {
            origin: now,
            cycle: 1,
            step: 0,
        });
        self.emit(1, 0);
    }

    /// Feed a clock reading, reporting every step reached since the last one.
    ///
    /// Returns the number of transitions reported. Readings earlier than
    /// the last one are ignored. If more than a whole cycle was missed,
    /// only the latest cycle is replayed.
    pub fn advance(&mut self, now: Duration) -> usize {
        let Some(mut state) = self.active else {
            return 0;
        };

        let elapsed = now.saturating_sub(state.origin);
        let target = self.cycle.position(elapsed);
        let mut reported = 0;

        if target.cycle > state.cycle + 1 {
            warn!(
                from = state.cycle,
                to = target.cycle,
                "clock jumped past whole cycles; skipping ahead"
            );
            state.cycle = target.cycle;
            state.step = 0;
            self.emit(state.cycle, state.step);
            reported += 1;
        }

        let last_step = self.cycle.steps().len() - 1;
        while (state.cycle, state.step) < (target.cycle, target.step) {
            if state.step == last_step {
                state.cycle += 1;
                state.step = 0;
            } else {
                state.step += 1;
            }
            self.emit(state.cycle, state.step);
            reported += 1;
        }

        self.active = Some(state);
        reported
    }

    /// Deactivate. No transition is reported after this returns.
    pub fn stop(&mut self) {
        if let Some(state) = self.active.take() {
            debug!(cycle = state.cycle, "breath controller deactivated");
        }
    }

    /// The current phase and visual state, if active.
    #[must_use]
    pub fn current(&self) -> Option<(Phase, VisualState)> {
        let state = self.active?;
        let step = self.cycle.steps()[state.step];
        Some((step.phase, step.visual))
    }

    /// Label of the current phase, if active.
    #[must_use]
    pub fn current_label(&self) -> Option<&str> {
        self.current().map(|(phase, _)| self.labels.get(phase))
    }

    /// Clock reading at which the next transition is due, if active.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        let state = self.active?;
        let (cycle, step) = if state.step + 1 == self.cycle.steps().len() {
            (state.cycle + 1, 0)
        } else {
            (state.cycle, state.step + 1)
        };
        Some(state.origin + self.cycle.step_start(cycle, step))
    }

    /// Observable state at clock reading `now`, if active.
    ///
    /// Phase and visual reflect the last reported transition; call
    /// [`advance`](Self::advance) first to bring them up to date.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn snapshot(&self, now: Duration) -> Option<Snapshot> {
        let state = self.active?;
        let step = self.cycle.steps()[state.step];
        let elapsed = now.saturating_sub(state.origin);

        let step_start = self.cycle.step_start(state.cycle, state.step);
        let cycle_start = self.cycle.step_start(state.cycle, 0);
        let ratio = |part: Duration, whole: Duration| {
            if whole.is_zero() {
                1.0
            } else {
                (part.as_secs_f64() / whole.as_secs_f64()).clamp(0.0, 1.0)
            }
        };

        Some(Snapshot {
            cycle: state.cycle,
            phase: step.phase,
            label: self.labels.get(step.phase).to_string(),
            visual: step.visual,
            phase_progress: ratio(elapsed.saturating_sub(step_start), step.duration),
            cycle_progress: ratio(elapsed.saturating_sub(cycle_start), self.cycle.total()),
        })
    }

    /// Activate against a clock, returning a guard that deactivates on drop.
    pub fn activate<'a, C: Clock>(&'a mut self, clock: &'a C) -> Activation<'a, S, C> {
        self.start(clock.now());
        Activation {
            controller: self,
            clock,
        }
    }

    fn emit(&mut self, cycle: u64, step: usize) {
        let Some(entry) = self.cycle.steps().get(step).copied() else {
            return;
        };
        if step == 0 {
            debug!(cycle, "breath cycle started");
        }
        let transition = Transition {
            cycle,
            phase: entry.phase,
            label: self.labels.get(entry.phase).to_string(),
            visual: entry.visual,
            at: self.cycle.step_start(cycle, step),
        };
        trace!(cycle, phase = %entry.phase, visual = %entry.visual, "phase transition");
        self.sink.on_transition(&transition);
    }
}

/// A controller activated against a clock.
///
/// Dropping the guard deactivates the controller, so leaving the scope
/// that owns it releases everything the session was driving.
pub struct Activation<'a, S: PhaseSink, C: Clock> {
    controller: &'a mut BreathController<S>,
    clock: &'a C,
}

impl<S: PhaseSink, C: Clock> Activation<'_, S, C> {
    /// Sample the clock and report any due transitions.
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now();
        self.controller.advance(now)
    }

    /// Report transitions due up to `now`, a reading of the same clock.
    ///
    /// Lets a driver settle the schedule at an exact instant, such as the
    /// end of its last cycle, regardless of when it woke up.
    pub fn poll_at(&mut self, now: Duration) -> usize {
        self.controller.advance(now)
    }

    /// Time left until the next transition is due.
    #[must_use]
    pub fn until_next(&self) -> Duration {
        self.controller
            .next_deadline()
            .map_or(Duration::ZERO, |deadline| {
                deadline.saturating_sub(self.clock.now())
            })
    }

    /// Observable state right now.
    #[must_use]
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.controller.snapshot(self.clock.now())
    }

    /// The underlying controller.
    #[must_use]
    pub fn controller(&self) -> &BreathController<S> {
        &*self.controller
    }

    /// Mutably borrow the controller's sink.
    pub fn sink_mut(&mut self) -> &mut S {
        self.controller.sink_mut()
    }
}

impl<S: PhaseSink, C: Clock> Drop for Activation<'_, S, C> {
    fn drop(&mut self) {
        self.controller.stop();
    }
}
