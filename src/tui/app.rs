//! Application state for the TUI.

use crate::breath::{
    BreathController, Clock, CycleConfig, NullSink, Phase, PhaseLabels, Snapshot, SystemClock,
};
use crate::core::Variant;

/// Smallest radius of the breathing circle, as a fraction of the largest.
const MIN_SCALE: f64 = 0.4;

/// Application state.
pub struct App<C: Clock = SystemClock> {
    controller: BreathController<NullSink>,
    clock: C,
    /// Active widget variant.
    pub variant: Variant,
    /// Status message to display.
    pub status: Option<String>,
}

impl<C: Clock> App<C> {
    /// Create the app and activate its controller.
    pub fn new(cycle: CycleConfig, labels: PhaseLabels, variant: Variant, clock: C) -> Self {
        let mut controller = BreathController::new(cycle, NullSink).with_labels(labels);
        controller.start(clock.now());
        Self {
            controller,
            clock,
            variant,
            status: None,
        }
    }

    /// Bring the controller up to date with the clock.
    pub fn tick(&mut self) {
        self.controller.advance(self.clock.now());
    }

    /// Current observable state.
    #[must_use]
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.controller.snapshot(self.clock.now())
    }

    /// The cycle timing.
    #[must_use]
    pub fn cycle(&self) -> &CycleConfig {
        self.controller.cycle_config()
    }

    /// The clock driving the app.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Whether the breathing cycle is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.controller.is_active()
    }

    /// Switch between the widget variants.
    pub fn toggle_variant(&mut self) {
        self.variant = self.variant.toggled();
        self.status = Some(format!("Variant: {}", self.variant));
    }

    /// Stop the breathing cycle.
    pub fn stop(&mut self) {
        self.controller.stop();
    }
}

impl<C: Clock> Drop for App<C> {
    fn drop(&mut self) {
        self.controller.stop();
    }
}

/// Radius of the breathing circle for a snapshot, between `MIN_SCALE` and 1.0.
///
/// Grows across Inhale, stays full through Hold, shrinks across Exhale.
#[must_use]
pub fn circle_scale(snapshot: &Snapshot) -> f64 {
    let p = snapshot.phase_progress.clamp(0.0, 1.0);
    match snapshot.phase {
        Phase::Inhale => (1.0 - MIN_SCALE).mul_add(p, MIN_SCALE),
        Phase::Hold => 1.0,
        Phase::Exhale => (1.0 - MIN_SCALE).mul_add(-p, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breath::{ManualClock, VisualState};
    use std::time::Duration;

    fn app() -> App<ManualClock> {
        App::new(
            CycleConfig::default(),
            PhaseLabels::default(),
            Variant::Classic,
            ManualClock::new(),
        )
    }

    #[test]
    fn test_app_starts_inhaling() {
        let app = app();
        assert!(app.is_running());
        let snap = app.snapshot().unwrap();
        assert_eq!(snap.phase, Phase::Inhale);
        assert_eq!(snap.visual, VisualState::Grow);
        assert_eq!(snap.label, "Breathe In!");
    }

    #[test]
    fn test_app_tick_follows_clock() {
        let mut app = app();
        app.clock().advance(Duration::from_millis(3500));
        app.tick();
        assert_eq!(app.snapshot().unwrap().phase, Phase::Hold);

        app.clock().advance(Duration::from_millis(1000));
        app.tick();
        let snap = app.snapshot().unwrap();
        assert_eq!(snap.phase, Phase::Exhale);
        assert_eq!(snap.visual, VisualState::Shrink);
    }

    #[test]
    fn test_app_stop() {
        let mut app = app();
        app.stop();
        app.clock().advance(Duration::from_secs(10));
        app.tick();
        assert!(!app.is_running());
        assert!(app.snapshot().is_none());
    }

    #[test]
    fn test_toggle_variant() {
        let mut app = app();
        app.toggle_variant();
        assert_eq!(app.variant, Variant::Gradient);
        assert_eq!(app.status.as_deref(), Some("Variant: Gradient"));
    }

    #[test]
    fn test_circle_scale() {
        let mut app = app();
        let start = circle_scale(&app.snapshot().unwrap());
        assert!((start - MIN_SCALE).abs() < 1e-9);

        app.clock().advance(Duration::from_millis(1500));
        app.tick();
        let mid = circle_scale(&app.snapshot().unwrap());
        assert!((mid - 0.7).abs() < 1e-9);

        app.clock().advance(Duration::from_millis(2000));
        app.tick();
        assert!((circle_scale(&app.snapshot().unwrap()) - 1.0).abs() < 1e-9);

        app.clock().advance(Duration::from_millis(2500));
        app.tick();
        let shrinking = circle_scale(&app.snapshot().unwrap());
        assert!((shrinking - 0.7).abs() < 1e-9);
    }
}
