//! Headless runner.
//!
//! Drives a controller from the system clock and prints each phase change
//! as it happens.

use std::io::{self, Write};
use std::time::Duration;

use tracing::{debug, info};

use crate::breath::{BreathController, Clock, PhaseSink, SystemClock, Transition};
use crate::cli::args::{OutputFormat, RunArgs};
use crate::cli::commands::{resolve_cycle, Context};
use crate::core::Variant;
use crate::error::BreatherError;
use crate::output::format_transition;

/// Sink that writes one line per phase change.
///
/// The first write error is kept and every later transition is dropped.
pub struct LineSink<W: Write> {
    out: W,
    variant: Variant,
    format: OutputFormat,
    error: Option<BreatherError>,
}

impl<W: Write> LineSink<W> {
    /// Create a sink writing to `out`.
    pub const fn new(out: W, variant: Variant, format: OutputFormat) -> Self {
        Self {
            out,
            variant,
            format,
            error: None,
        }
    }

    /// Take the first error encountered, if any.
    pub fn take_error(&mut self) -> Option<BreatherError> {
        self.error.take()
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, transition: &Transition) -> Result<(), BreatherError> {
        let line = format_transition(transition, self.variant, self.format)?;
        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> PhaseSink for LineSink<W> {
    fn on_transition(&mut self, transition: &Transition) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.write(transition) {
            self.error = Some(e);
        }
    }
}

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the cycle settings are invalid or output fails.
pub fn run(ctx: &Context, args: RunArgs) -> Result<(), BreatherError> {
    let cycle = resolve_cycle(ctx, &args.cycle)?;
    let cycles = args.cycles.or(ctx.config.cycle.cycles);
    if cycles == Some(0) {
        return Err(BreatherError::InvalidCycle(
            "--cycles must be at least 1".to_string(),
        ));
    }
    let variant = args.variant.unwrap_or(ctx.config.display.variant);

    info!(
        total = ?cycle.total(),
        cycles = ?cycles,
        %variant,
        "starting breathing session"
    );

    let stdout = io::stdout();
    let sink = LineSink::new(stdout.lock(), variant, ctx.format);
    let mut controller =
        BreathController::new(cycle, sink).with_labels(ctx.config.cycle.labels.clone());
    let clock = SystemClock::new();

    match drive(
        &mut controller,
        &clock,
        cycles,
        std::thread::sleep,
        LineSink::take_error,
    ) {
        Err(BreatherError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("output closed, stopping");
            Ok(())
        }
        result => result,
    }
}

/// Drive a controller until `cycles` full cycles have elapsed (or forever).
///
/// `wait` blocks for the given duration; `check` inspects the sink after
/// each poll and aborts the session on error. The controller is always
/// deactivated on return.
///
/// # Errors
///
/// Returns the first error reported by `check`.
pub fn drive<S, C, W, F>(
    controller: &mut BreathController<S>,
    clock: &C,
    cycles: Option<u32>,
    mut wait: W,
    mut check: F,
) -> Result<(), BreatherError>
where
    S: PhaseSink,
    C: Clock,
    W: FnMut(Duration),
    F: FnMut(&mut S) -> Option<BreatherError>,
{
    let total = controller.cycle_config().total();
    let origin = clock.now();
    let end = cycles.map(|n| origin + total * n);

    let mut active = controller.activate(clock);
    if let Some(e) = check(active.sink_mut()) {
        return Err(e);
    }

    loop {
        if let Some(end) = end {
            let now = clock.now();
            if now >= end {
                // Settle anything due before the end without starting the next cycle.
                active.poll_at(end.saturating_sub(Duration::from_nanos(1)));
                if let Some(e) = check(active.sink_mut()) {
                    return Err(e);
                }
                break;
            }
        }

        let mut pause = active.until_next();
        if let Some(end) = end {
            pause = pause.min(end.saturating_sub(clock.now()));
        }
        if !pause.is_zero() {
            wait(pause);
        }

        if end.is_some_and(|end| clock.now() >= end) {
            continue;
        }
        active.poll();
        if let Some(e) = check(active.sink_mut()) {
            return Err(e);
        }
    }

    info!("breathing session finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breath::{CycleConfig, ManualClock, Phase, Recorder};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_drive_stops_after_cycles() {
        let clock = ManualClock::new();
        let mut controller = BreathController::new(CycleConfig::default(), Recorder::default());

        drive(&mut controller, &clock, Some(2), |d| clock.advance(d), |_| None).unwrap();

        assert!(!controller.is_active());
        assert_eq!(clock.now(), ms(15_000));
        let seen: Vec<(u64, Phase, u128)> = controller
            .sink()
            .transitions
            .iter()
            .map(|t| (t.cycle, t.phase, t.at.as_millis()))
            .collect();
        assert_eq!(
            seen,
            vec![
                (1, Phase::Inhale, 0),
                (1, Phase::Hold, 3000),
                (1, Phase::Exhale, 4500),
                (2, Phase::Inhale, 7500),
                (2, Phase::Hold, 10_500),
                (2, Phase::Exhale, 12_000),
            ]
        );
    }

    #[test]
    fn test_drive_settles_when_waking_late() {
        let clock = ManualClock::new();
        let mut controller = BreathController::new(CycleConfig::default(), Recorder::default());

        // Every wait oversleeps by a full second.
        drive(
            &mut controller,
            &clock,
            Some(1),
            |d| clock.advance(d + ms(1000)),
            |_| None,
        )
        .unwrap();

        let phases: Vec<Phase> = controller.sink().transitions.iter().map(|t| t.phase).collect();
        assert_eq!(phases, vec![Phase::Inhale, Phase::Hold, Phase::Exhale]);
    }

    #[test]
    fn test_drive_aborts_on_sink_error() {
        let clock = ManualClock::new();
        let mut controller = BreathController::new(CycleConfig::default(), Recorder::default());

        let result = drive(&mut controller, &clock, None, |d| clock.advance(d), |sink| {
            (sink.transitions.len() >= 4)
                .then(|| BreatherError::Terminal("closed".to_string()))
        });

        assert!(matches!(result, Err(BreatherError::Terminal(_))));
        assert!(!controller.is_active());
        assert_eq!(controller.sink().transitions.len(), 4);
    }

    #[test]
    fn test_line_sink_pretty() {
        colored::control::set_override(false);
        let clock = ManualClock::new();
        let sink = LineSink::new(Vec::new(), Variant::Classic, OutputFormat::Pretty);
        let mut controller = BreathController::new(CycleConfig::default(), sink);

        drive(&mut controller, &clock, Some(1), |d| clock.advance(d), LineSink::take_error)
            .unwrap();

        let out = String::from_utf8(controller.into_sink().into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Breathe In!"));
        assert!(lines[1].contains("Hold"));
        assert!(lines[2].contains("Breathe Out!"));
    }

    #[test]
    fn test_line_sink_json() {
        let clock = ManualClock::new();
        let sink = LineSink::new(Vec::new(), Variant::Gradient, OutputFormat::Json);
        let mut controller = BreathController::new(CycleConfig::default(), sink);

        drive(&mut controller, &clock, Some(1), |d| clock.advance(d), LineSink::take_error)
            .unwrap();

        let out = String::from_utf8(controller.into_sink().into_inner()).unwrap();
        let events: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1]["phase"], "hold");
        assert_eq!(events[1]["offset_ms"], 3000);
        assert_eq!(events[2]["visual"], "shrink");
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_line_sink_keeps_first_error() {
        let clock = ManualClock::new();
        let sink = LineSink::new(FailingWriter, Variant::Classic, OutputFormat::Json);
        let mut controller = BreathController::new(CycleConfig::default(), sink);

        let result = drive(&mut controller, &clock, None, |d| clock.advance(d), LineSink::take_error);

        assert!(matches!(result, Err(BreatherError::Io(_))));
        assert_eq!(clock.now(), Duration::ZERO);
    }
}
