//! Terminal User Interface (TUI) for breather.
//!
//! Animates a breathing circle that grows while inhaling and shrinks while
//! exhaling. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{circle_scale, App};

use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;

use crate::breath::{Clock, CycleConfig, PhaseLabels, SystemClock};
use crate::core::Variant;
use crate::error::BreatherError;

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(
    cycle: CycleConfig,
    labels: PhaseLabels,
    variant: Variant,
    tick_rate: Duration,
) -> Result<(), BreatherError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| BreatherError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| BreatherError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| BreatherError::Terminal(format!("Failed to create terminal: {e}")))?;

    info!(total = ?cycle.total(), %variant, "starting tui");

    // Create app state and run main loop
    let mut app = App::new(cycle, labels, variant, SystemClock::new());
    let result = run_app(&mut terminal, &mut app, tick_rate);
    app.stop();

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    info!("tui closed");
    result
}

/// Run the main application loop.
fn run_app<B: Backend, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App<C>,
    tick_rate: Duration,
) -> Result<(), BreatherError> {
    loop {
        app.tick();

        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| BreatherError::Terminal(format!("Failed to draw: {e}")))?;

        // Handle events
        if let Some(action) = event::handle_events(tick_rate)? {
            match action {
                event::Action::Quit => break,
                event::Action::ToggleVariant => app.toggle_variant(),
            }
        }
    }

    Ok(())
}
