//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::BreatherError;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Switch the widget variant.
    ToggleVariant,
}

/// Wait up to `timeout` for a terminal event.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(timeout: Duration) -> Result<Option<Action>, BreatherError> {
    if event::poll(timeout)
        .map_err(|e| BreatherError::Terminal(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) = event::read()
            .map_err(|e| BreatherError::Terminal(format!("Event read failed: {e}")))?
        {
            return Ok(map_key(key));
        }
    }
    Ok(None)
}

/// Map a key press to an action.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('v') => Some(Action::ToggleVariant),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_key() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(map_key(press(KeyCode::Char('v'))), Some(Action::ToggleVariant));
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }
}
