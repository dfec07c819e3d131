use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent};

use crate::app::App;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // Manual refresh
        KeyCode::Char('r') => {
            let _ = app.refresh();
        }

        // Toggle the monitors display
        KeyCode::Char('d') => {
            app.toggle_monitors();
            let _ = app.refresh();
        }

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}
