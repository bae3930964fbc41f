//! Keyboard input for the dashboard

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::Duration;

/// Polls the terminal for key presses
pub struct EventHandler {
    /// How long to wait for input before letting the loop redraw
    timeout: Duration,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_millis(250),
        }
    }

    /// Next key press, if one arrived within the timeout
    ///
    /// Key releases and repeats are dropped so each press acts once.
    pub fn next(&self) -> Result<Option<KeyEvent>> {
        if event::poll(self.timeout)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press {
                    return Ok(Some(key_event));
                }
            }
        }
        Ok(None)
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
