//! Keyboard input.
//!
//! Polls crossterm and translates key presses into [`InputEvent`]s. Polling
//! errors are treated as "no input".

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// `q`: quit (blocked while an alert is open).
    Quit,
    /// Ctrl+C: quit unconditionally.
    Interrupt,
    Previous,
    Next,
    /// Enter or space: act on the selected card / acknowledge an alert.
    Activate,
    /// `r`: refresh the queue now.
    Retry,
    /// Esc: dismiss an alert.
    Dismiss,
    /// Terminal was resized; only a redraw is needed.
    Resize,
    None,
}

/// Wait up to `timeout` for one input event.
pub fn poll_event(timeout: Duration) -> InputEvent {
    match event::poll(timeout) {
        Ok(true) => {}
        _ => return InputEvent::None,
    }

    match event::read() {
        Ok(Event::Key(key)) => translate_key(key),
        Ok(Event::Resize(_, _)) => InputEvent::Resize,
        _ => InputEvent::None,
    }
}

pub fn translate_key(key: KeyEvent) -> InputEvent {
    if key.kind != KeyEventKind::Press {
        return InputEvent::None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => InputEvent::Interrupt,
            _ => InputEvent::None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => InputEvent::Quit,
        KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
            InputEvent::Previous
        }
        KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
            InputEvent::Next
        }
        KeyCode::Enter | KeyCode::Char(' ') => InputEvent::Activate,
        KeyCode::Char('r') | KeyCode::Char('R') => InputEvent::Retry,
        KeyCode::Esc => InputEvent::Dismiss,
        _ => InputEvent::None,
    }
}
