//! Keystroke input handling using crossterm
//!
//! Features:
//! - Non-blocking event polling
//! - Unicode character support (accented letters)
//! - Mapping of raw events to lesson actions, depending on the phase
//! - Terminal focus reporting (lost focus pauses input)

use crate::session::{Key, Phase};
use crossterm::event::{
    self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use std::io::{stdout, Result as IoResult};
use std::time::Duration;

/// What the front end should do with an input event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Type(Key),
    Start,
    Repeat,
    Spell,
    ToggleVoice,
    ToggleNarration,
    Focus,
    Blur,
    Quit,
}

/// Handles user input from terminal
pub struct InputHandler {
    /// Timeout for poll operations
    poll_timeout: Duration,
}

impl InputHandler {
    /// Create new input handler with default timeout (50ms for responsive input)
    pub fn new() -> Self {
        InputHandler {
            poll_timeout: Duration::from_millis(50),
        }
    }

    /// Raw mode plus focus change reporting
    pub fn enable_raw_mode() -> IoResult<()> {
        crossterm::terminal::enable_raw_mode()?;
        execute!(stdout(), EnableFocusChange)
    }

    /// Disable raw mode and restore terminal
    pub fn disable_raw_mode() -> IoResult<()> {
        execute!(stdout(), DisableFocusChange)?;
        crossterm::terminal::disable_raw_mode()
    }

    /// Poll for an event with timeout; None on timeout
    pub fn read_event(&self) -> IoResult<Option<Event>> {
        if event::poll(self.poll_timeout)? {
            event::read().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Translate an event given the session phase and focus
    pub fn action(event: &Event, phase: Phase, focused: bool) -> Option<Action> {
        match event {
            Event::FocusGained => Some(Action::Focus),
            Event::FocusLost => Some(Action::Blur),
            Event::Key(key) if key.kind == KeyEventKind::Press => Self::key_action(key, phase, focused),
            _ => None,
        }
    }

    fn key_action(key: &KeyEvent, phase: Phase, focused: bool) -> Option<Action> {
        // AltGr arrives as Ctrl+Alt on some platforms
        let altgr = key.modifiers.contains(KeyModifiers::CONTROL | KeyModifiers::ALT);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL) && !altgr;
        let alt = key.modifiers.contains(KeyModifiers::ALT) && !altgr;
        let typing = phase == Phase::InProgress && focused;

        match key.code {
            KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
                'c' | 'q' => Some(Action::Quit),
                'v' => Some(Action::ToggleVoice),
                'r' if typing => Some(Action::Repeat),
                's' if typing => Some(Action::Spell),
                _ => None,
            },
            KeyCode::Esc if typing => Some(Action::Blur),
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::Enter => match phase {
                Phase::NotStarted => Some(Action::Start),
                Phase::InProgress if !focused => Some(Action::Focus),
                _ => None,
            },
            KeyCode::Char(c) if !alt => match phase {
                Phase::NotStarted => match c.to_ascii_lowercase() {
                    'v' => Some(Action::ToggleVoice),
                    'n' => Some(Action::ToggleNarration),
                    _ => None,
                },
                Phase::InProgress if focused => Key::from_char(c).map(Action::Type),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
