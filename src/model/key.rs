//! Key codes understood by the console.
//!
//! Terminal events are decoded into [`Key`] once, at the driver boundary, so
//! the input state machine never sees crossterm types.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A decoded key press (or the resize notification).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Terminal was resized; dimensions must be re-read from the driver.
    Resize,
    /// Backspace (erases in command entry).
    Backspace,
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// The clear-screen control key (Ctrl+L).
    Clear,
    /// A literal character, including space and `/`.
    Char(char),
}

impl Key {
    /// Decode a terminal event.
    ///
    /// Returns `None` for events the console does not react to: key releases,
    /// mouse and focus events, and unbound control/alt chords.
    pub fn from_event(event: &Event) -> Option<Self> {
        match event {
            Event::Key(key) => Self::from_key_event(key),
            Event::Resize(_, _) => Some(Key::Resize),
            _ => None,
        }
    }

    fn from_key_event(key: &KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        let chord = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Home => Some(Key::Home),
            KeyCode::End => Some(Key::End),
            KeyCode::Backspace => Some(Key::Backspace),
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::Esc => Some(Key::Escape),
            KeyCode::Char('l') | KeyCode::Char('L')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                Some(Key::Clear)
            }
            KeyCode::Char(c) if !chord => Some(Key::Char(c)),
            _ => None,
        }
    }

    /// The character this key types, if it is printable ASCII (32..=126).
    pub fn printable(self) -> Option<char> {
        match self {
            Key::Char(c) if (' '..='~').contains(&c) => Some(c),
            _ => None,
        }
    }
}
