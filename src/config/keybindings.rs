//! Browsing-mode key bindings.

use crate::model::{Key, KeyAction};
use std::collections::HashMap;

/// Maps decoded keys to browsing actions.
///
/// Only consulted in Browsing mode; Details and CommandEntry interpret keys
/// directly. `Key::Resize` is handled before any lookup, so binding it has
/// no effect.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<Key, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key.
    pub fn get(&self, key: Key) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    /// Bind `key` to `action`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: Key, action: KeyAction) {
        self.bindings.insert(key, action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        bindings.insert(Key::Escape, KeyAction::Quit);
        bindings.insert(Key::Clear, KeyAction::Clear);

        // Arrow keys and vim aliases
        bindings.insert(Key::Up, KeyAction::CursorUp);
        bindings.insert(Key::Char('k'), KeyAction::CursorUp);
        bindings.insert(Key::Down, KeyAction::CursorDown);
        bindings.insert(Key::Char('j'), KeyAction::CursorDown);

        bindings.insert(Key::Home, KeyAction::CursorToTop);
        bindings.insert(Key::End, KeyAction::CursorToBottom);

        bindings.insert(Key::Enter, KeyAction::OpenDetails);
        bindings.insert(Key::Char('/'), KeyAction::StartCommand);

        Self { bindings }
    }
}
