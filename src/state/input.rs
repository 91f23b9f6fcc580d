//! Input state machine.
//!
//! Interprets one decoded key against the current [`Mode`] and applies the
//! resulting transition to [`ConsoleState`]. Effects that need the outside
//! world (quitting, re-reading terminal size, running a command) are returned
//! as a [`KeyOutcome`] for the controller to carry out.

use super::console_state::{ConsoleState, Mode};
use crate::config::KeyBindings;
use crate::model::{Key, KeyAction};
use tracing::debug;

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;

/// What the controller must do after a key was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// State (possibly) changed; nothing else to do.
    Continue,
    /// Terminate the session.
    Quit,
    /// Terminal dimensions must be re-read and applied.
    Resize,
    /// A command line was submitted (text without the leading `/`).
    Command(String),
}

/// Message of the entry recorded when a command is submitted.
pub fn command_confirmation(command: &str) -> String {
    format!("Command executed: /{command}")
}

/// Details of the entry recorded when a command is submitted.
pub fn command_confirmation_details(command: &str) -> String {
    format!("Command /{command} was executed.")
}

/// Handle one key in the current mode.
///
/// A resize notification is honored in every mode so dimensions never go
/// stale while Details or CommandEntry is open.
pub fn handle_key(state: &mut ConsoleState, key: Key, bindings: &KeyBindings) -> KeyOutcome {
    if key == Key::Resize {
        return KeyOutcome::Resize;
    }

    match state.mode {
        Mode::Browsing => handle_browsing_key(state, key, bindings),
        Mode::Details => handle_details_key(state, key),
        Mode::CommandEntry => handle_command_key(state, key),
    }
}

fn handle_browsing_key(state: &mut ConsoleState, key: Key, bindings: &KeyBindings) -> KeyOutcome {
    let Some(action) = bindings.get(key) else {
        // Unbound printable keys are echoed into the log
        if let Some(c) = key.printable() {
            state.log(format!("Key pressed: {c}"), None);
        }
        return KeyOutcome::Continue;
    };

    // Home/End jump by at least the whole content; move_cursor saturates
    let jump = state.total_lines().max(state.buffer().len()) as isize;

    match action {
        KeyAction::Quit => return KeyOutcome::Quit,
        KeyAction::Clear => state.clear(),
        KeyAction::CursorUp => state.move_cursor(0, -1),
        KeyAction::CursorDown => state.move_cursor(0, 1),
        KeyAction::CursorToTop => state.move_cursor(0, -jump),
        KeyAction::CursorToBottom => state.move_cursor(0, jump),
        KeyAction::OpenDetails => state.mode = Mode::Details,
        KeyAction::StartCommand => state.mode = Mode::CommandEntry,
    }

    KeyOutcome::Continue
}

fn handle_details_key(state: &mut ConsoleState, key: Key) -> KeyOutcome {
    if key == Key::Escape {
        state.mode = Mode::Browsing;
    }
    KeyOutcome::Continue
}

fn handle_command_key(state: &mut ConsoleState, key: Key) -> KeyOutcome {
    match key {
        Key::Escape => {
            state.mode = Mode::Browsing;
            state.command.clear();
        }
        Key::Backspace => {
            state.command.pop();
        }
        Key::Enter => {
            let command = std::mem::take(&mut state.command);
            debug!(command = %command, "Command submitted");
            state.log(
                command_confirmation(&command),
                Some(command_confirmation_details(&command)),
            );
            state.mode = Mode::Browsing;
            return KeyOutcome::Command(command);
        }
        _ => {
            // Leave room for the `/` prompt and the cursor on the status row
            let limit = state.viewport.width().saturating_sub(2);
            if let Some(c) = key.printable() {
                if state.command.len() < limit {
                    state.command.push(c);
                }
            }
        }
    }
    KeyOutcome::Continue
}
