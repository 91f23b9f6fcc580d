//! Browsing-mode actions independent of key bindings.

/// Actions available while browsing the log.
///
/// These represent user intent, not specific keys. The mapping from
/// [`Key`](crate::model::Key) to `KeyAction` is handled by
/// [`KeyBindings`](crate::config::KeyBindings). Keys with no binding fall
/// through to the printable-key echo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// End the session. Default: Esc
    Quit,
    /// Drop every entry and reset scroll and cursor. Default: Ctrl+L
    Clear,
    /// Move the cursor one line up. Default: ↑/k
    CursorUp,
    /// Move the cursor one line down. Default: ↓/j
    CursorDown,
    /// Jump to the first line. Default: Home
    CursorToTop,
    /// Jump to the last line. Default: End
    CursorToBottom,
    /// Show details of the entry under the cursor. Default: Enter
    OpenDetails,
    /// Start typing a command. Default: /
    StartCommand,
}
