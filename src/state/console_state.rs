//! Console state: buffer, viewport, mode and the command line.
//!
//! Pure data plus transitions. Nothing here touches the terminal.

use super::log_buffer::{LogBuffer, DEFAULT_BUFFER_CAPACITY};
use super::viewport::Viewport;
use crate::model::{LogEntry, DEFAULT_DETAILS_PLACEHOLDER};
use tracing::debug;

/// Input mode. Governs key interpretation and rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Navigating the log list (initial mode).
    #[default]
    Browsing,
    /// Showing the detail text of the entry under the cursor.
    Details,
    /// Typing a `/` command on the status row.
    CommandEntry,
}

/// Root console state.
#[derive(Debug, Clone)]
pub struct ConsoleState {
    buffer: LogBuffer,
    /// Scroll offset, cursor and dimensions.
    pub viewport: Viewport,
    /// Current input mode.
    pub mode: Mode,
    /// Text typed so far in CommandEntry mode (without the leading `/`)
    pub command: String,
    details_placeholder: String,
}

impl ConsoleState {
    /// Create an empty console for a content area of `height` x `width`.
    pub fn new(height: usize, width: usize, capacity: usize, details_placeholder: &str) -> Self {
        Self {
            buffer: LogBuffer::new(capacity),
            viewport: Viewport::new(height, width),
            mode: Mode::default(),
            command: String::new(),
            details_placeholder: details_placeholder.to_string(),
        }
    }

    /// The retained entries, oldest first.
    pub fn buffer(&self) -> &LogBuffer {
        &self.buffer
    }

    /// Total wrapped lines at the current width.
    pub fn total_lines(&self) -> usize {
        self.viewport.total_lines(&self.buffer)
    }

    /// Entry under the cursor, if the buffer has one there.
    pub fn current_entry(&self) -> Option<&LogEntry> {
        self.viewport
            .current_entry_index(&self.buffer)
            .and_then(|index| self.buffer.get(index))
    }

    /// Append a message, evicting the oldest entry when the buffer is full.
    ///
    /// Missing `details` are replaced by the configured placeholder. The
    /// viewport compensates for eviction and follows the new content when the
    /// cursor was on the last line.
    pub fn log(&mut self, message: impl Into<String>, details: Option<String>) {
        let entry =
            LogEntry::with_optional_details(message, details, &self.details_placeholder);
        self.push(entry);
    }

    /// Append an already-built entry.
    pub fn push(&mut self, entry: LogEntry) {
        let width = self.viewport.width();
        let was_on_last_line = self.viewport.is_on_last_line(&self.buffer);
        let appended_lines = entry.line_count(width);

        if let Some(evicted) = self.buffer.push(entry) {
            let evicted_lines = evicted.line_count(width);
            debug!(evicted_lines, "Buffer full, evicted oldest entry");
            self.viewport.on_evict(&self.buffer, evicted_lines);
        }

        self.viewport
            .on_append(&self.buffer, was_on_last_line, appended_lines);
    }

    /// Move the cursor, scrolling at the window edges.
    pub fn move_cursor(&mut self, dx: isize, dy: isize) {
        self.viewport.move_cursor(&self.buffer, dx, dy);
    }

    /// Drop every entry and return the viewport to the origin.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.viewport.reset();
    }

    /// Apply new content dimensions (status row already excluded).
    pub fn resize(&mut self, height: usize, width: usize) {
        self.viewport.on_resize(&self.buffer, height, width);
    }
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self::new(24, 80, DEFAULT_BUFFER_CAPACITY, DEFAULT_DETAILS_PLACEHOLDER)
    }
}
