//! Scroll and cursor arithmetic over the flattened wrapped lines.
//!
//! Every navigation command routes through [`Viewport`], so the bounds below
//! are enforced in exactly one place. After any mutation:
//!
//! - `scroll <= max(0, total_lines - height)`
//! - `cursor_y <= min(height - 1, total_lines - scroll - 1)` (floored at 0)
//! - `cursor_x <= width - 1`

use super::log_buffer::LogBuffer;

#[cfg(test)]
#[path = "viewport_tests.rs"]
mod tests;

/// Visible window over the buffer's wrapped lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    /// Rows available for log content (status row excluded)
    height: usize,
    /// Columns available for content; also the wrap width
    width: usize,
    /// Index of the first flattened line shown
    scroll: usize,
    cursor_x: usize,
    /// Row relative to the top of the viewport
    cursor_y: usize,
}

impl Viewport {
    /// Create a viewport at the top of an empty buffer.
    ///
    /// Zero dimensions are raised to one so the bounds arithmetic stays total.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height: height.max(1),
            width: width.max(1),
            scroll: 0,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    /// Content rows (status row excluded), at least 1.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Content columns, at least 1.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Index of the first visible wrapped line.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Cursor column.
    pub fn cursor_x(&self) -> usize {
        self.cursor_x
    }

    /// Cursor row, relative to the top of the window.
    pub fn cursor_y(&self) -> usize {
        self.cursor_y
    }

    /// Flattened line index under the cursor.
    pub fn current_line(&self) -> usize {
        self.cursor_y + self.scroll
    }

    /// Total wrapped lines in `buffer` at the current width.
    pub fn total_lines(&self, buffer: &LogBuffer) -> usize {
        buffer.total_lines(self.width)
    }

    /// Entry owning the line under the cursor, if any.
    pub fn current_entry_index(&self, buffer: &LogBuffer) -> Option<usize> {
        buffer.entry_index_at_line(self.current_line(), self.width)
    }

    /// Move the cursor by `(dx, dy)`.
    ///
    /// Moving above the top row scrolls up by `|dy|` (floored at 0) and
    /// moving past the bottom row scrolls down by `dy` (capped at the last
    /// full window); in both cases the cursor ends pinned to the edge row.
    /// Within the window the cursor moves freely but never below content.
    pub fn move_cursor(&mut self, buffer: &LogBuffer, dx: isize, dy: isize) {
        let total = self.total_lines(buffer);
        let target_y = self.cursor_y as isize + dy;

        if target_y < 0 {
            self.scroll = self.scroll.saturating_sub(dy.unsigned_abs());
        } else if target_y >= self.height as isize {
            self.scroll = self
                .scroll
                .saturating_add(dy.unsigned_abs())
                .min(self.max_scroll(total));
        }

        self.cursor_x = clamp_signed(self.cursor_x as isize + dx, self.width - 1);
        self.cursor_y = clamp_signed(target_y, self.max_cursor_y(total));
    }

    /// Apply new terminal dimensions.
    ///
    /// Re-pins the window to the bottom-most valid position and clamps the
    /// cursor into the new bounds.
    pub fn on_resize(&mut self, buffer: &LogBuffer, height: usize, width: usize) {
        self.height = height.max(1);
        self.width = width.max(1);

        let total = self.total_lines(buffer);
        self.scroll = self.max_scroll(total);
        self.clamp(total);
    }

    /// Compensate for `evicted_lines` lines disappearing from the front of the buffer.
    pub fn on_evict(&mut self, buffer: &LogBuffer, evicted_lines: usize) {
        self.scroll = self.scroll.saturating_sub(evicted_lines);
        self.clamp(self.total_lines(buffer));
    }

    /// Whether the cursor sits on the last line of content.
    pub fn is_on_last_line(&self, buffer: &LogBuffer) -> bool {
        self.current_line() + 1 == self.total_lines(buffer)
    }

    /// Follow newly appended content.
    ///
    /// `was_on_last_line` is [`is_on_last_line`](Self::is_on_last_line) as
    /// observed before the append. If it held and the window has room below
    /// the cursor, the cursor steps down onto the new content. Once content
    /// overflows the window, scroll advances by the appended line count.
    ///
    /// The cursor step is one row per append, whatever the entry's line
    /// count. After a multi-line entry the cursor rests on its first line,
    /// so later appends no longer move it; scroll still keeps the window
    /// pinned to the newest content.
    pub fn on_append(&mut self, buffer: &LogBuffer, was_on_last_line: bool, appended_lines: usize) {
        if was_on_last_line && self.cursor_y + 1 < self.height {
            self.move_cursor(buffer, 0, 1);
        }

        let total = self.total_lines(buffer);
        if total > self.height {
            self.scroll = self.scroll.saturating_add(appended_lines);
        }
        self.clamp(total);
    }

    /// Return to the origin. Used when the buffer is cleared.
    pub fn reset(&mut self) {
        self.scroll = 0;
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    fn max_scroll(&self, total: usize) -> usize {
        total.saturating_sub(self.height)
    }

    fn max_cursor_y(&self, total: usize) -> usize {
        total
            .saturating_sub(self.scroll + 1)
            .min(self.height - 1)
    }

    fn clamp(&mut self, total: usize) {
        self.scroll = self.scroll.min(self.max_scroll(total));
        self.cursor_x = self.cursor_x.min(self.width - 1);
        self.cursor_y = self.cursor_y.min(self.max_cursor_y(total));
    }
}

fn clamp_signed(value: isize, max: usize) -> usize {
    if value <= 0 {
        0
    } else {
        (value as usize).min(max)
    }
}
