//! Append-only log buffer with oldest-first eviction.

use crate::model::LogEntry;
use std::collections::VecDeque;

#[cfg(test)]
#[path = "log_buffer_tests.rs"]
mod tests;

/// Default number of entries retained.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1000;

/// Chronologically ordered entries, bounded by `capacity`.
///
/// Line counts are never cached: entries are immutable but membership and
/// display width both change, so every query walks the buffer. At the
/// default capacity this is cheap enough to do on every frame.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    /// Oldest at front, newest at back
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl LogBuffer {
    /// Create an empty buffer. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry, returning the evicted oldest entry if the buffer was full.
    pub fn push(&mut self, entry: LogEntry) -> Option<LogEntry> {
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        evicted
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entries are retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries kept before the oldest is evicted.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entry at `index`, where 0 is the oldest retained entry.
    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &VecDeque<LogEntry> {
        &self.entries
    }

    /// Sum of wrapped line counts across all entries at `width`.
    pub fn total_lines(&self, width: usize) -> usize {
        self.entries.iter().map(|e| e.line_count(width)).sum()
    }

    /// Index of the entry owning flattened line `line` at `width`.
    ///
    /// Walks cumulative line counts and returns the first entry whose running
    /// total exceeds `line`, or `None` past the end.
    pub fn entry_index_at_line(&self, line: usize, width: usize) -> Option<usize> {
        let mut cumulative = 0;
        for (index, entry) in self.entries.iter().enumerate() {
            cumulative += entry.line_count(width);
            if cumulative > line {
                return Some(index);
            }
        }
        None
    }

    /// Up to `count` flattened display lines starting at line `start`.
    pub fn lines_in_range(&self, start: usize, count: usize, width: usize) -> Vec<String> {
        let mut out = Vec::with_capacity(count);
        let mut skipped = 0;

        for entry in &self.entries {
            if out.len() >= count {
                break;
            }
            let n = entry.line_count(width);
            if skipped + n <= start {
                skipped += n;
                continue;
            }
            let offset = start.saturating_sub(skipped);
            let remaining = count - out.len();
            skipped += n;
            out.extend(entry.lines(width).into_iter().skip(offset).take(remaining));
        }

        out
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_CAPACITY)
    }
}
