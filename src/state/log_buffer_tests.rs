//! Tests for the log buffer.

use super::{LogBuffer, DEFAULT_BUFFER_CAPACITY};
use crate::model::LogEntry;

fn entry(message: &str) -> LogEntry {
    LogEntry::new(message, "No details")
}

#[test]
fn new_buffer_is_empty_with_default_capacity() {
    let buffer = LogBuffer::default();

    assert!(buffer.is_empty());
    assert_eq!(buffer.capacity(), DEFAULT_BUFFER_CAPACITY);
    assert_eq!(buffer.total_lines(80), 0);
}

#[test]
fn zero_capacity_is_raised_to_one() {
    let mut buffer = LogBuffer::new(0);
    buffer.push(entry("a"));
    buffer.push(entry("b"));

    assert_eq!(buffer.capacity(), 1);
    assert_eq!(buffer.len(), 1);
    assert_eq!(buffer.get(0).map(LogEntry::message), Some("b"));
}

#[test]
fn push_maintains_chronological_order() {
    let mut buffer = LogBuffer::new(10);

    buffer.push(entry("first"));
    buffer.push(entry("second"));
    buffer.push(entry("third"));

    let messages: Vec<_> = buffer.entries().iter().map(LogEntry::message).collect();
    assert_eq!(messages, vec!["first", "second", "third"]);
}

#[test]
fn push_evicts_oldest_when_at_capacity() {
    let mut buffer = LogBuffer::new(3);

    assert!(buffer.push(entry("first")).is_none());
    buffer.push(entry("second"));
    buffer.push(entry("third"));
    let evicted = buffer.push(entry("fourth"));

    assert_eq!(evicted.as_ref().map(LogEntry::message), Some("first"));
    assert_eq!(buffer.len(), 3);
    assert_eq!(buffer.get(0).map(LogEntry::message), Some("second"));
}

#[test]
fn overflowing_default_capacity_drops_first_entry() {
    let mut buffer = LogBuffer::new(1000);
    for i in 0..1001 {
        buffer.push(entry(&format!("entry {i}")));
    }

    assert_eq!(buffer.len(), 1000);
    assert_eq!(buffer.get(0).map(LogEntry::message), Some("entry 1"));
}

#[test]
fn total_lines_sums_wrapped_counts() {
    let mut buffer = LogBuffer::new(10);
    buffer.push(entry("abcdef")); // 2 lines at width 4
    buffer.push(entry("a\nb\nc")); // 3 lines
    buffer.push(entry("")); // 1 line

    assert_eq!(buffer.total_lines(4), 6);
    assert_eq!(buffer.total_lines(80), 5);
}

#[test]
fn entry_index_at_line_walks_cumulative_counts() {
    let mut buffer = LogBuffer::new(10);
    buffer.push(entry("one"));
    buffer.push(entry("two\nlines"));
    buffer.push(entry("three"));

    assert_eq!(buffer.entry_index_at_line(0, 80), Some(0));
    assert_eq!(buffer.entry_index_at_line(1, 80), Some(1));
    assert_eq!(buffer.entry_index_at_line(2, 80), Some(1));
    assert_eq!(buffer.entry_index_at_line(3, 80), Some(2));
    assert_eq!(buffer.entry_index_at_line(4, 80), None);
}

#[test]
fn entry_index_at_line_on_empty_buffer_is_none() {
    let buffer = LogBuffer::new(10);
    assert_eq!(buffer.entry_index_at_line(0, 80), None);
}

#[test]
fn lines_in_range_spans_entry_boundaries() {
    let mut buffer = LogBuffer::new(10);
    buffer.push(entry("a\nb"));
    buffer.push(entry("c\nd\ne"));
    buffer.push(entry("f"));

    assert_eq!(buffer.lines_in_range(1, 3, 80), vec!["b", "c", "d"]);
    assert_eq!(buffer.lines_in_range(4, 10, 80), vec!["e", "f"]);
    assert!(buffer.lines_in_range(6, 3, 80).is_empty());
}

#[test]
fn lines_in_range_uses_current_width() {
    let mut buffer = LogBuffer::new(10);
    buffer.push(entry("abcdef"));

    assert_eq!(buffer.lines_in_range(0, 5, 3), vec!["abc", "def"]);
    assert_eq!(buffer.lines_in_range(1, 5, 2), vec!["cd", "ef"]);
}

#[test]
fn clear_removes_everything() {
    let mut buffer = LogBuffer::new(10);
    buffer.push(entry("x"));
    buffer.clear();

    assert!(buffer.is_empty());
    assert_eq!(buffer.total_lines(80), 0);
}
