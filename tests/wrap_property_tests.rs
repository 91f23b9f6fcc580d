//! Property-based tests for text wrapping.
//!
//! Invariants:
//! 1. Every produced line fits the width
//! 2. Joining the lines reproduces the text minus its newlines
//! 3. `wrapped_line_count` agrees with `wrap`
//! 4. Widths below 1 behave like width 1

use logcon::model::{wrap, wrapped_line_count, LogEntry};
use proptest::prelude::*;

/// Printable ASCII with occasional newlines.
fn arb_text() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ -~\n]{0,200}").unwrap()
}

proptest! {
    #[test]
    fn lines_never_exceed_width(text in arb_text(), width in 1usize..120) {
        for line in wrap(&text, width) {
            prop_assert!(line.chars().count() <= width, "line {:?} wider than {}", line, width);
        }
    }

    #[test]
    fn concatenation_preserves_content(text in arb_text(), width in 1usize..120) {
        let joined: String = wrap(&text, width).concat();
        let expected: String = text.chars().filter(|&c| c != '\n').collect();
        prop_assert_eq!(joined, expected);
    }

    #[test]
    fn line_count_matches_wrap(text in arb_text(), width in 1usize..120) {
        prop_assert_eq!(wrapped_line_count(&text, width), wrap(&text, width).len());
    }

    #[test]
    fn each_newline_starts_a_line(text in arb_text(), width in 1usize..120) {
        let newlines = text.matches('\n').count();
        prop_assert!(wrap(&text, width).len() > newlines);
    }

    #[test]
    fn zero_width_behaves_like_one(text in arb_text()) {
        prop_assert_eq!(wrap(&text, 0), wrap(&text, 1));
    }

    #[test]
    fn multibyte_text_is_never_split_inside_a_char(text in "[a-zé漢🙂]{0,60}", width in 1usize..20) {
        let joined: String = wrap(&text, width).concat();
        prop_assert_eq!(joined, text);
    }

    #[test]
    fn entry_line_count_matches_lines(message in arb_text(), width in 1usize..120) {
        let entry = LogEntry::new(message, "details");
        prop_assert_eq!(entry.line_count(width), entry.lines(width).len());
    }
}
