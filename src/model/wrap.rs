//! Hard wrapping of text into fixed-width display lines.
//!
//! Width is measured in characters (one column per char). Wide glyphs are
//! not accounted for.

/// Wrap `text` into lines of at most `width` characters.
///
/// The text is first split on `\n`; each segment is then cut into successive
/// `width`-sized chunks, with the remainder emitted as the final line of that
/// segment. Empty segments are kept, so blank lines survive wrapping. A
/// `width` of zero is treated as one.
///
/// # Examples
///
/// ```
/// use logcon::model::wrap;
///
/// assert_eq!(wrap("abcdefg", 3), vec!["abc", "def", "g"]);
/// assert_eq!(wrap("ab\n\ncd", 10), vec!["ab", "", "cd"]);
/// ```
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for segment in text.split('\n') {
        let mut rest = segment;
        while let Some((split_at, _)) = rest.char_indices().nth(width) {
            let (head, tail) = rest.split_at(split_at);
            lines.push(head.to_string());
            rest = tail;
        }
        lines.push(rest.to_string());
    }

    lines
}

/// Number of lines `wrap(text, width)` would produce, without allocating.
pub fn wrapped_line_count(text: &str, width: usize) -> usize {
    let width = width.max(1);
    text.split('\n')
        .map(|segment| {
            let chars = segment.chars().count();
            // An exact multiple still leaves an empty remainder line
            chars / width + usize::from(chars % width != 0 || chars == 0)
        })
        .sum()
}
