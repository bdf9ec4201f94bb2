//! Logical line index.
//!
//! Wraps a [`ropey::Rope`] so offset/line conversions stay `O(log N)` on large documents. All
//! offsets are in Unicode scalar values (`char`) and all line numbers are **0-based** here;
//! [`Document`](crate::Document) is responsible for the 1-based numbering the public API uses.
//!
//! `ropey` is built without `unicode_lines`, so only `\n` breaks a line. A `\r` before it is
//! stripped from the line text, like `str::lines` does.

use ropey::Rope;

/// Rope-backed line index over an immutable text snapshot.
#[derive(Debug, Clone)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Build a line index from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Total rope line count.
    ///
    /// A trailing line break opens one more (empty) line, so `"a\n"` has two lines here.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total character count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Character offset of the first char of `line` (clamped to the end of the text).
    pub fn line_to_char(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(line)
    }

    /// Byte offset of the first byte of `line` (clamped to the end of the text).
    pub fn line_to_byte(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_bytes();
        }
        self.rope.line_to_byte(line)
    }

    /// Convert a character offset to a byte offset (clamped).
    pub fn char_to_byte(&self, char_offset: usize) -> usize {
        let char_offset = char_offset.min(self.rope.len_chars());
        self.rope.char_to_byte(char_offset)
    }

    /// Get line number and offset within line from character offset.
    pub fn char_offset_to_position(&self, char_offset: usize) -> (usize, usize) {
        let char_offset = char_offset.min(self.rope.len_chars());

        let line_idx = self.rope.char_to_line(char_offset);
        let line_start_char = self.rope.line_to_char(line_idx);

        (line_idx, char_offset - line_start_char)
    }

    /// Whether the text ends with a line break (or is empty), i.e. the last rope line is empty.
    pub fn ends_with_empty_line(&self) -> bool {
        let last = self.rope.len_lines().saturating_sub(1);
        self.rope.line_to_char(last) == self.rope.len_chars()
    }
}

/// Strip a single trailing `\n` or `\r\n`. A lone `\r` is line content.
pub(crate) fn strip_line_break(text: &str) -> &str {
    text.strip_suffix('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line_index() {
        let index = LineIndex::from_text("");
        assert_eq!(index.line_count(), 1); // Rope empty document has 1 line
        assert_eq!(index.char_count(), 0);
        assert!(index.ends_with_empty_line());
    }

    #[test]
    fn test_from_text() {
        let text = "Line 1\nLine 2\nLine 3";
        let index = LineIndex::from_text(text);

        assert_eq!(index.line_count(), 3);
        assert_eq!(index.char_count(), text.chars().count());
        assert!(!index.ends_with_empty_line());
        assert_eq!(index.line_to_char(1), 7);
        assert_eq!(index.line_to_char(9), text.len());
    }

    #[test]
    fn test_trailing_newline_opens_empty_line() {
        let index = LineIndex::from_text("---\n");
        assert_eq!(index.line_count(), 2);
        assert!(index.ends_with_empty_line());
        assert_eq!(index.line_to_char(1), 4);
    }

    #[test]
    fn test_char_offset_to_position() {
        let index = LineIndex::from_text("ABC\nDEF\nGHI");

        assert_eq!(index.char_offset_to_position(0), (0, 0));
        assert_eq!(index.char_offset_to_position(2), (0, 2));
        assert_eq!(index.char_offset_to_position(4), (1, 0));
        assert_eq!(index.char_offset_to_position(8), (2, 0));
        // Clamped past the end.
        assert_eq!(index.char_offset_to_position(100), (2, 3));
    }

    #[test]
    fn test_only_line_feed_breaks_lines() {
        let index = LineIndex::from_text("a\u{000C}b\rc\u{2028}d\u{0085}e\r\nf");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.char_offset_to_position(10), (0, 10));
        assert_eq!(index.line_to_char(1), 11);
    }

    #[test]
    fn test_utf8_cjk() {
        let text = "你好\n世界";
        let index = LineIndex::from_text(text);

        assert_eq!(index.line_count(), 2);
        assert_eq!(index.char_count(), 5);
        assert_eq!(index.char_offset_to_position(3), (1, 0));
        assert_eq!(index.char_to_byte(3), "你好\n".len());
        assert_eq!(index.line_to_byte(1), "你好\n".len());
    }

    #[test]
    fn test_strip_line_break() {
        assert_eq!(strip_line_break("abc\r\n"), "abc");
        assert_eq!(strip_line_break("abc\n"), "abc");
        assert_eq!(strip_line_break("abc"), "abc");
        assert_eq!(strip_line_break("\n"), "");
        assert_eq!(strip_line_break("abc\r"), "abc\r");
        assert_eq!(strip_line_break("abc\u{2028}"), "abc\u{2028}");
        assert_eq!(strip_line_break("abc\r\r\n"), "abc\r");
    }
}
