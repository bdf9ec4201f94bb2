//! Immutable document snapshots.
//!
//! A [`Document`] is the only input every analysis pass shares. It is addressed by absolute char
//! offset and by **1-indexed** line number. Lines follow `str::lines` semantics: a final line
//! break does not open an extra empty line.

use crate::line_index::{LineIndex, strip_line_break};

/// Absolute character offset (Unicode scalar values from the start of the document).
pub type Offset = usize;

/// 1-indexed line number.
pub type LineNumber = usize;

/// An immutable text snapshot for one analysis pass.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    revision: u64,
    line_index: LineIndex,
    line_count: usize,
}

impl Document {
    /// Create a snapshot with revision `0`.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_revision(text, 0)
    }

    /// Create a snapshot tagged with a host-supplied revision counter.
    pub fn with_revision(text: impl Into<String>, revision: u64) -> Self {
        let text = text.into();
        let line_index = LineIndex::from_text(&text);
        let line_count = if line_index.ends_with_empty_line() {
            line_index.line_count() - 1
        } else {
            line_index.line_count()
        };

        Self {
            text,
            revision,
            line_index,
            line_count,
        }
    }

    /// Full document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Host revision counter this snapshot was taken at.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The underlying (0-based) line index.
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Total character count.
    pub fn char_count(&self) -> usize {
        self.line_index.char_count()
    }

    /// Number of lines (`str::lines` semantics).
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Whether the document has no text at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Clamp an offset into `0..=char_count`.
    pub fn clamp_offset(&self, offset: Offset) -> Offset {
        offset.min(self.char_count())
    }

    /// Look up a line by its 1-indexed number.
    pub fn line(&self, number: LineNumber) -> Option<DocumentLine<'_>> {
        if number == 0 || number > self.line_count {
            return None;
        }

        let idx = number - 1;
        let start_byte = self.line_index.line_to_byte(idx);
        let next_byte = self.line_index.line_to_byte(idx + 1);
        let text = strip_line_break(&self.text[start_byte..next_byte]);

        let start = self.line_index.line_to_char(idx);
        Some(DocumentLine {
            number,
            start,
            end: start + char_len(text),
            next_start: self.line_index.line_to_char(idx + 1),
            text,
        })
    }

    /// Iterate over every line in order.
    pub fn lines(&self) -> impl Iterator<Item = DocumentLine<'_>> + '_ {
        (1..=self.line_count).filter_map(|number| self.line(number))
    }

    /// The 1-indexed line containing `offset` and that line's text up to `offset`.
    ///
    /// `offset` is clamped to the document. An offset after a final line break lands on the
    /// empty line that follows it, which is never returned by [`Document::line`].
    pub fn line_prefix(&self, offset: Offset) -> (LineNumber, &str) {
        let offset = self.clamp_offset(offset);
        let (line, _) = self.line_index.char_offset_to_position(offset);
        let start_byte = self.line_index.line_to_byte(line);
        let cursor_byte = self.line_index.char_to_byte(offset);
        (line + 1, &self.text[start_byte..cursor_byte])
    }
}

/// A borrowed view of one document line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentLine<'a> {
    /// 1-indexed line number.
    pub number: LineNumber,
    /// Offset of the first char of the line.
    pub start: Offset,
    /// Offset just past the last char of the line text (line break excluded).
    pub end: Offset,
    /// Offset of the first char of the next line (equals `end` on the last line).
    pub next_start: Offset,
    /// Line text without its line break.
    pub text: &'a str,
}

impl DocumentLine<'_> {
    /// Whether the line holds only whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

pub(crate) fn char_len(text: &str) -> usize {
    if text.is_ascii() {
        text.len()
    } else {
        text.chars().count()
    }
}
