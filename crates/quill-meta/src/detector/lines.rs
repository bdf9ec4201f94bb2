//! Line tokenizer: every document line is classified exactly once.

use super::{Keyword, KeywordKind, ValueType, YamlEntry};
use crate::document::{Document, DocumentLine, char_len};
use regex::Regex;
use std::sync::LazyLock;

static DELIMITER: LazyLock<Regex> = LazyLock::new(|| compile(r"^-{3,}\s*$"));

// Key: value. Group 1 is the key, group 2 the raw value.
static ENTRY: LazyLock<Regex> = LazyLock::new(|| compile(r"^\s*([A-Za-z0-9_-]+):\s*(.*)$"));

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^[-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?$"));

pub(crate) fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(err) => panic!("built-in pattern {pattern:?} failed to compile: {err}"),
    }
}

/// Shape of a single line, decided without looking at its neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineShape {
    Blank,
    Delimiter,
    Keyword(Keyword),
    Entry(YamlEntry),
    Text,
}

/// A document line plus its shape.
#[derive(Debug, Clone)]
pub(crate) struct ScannedLine<'a> {
    pub line: DocumentLine<'a>,
    pub shape: LineShape,
}

impl ScannedLine<'_> {
    pub fn is_blank(&self) -> bool {
        self.shape == LineShape::Blank
    }

    pub fn is_delimiter(&self) -> bool {
        self.shape == LineShape::Delimiter
    }

    /// Keyword or key/value line: the content that turns a delimiter pair into a block.
    pub fn is_qualifying(&self) -> bool {
        matches!(self.shape, LineShape::Keyword(_) | LineShape::Entry(_))
    }
}

/// Tokenize the whole document into classified lines.
pub(crate) fn tokenize(document: &Document) -> Vec<ScannedLine<'_>> {
    document
        .lines()
        .map(|line| ScannedLine {
            shape: classify(&line),
            line,
        })
        .collect()
}

pub(crate) fn classify(line: &DocumentLine<'_>) -> LineShape {
    let text = line.text;
    if text.trim().is_empty() {
        return LineShape::Blank;
    }
    if text.starts_with("---") && DELIMITER.is_match(text) {
        return LineShape::Delimiter;
    }
    if !text.contains(':') {
        return LineShape::Text;
    }

    let Some(caps) = ENTRY.captures(text) else {
        return LineShape::Text;
    };
    let (Some(key), Some(raw_value)) = (caps.get(1), caps.get(2)) else {
        return LineShape::Text;
    };

    let value = raw_value.as_str().trim_end();
    let column = |byte: usize| line.start + char_len(&text[..byte]);
    let key_range = column(key.start())..column(key.end());
    let value_start = column(raw_value.start());
    let value_range = value_start..value_start + char_len(value);

    match KeywordKind::from_key(key.as_str()) {
        Some(kind) => LineShape::Keyword(Keyword {
            kind,
            line: line.number,
            keyword_range: key_range,
            identifier: value.to_string(),
            identifier_range: value_range,
        }),
        None => LineShape::Entry(YamlEntry {
            line: line.number,
            key: key.as_str().to_string(),
            key_range,
            value: value.to_string(),
            value_range,
            value_type: ValueType::infer(value),
        }),
    }
}

pub(crate) fn is_number_literal(value: &str) -> bool {
    NUMBER.is_match(value)
}
