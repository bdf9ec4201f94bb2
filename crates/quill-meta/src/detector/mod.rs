//! Pattern detector: the single source of truth for where metadata blocks are.
//!
//! Detection runs in two stages over an immutable [`Document`]:
//!
//! 1. every line is classified once (blank, delimiter, keyword, key/value, plain text);
//! 2. an explicit state machine walks the delimiter candidates left to right, pairing openers
//!    with closers, demoting content-less pairs to horizontal rules and stopping at the first
//!    unterminated opener.
//!
//! The result is recomputed from scratch on every call and never patched in place.

mod lines;
mod scan;

use crate::config::DetectionConfig;
use crate::document::{Document, LineNumber, Offset};
use serde::{Deserialize, Serialize};
use std::ops::{Range, RangeInclusive};

pub(crate) use lines::{compile, is_number_literal};

/// The two declarative keywords of the dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeywordKind {
    /// `SCOPE: <name>`
    Scope,
    /// `QUILL: <template>`
    Quill,
}

impl KeywordKind {
    /// Every keyword kind.
    pub const ALL: [Self; 2] = [Self::Scope, Self::Quill];

    /// The keyword as written in documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scope => "SCOPE",
            Self::Quill => "QUILL",
        }
    }

    /// Match a key exactly (keywords are upper case only).
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == key)
    }
}

/// Inferred type of a key/value entry's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Anything that is neither a number nor a boolean.
    String,
    /// A number literal (`42`, `-1.5`, `2e3`).
    Number,
    /// `true` / `false`, any letter case.
    Boolean,
}

impl ValueType {
    /// Infer the type of a (trimmed) value.
    pub fn infer(value: &str) -> Self {
        let value = value.trim();
        if is_number_literal(value) {
            Self::Number
        } else if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
            Self::Boolean
        } else {
            Self::String
        }
    }
}

/// A bare-dash line (`---`, `-----`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DelimiterCandidate {
    /// 1-indexed line number.
    pub line: LineNumber,
    /// Offsets of the line text (line break excluded).
    pub range: Range<Offset>,
}

/// A `SCOPE:` or `QUILL:` line inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Keyword {
    /// Which keyword.
    pub kind: KeywordKind,
    /// 1-indexed line number.
    pub line: LineNumber,
    /// Offsets of the keyword word (colon excluded).
    pub keyword_range: Range<Offset>,
    /// Text after the colon, trimmed. Empty while the user is still typing.
    pub identifier: String,
    /// Offsets of `identifier`.
    pub identifier_range: Range<Offset>,
}

/// A `key: value` line inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct YamlEntry {
    /// 1-indexed line number.
    pub line: LineNumber,
    /// The key.
    pub key: String,
    /// Offsets of the key.
    pub key_range: Range<Offset>,
    /// The value, trailing whitespace trimmed.
    pub value: String,
    /// Offsets of the value.
    pub value_range: Range<Offset>,
    /// Inferred value type.
    pub value_type: ValueType,
}

/// A paired delimiter region holding at least one keyword or key/value line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MetadataBlock {
    /// Opening delimiter.
    pub opening: DelimiterCandidate,
    /// Closing delimiter.
    pub closing: DelimiterCandidate,
    /// Body lines (half-open, 1-indexed): `opening.line + 1..closing.line`.
    pub body_lines: Range<LineNumber>,
    /// From the first body char to the end of the last body line's text.
    pub body_range: Range<Offset>,
    /// Every block line from opener to closer, each including its line break.
    pub line_ranges: Vec<Range<Offset>>,
    /// Keyword lines, in document order.
    pub keywords: Vec<Keyword>,
    /// Key/value lines, in document order.
    pub entries: Vec<YamlEntry>,
}

impl MetadataBlock {
    /// Lines covered by the block, delimiters included.
    pub fn line_span(&self) -> RangeInclusive<LineNumber> {
        self.opening.line..=self.closing.line
    }

    /// Whether `line` lies anywhere in the block (delimiters included).
    pub fn contains_line(&self, line: LineNumber) -> bool {
        self.line_span().contains(&line)
    }

    /// Offsets covered by the block, from the opener to the closer's line break.
    pub fn range(&self) -> Range<Offset> {
        let end = self
            .line_ranges
            .last()
            .map_or(self.closing.range.end, |range| range.end);
        self.opening.range.start..end
    }

    /// Whether the block intersects a (half-open) offset range.
    pub fn intersects(&self, range: &Range<Offset>) -> bool {
        let own = self.range();
        own.start < range.end && range.start < own.end
    }

    /// First keyword of the given kind.
    pub fn keyword(&self, kind: KeywordKind) -> Option<&Keyword> {
        self.keywords.iter().find(|keyword| keyword.kind == kind)
    }

    /// Identifier of the first `SCOPE:` line.
    pub fn scope(&self) -> Option<&str> {
        self.keyword(KeywordKind::Scope)
            .map(|keyword| keyword.identifier.as_str())
    }

    /// Identifier of the first `QUILL:` line.
    pub fn quill(&self) -> Option<&str> {
        self.keyword(KeywordKind::Quill)
            .map(|keyword| keyword.identifier.as_str())
    }

    /// Key/value entry by key.
    pub fn entry(&self, key: &str) -> Option<&YamlEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }
}

/// Output of one detection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DetectionResult {
    /// Blocks in document order; never overlapping.
    pub blocks: Vec<MetadataBlock>,
    /// Openers with no closer. At most one: scanning stops there.
    pub orphan_delimiters: Vec<DelimiterCandidate>,
    /// Delimiter lines classified as ordinary horizontal rules.
    pub horizontal_rules: Vec<DelimiterCandidate>,
}

impl DetectionResult {
    /// Whether no block and no orphan was found.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.orphan_delimiters.is_empty()
    }

    /// The block whose line span contains `line`.
    pub fn block_at_line(&self, line: LineNumber) -> Option<&MetadataBlock> {
        crate::folding::enclosing_block(line, &self.blocks)
    }
}

/// Detect metadata blocks with the default disambiguation rules.
pub fn detect(document: &Document) -> DetectionResult {
    detect_with(document, &DetectionConfig::default())
}

/// Detect metadata blocks with explicit disambiguation rules.
pub fn detect_with(document: &Document, config: &DetectionConfig) -> DetectionResult {
    let lines = lines::tokenize(document);
    let result = scan::Scanner::new(&lines, config).run();

    tracing::debug!(
        revision = document.revision(),
        lines = lines.len(),
        blocks = result.blocks.len(),
        orphans = result.orphan_delimiters.len(),
        horizontal_rules = result.horizontal_rules.len(),
        "metadata detection finished"
    );

    result
}
