//! Decoration engine: detected blocks → sorted styled spans for a viewport.
//!
//! Spans come in two categories that hosts apply differently:
//!
//! - [`SpanScope::Line`]: whole-line decorations (block backgrounds);
//! - [`SpanScope::Mark`]: token decorations (delimiters, keywords, identifiers, YAML tokens).
//!
//! A block background and a token routinely start at the same offset. The two categories are
//! therefore collected and sorted independently and merged afterwards, line spans first at equal
//! offsets, so a host that requires ordered, range-checked insertion never sees a token before
//! the line it sits on.

use crate::detector::{DelimiterCandidate, DetectionResult, KeywordKind, MetadataBlock, ValueType};
use crate::document::Offset;
use crate::intervals::{Interval, StyleId};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// What a span highlights. The declaration order is the tie-break priority at equal offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SpanKind {
    /// Background of one block line (line decoration).
    BlockBackground,
    /// A delimiter line's dashes.
    Delimiter,
    /// The `SCOPE` keyword.
    ScopeKeyword,
    /// The `QUILL` keyword.
    QuillKeyword,
    /// The identifier after a keyword.
    Identifier,
    /// A YAML key.
    YamlKey,
    /// A YAML value inferred as a string.
    YamlValueString,
    /// A YAML value inferred as a number.
    YamlValueNumber,
    /// A YAML value inferred as a boolean.
    YamlValueBoolean,
}

impl SpanKind {
    /// Every span kind, in priority order.
    pub const ALL: [Self; 9] = [
        Self::BlockBackground,
        Self::Delimiter,
        Self::ScopeKeyword,
        Self::QuillKeyword,
        Self::Identifier,
        Self::YamlKey,
        Self::YamlValueString,
        Self::YamlValueNumber,
        Self::YamlValueBoolean,
    ];

    /// Decoration category of this kind.
    pub fn scope(self) -> SpanScope {
        match self {
            Self::BlockBackground => SpanScope::Line,
            _ => SpanScope::Mark,
        }
    }

    /// Span kind for a keyword word.
    pub fn keyword(kind: KeywordKind) -> Self {
        match kind {
            KeywordKind::Scope => Self::ScopeKeyword,
            KeywordKind::Quill => Self::QuillKeyword,
        }
    }

    /// Span kind for a YAML value of the given type.
    pub fn value(value_type: ValueType) -> Self {
        match value_type {
            ValueType::String => Self::YamlValueString,
            ValueType::Number => Self::YamlValueNumber,
            ValueType::Boolean => Self::YamlValueBoolean,
        }
    }
}

/// Decoration category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SpanScope {
    /// Applies to whole lines.
    Line,
    /// Applies to a character range within a line.
    Mark,
}

/// A styled character range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    /// Char offsets, half-open.
    pub range: Range<Offset>,
    /// What the span highlights.
    pub kind: SpanKind,
    /// Category, always `kind.scope()`.
    pub scope: SpanScope,
}

impl Span {
    /// Create a span; the scope follows from the kind.
    pub fn new(range: Range<Offset>, kind: SpanKind) -> Self {
        Self {
            range,
            scope: kind.scope(),
            kind,
        }
    }

    /// Whether the span shares at least one char with `range`. An empty range shares none.
    pub fn intersects(&self, range: &Range<Offset>) -> bool {
        !range.is_empty() && self.range.start < range.end && range.start < self.range.end
    }

    fn sort_key(&self) -> (Offset, SpanKind, Offset) {
        (self.range.start, self.kind, self.range.end)
    }
}

/// Decorate the blocks intersecting `viewport`.
///
/// Only spans intersecting the viewport are returned. An empty or reversed viewport yields none.
pub fn decorate(blocks: &[MetadataBlock], viewport: Range<Offset>) -> Vec<Span> {
    let mut collector = SpanCollector::new(viewport);
    for block in visible_blocks(blocks, collector.viewport.clone()) {
        collector.push_block(block);
    }
    collector.finish()
}

/// Like [`decorate`], but also styles orphan delimiters as plain delimiters (no background).
pub fn decorate_detection(result: &DetectionResult, viewport: Range<Offset>) -> Vec<Span> {
    let mut collector = SpanCollector::new(viewport);
    for block in visible_blocks(&result.blocks, collector.viewport.clone()) {
        collector.push_block(block);
    }
    for orphan in &result.orphan_delimiters {
        collector.push_delimiter(orphan);
    }
    collector.finish()
}

/// Map spans onto host style intervals.
pub fn to_intervals(spans: &[Span], styles: &MetaStyles) -> Vec<Interval> {
    spans
        .iter()
        .map(|span| Interval::new(span.range.start, span.range.end, styles.style_for(span.kind)))
        .collect()
}

fn visible_blocks(
    blocks: &[MetadataBlock],
    viewport: Range<Offset>,
) -> impl Iterator<Item = &MetadataBlock> {
    let first = if viewport.is_empty() {
        blocks.len()
    } else {
        blocks.partition_point(|block| block.range().end <= viewport.start)
    };
    blocks[first..]
        .iter()
        .take_while(move |block| block.range().start < viewport.end)
}

struct SpanCollector {
    viewport: Range<Offset>,
    line: Vec<Span>,
    mark: Vec<Span>,
}

impl SpanCollector {
    fn new(viewport: Range<Offset>) -> Self {
        let viewport = if viewport.start > viewport.end {
            viewport.start..viewport.start
        } else {
            viewport
        };
        Self {
            viewport,
            line: Vec::new(),
            mark: Vec::new(),
        }
    }

    fn push(&mut self, range: Range<Offset>, kind: SpanKind) {
        if range.start >= range.end {
            return;
        }
        let span = Span::new(range, kind);
        if !span.intersects(&self.viewport) {
            return;
        }
        match span.scope {
            SpanScope::Line => self.line.push(span),
            SpanScope::Mark => self.mark.push(span),
        }
    }

    fn push_delimiter(&mut self, delimiter: &DelimiterCandidate) {
        self.push(delimiter.range.clone(), SpanKind::Delimiter);
    }

    fn push_block(&mut self, block: &MetadataBlock) {
        for line in &block.line_ranges {
            self.push(line.clone(), SpanKind::BlockBackground);
        }
        self.push_delimiter(&block.opening);
        self.push_delimiter(&block.closing);

        for keyword in &block.keywords {
            self.push(keyword.keyword_range.clone(), SpanKind::keyword(keyword.kind));
            self.push(keyword.identifier_range.clone(), SpanKind::Identifier);
        }
        for entry in &block.entries {
            self.push(entry.key_range.clone(), SpanKind::YamlKey);
            self.push(entry.value_range.clone(), SpanKind::value(entry.value_type));
        }
    }

    fn finish(mut self) -> Vec<Span> {
        self.line.sort_by_key(Span::sort_key);
        self.mark.sort_by_key(Span::sort_key);

        let mut out = Vec::with_capacity(self.line.len() + self.mark.len());
        let mut marks = self.mark.into_iter().peekable();
        for line in self.line {
            while let Some(mark) = marks.next_if(|mark| mark.range.start < line.range.start) {
                out.push(mark);
            }
            out.push(line);
        }
        out.extend(marks);
        out
    }
}

/// `StyleId` for every [`SpanKind`].
///
/// These are only identifiers. The host theme maps them to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetaStyles {
    /// [`SpanKind::BlockBackground`]
    pub block_background: StyleId,
    /// [`SpanKind::Delimiter`]
    pub delimiter: StyleId,
    /// [`SpanKind::ScopeKeyword`]
    pub scope_keyword: StyleId,
    /// [`SpanKind::QuillKeyword`]
    pub quill_keyword: StyleId,
    /// [`SpanKind::Identifier`]
    pub identifier: StyleId,
    /// [`SpanKind::YamlKey`]
    pub yaml_key: StyleId,
    /// [`SpanKind::YamlValueString`]
    pub yaml_string: StyleId,
    /// [`SpanKind::YamlValueNumber`]
    pub yaml_number: StyleId,
    /// [`SpanKind::YamlValueBoolean`]
    pub yaml_boolean: StyleId,
}

impl MetaStyles {
    /// Style id for a span kind.
    pub fn style_for(&self, kind: SpanKind) -> StyleId {
        match kind {
            SpanKind::BlockBackground => self.block_background,
            SpanKind::Delimiter => self.delimiter,
            SpanKind::ScopeKeyword => self.scope_keyword,
            SpanKind::QuillKeyword => self.quill_keyword,
            SpanKind::Identifier => self.identifier,
            SpanKind::YamlKey => self.yaml_key,
            SpanKind::YamlValueString => self.yaml_string,
            SpanKind::YamlValueNumber => self.yaml_number,
            SpanKind::YamlValueBoolean => self.yaml_boolean,
        }
    }
}

impl Default for MetaStyles {
    fn default() -> Self {
        Self {
            block_background: META_STYLE_BLOCK_BACKGROUND,
            delimiter: META_STYLE_DELIMITER,
            scope_keyword: META_STYLE_SCOPE_KEYWORD,
            quill_keyword: META_STYLE_QUILL_KEYWORD,
            identifier: META_STYLE_IDENTIFIER,
            yaml_key: META_STYLE_YAML_KEY,
            yaml_string: META_STYLE_YAML_STRING,
            yaml_number: META_STYLE_YAML_NUMBER,
            yaml_boolean: META_STYLE_YAML_BOOLEAN,
        }
    }
}

// Default `StyleId` constants for metadata spans. The `0x05xx_xxxx` range is reserved for them.

/// Default style for delimiter dashes.
pub const META_STYLE_DELIMITER: StyleId = 0x0500_0001;
/// Default style for block line backgrounds.
pub const META_STYLE_BLOCK_BACKGROUND: StyleId = 0x0500_0002;
/// Default style for the `SCOPE` keyword.
pub const META_STYLE_SCOPE_KEYWORD: StyleId = 0x0500_0010;
/// Default style for the `QUILL` keyword.
pub const META_STYLE_QUILL_KEYWORD: StyleId = 0x0500_0011;
/// Default style for keyword identifiers.
pub const META_STYLE_IDENTIFIER: StyleId = 0x0500_0012;
/// Default style for YAML keys.
pub const META_STYLE_YAML_KEY: StyleId = 0x0500_0020;
/// Default style for string values.
pub const META_STYLE_YAML_STRING: StyleId = 0x0500_0021;
/// Default style for number values.
pub const META_STYLE_YAML_NUMBER: StyleId = 0x0500_0022;
/// Default style for boolean values.
pub const META_STYLE_YAML_BOOLEAN: StyleId = 0x0500_0023;
