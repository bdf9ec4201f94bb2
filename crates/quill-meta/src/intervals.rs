//! Host-facing style intervals and fold regions.
//!
//! These are the shapes a host editor applies: flat style intervals grouped into layers, and
//! line-based fold regions with a collapsed placeholder.

use serde::Serialize;

/// Host style identifier. See [`MetaStyles`](crate::MetaStyles) for the metadata defaults.
pub type StyleId = u32;

/// Style layer a host keeps separate from its own highlighting.
///
/// The metadata layer can be replaced or cleared without touching syntax highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct StyleLayerId(pub u32);

impl StyleLayerId {
    /// Metadata dialect highlighting (delimiters, keywords, YAML tokens, block backgrounds).
    pub const METADATA: Self = Self(6);
}

/// A styled char range, `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interval {
    /// First char.
    pub start: usize,
    /// One past the last char.
    pub end: usize,
    /// Style applied to the range.
    pub style_id: StyleId,
}

impl Interval {
    /// Create an interval with `[start, end)` offsets and a style id.
    pub fn new(start: usize, end: usize, style_id: StyleId) -> Self {
        Self {
            start,
            end,
            style_id,
        }
    }
}

/// A foldable metadata block as the host sees it.
///
/// Lines are **0-based** and inclusive, matching what editor widgets use for gutters. The start
/// line stays visible when collapsed; `start_line + 1..=end_line` is hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoldRegion {
    /// Opening delimiter line.
    pub start_line: usize,
    /// Closing delimiter line (inclusive).
    pub end_line: usize,
    /// Host-owned collapsed state; always `false` when produced by the engine.
    pub is_collapsed: bool,
    /// Summary shown while collapsed (e.g. `"---…---"`).
    pub placeholder: String,
}

impl FoldRegion {
    /// Create an expanded region with a placeholder.
    pub fn with_placeholder(start_line: usize, end_line: usize, placeholder: String) -> Self {
        Self {
            start_line,
            end_line,
            is_collapsed: false,
            placeholder,
        }
    }

    /// Mark the region collapsed.
    pub fn collapse(&mut self) {
        self.is_collapsed = true;
    }
}
