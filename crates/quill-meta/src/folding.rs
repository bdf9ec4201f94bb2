//! Fold service over detected blocks.

use crate::detector::MetadataBlock;
use crate::document::{LineNumber, Offset};
use crate::intervals::FoldRegion;
use serde::Serialize;
use std::ops::Range;

/// A collapsible block body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FoldRange {
    /// Opening delimiter line (1-indexed).
    pub start_line: LineNumber,
    /// Closing delimiter line (1-indexed).
    pub end_line: LineNumber,
    /// Offset just after the opening delimiter text.
    pub from: Offset,
    /// End of the last body line, just before the closing delimiter's line break.
    pub to: Offset,
}

impl FoldRange {
    fn for_block(block: &MetadataBlock) -> Self {
        Self {
            start_line: block.opening.line,
            end_line: block.closing.line,
            from: block.opening.range.end,
            to: block.body_range.end,
        }
    }

    /// `from..to` as a range.
    pub fn range(&self) -> Range<Offset> {
        self.from..self.to
    }

    /// Number of body lines hidden by the fold.
    pub fn body_line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line + 1)
    }
}

/// Fold range for the block opened on `line`.
///
/// `None` unless `line` is the opening delimiter of a detected block; body lines, closing lines
/// and orphan delimiters never fold.
pub fn fold_range(line: LineNumber, blocks: &[MetadataBlock]) -> Option<FoldRange> {
    let idx = blocks
        .binary_search_by_key(&line, |block| block.opening.line)
        .ok()?;
    blocks.get(idx).map(FoldRange::for_block)
}

/// The block whose line span (delimiters included) contains `line`.
pub fn enclosing_block(line: LineNumber, blocks: &[MetadataBlock]) -> Option<&MetadataBlock> {
    let idx = blocks.partition_point(|block| block.closing.line < line);
    blocks.get(idx).filter(|block| block.contains_line(line))
}

/// One host fold region per block (0-based inclusive lines, opener stays visible).
pub fn fold_regions(blocks: &[MetadataBlock], placeholder: &str) -> Vec<FoldRegion> {
    blocks
        .iter()
        .map(|block| {
            FoldRegion::with_placeholder(
                block.opening.line - 1,
                block.closing.line - 1,
                placeholder.to_string(),
            )
        })
        .collect()
}
