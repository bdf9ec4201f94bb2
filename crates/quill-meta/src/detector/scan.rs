//! Delimiter pairing state machine.

use super::lines::{LineShape, ScannedLine};
use super::{DelimiterCandidate, DetectionResult, MetadataBlock};
use crate::config::{DetectionConfig, NeighborRule};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// `candidates[next]` is the next delimiter that may open a block.
    SeekingOpener { next: usize },
    /// `candidates[opener]` opened a block; the following candidate decides its fate.
    SeekingCloser { opener: usize },
    Done,
}

pub(crate) struct Scanner<'s, 'a> {
    lines: &'s [ScannedLine<'a>],
    /// Indices into `lines` of every delimiter line, in order.
    candidates: Vec<usize>,
    config: &'s DetectionConfig,
    result: DetectionResult,
}

impl<'s, 'a> Scanner<'s, 'a> {
    pub fn new(lines: &'s [ScannedLine<'a>], config: &'s DetectionConfig) -> Self {
        let candidates = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.is_delimiter())
            .map(|(idx, _)| idx)
            .collect();

        Self {
            lines,
            candidates,
            config,
            result: DetectionResult::default(),
        }
    }

    pub fn run(mut self) -> DetectionResult {
        let mut state = ScanState::SeekingOpener { next: 0 };
        while state != ScanState::Done {
            state = self.step(state);
        }
        self.result
    }

    fn step(&mut self, state: ScanState) -> ScanState {
        match state {
            ScanState::SeekingOpener { next } => {
                let Some(&line_idx) = self.candidates.get(next) else {
                    return ScanState::Done;
                };
                if self.is_isolated_rule(next) {
                    tracing::trace!(line = line_idx + 1, "delimiter is a horizontal rule");
                    self.result.horizontal_rules.push(self.candidate(line_idx));
                    ScanState::SeekingOpener { next: next + 1 }
                } else {
                    ScanState::SeekingCloser { opener: next }
                }
            }
            ScanState::SeekingCloser { opener } => {
                let Some(&open_idx) = self.candidates.get(opener) else {
                    return ScanState::Done;
                };
                let Some(&close_idx) = self.candidates.get(opener + 1) else {
                    // Unterminated: everything after the opener stays ordinary text.
                    tracing::trace!(line = open_idx + 1, "unterminated metadata opener");
                    self.result.orphan_delimiters.push(self.candidate(open_idx));
                    return ScanState::Done;
                };

                if self.has_qualifying(open_idx + 1..close_idx) {
                    let block = self.build_block(open_idx, close_idx);
                    self.result.blocks.push(block);
                    ScanState::SeekingOpener { next: opener + 2 }
                } else {
                    // Content-less pair: the opener is a rule, the closer gets its own turn.
                    self.result.horizontal_rules.push(self.candidate(open_idx));
                    ScanState::SeekingOpener { next: opener + 1 }
                }
            }
            ScanState::Done => ScanState::Done,
        }
    }

    /// Blank-line neighbours and no qualifying content before the next candidate.
    fn is_isolated_rule(&self, candidate: usize) -> bool {
        let Some(&line_idx) = self.candidates.get(candidate) else {
            return false;
        };
        let missing = self.config.missing_neighbor_is_blank;
        let before = line_idx
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map_or(missing, ScannedLine::is_blank);
        let after = self
            .lines
            .get(line_idx + 1)
            .map_or(missing, ScannedLine::is_blank);

        let neighbors_blank = match self.config.rule_neighbors {
            NeighborRule::Both => before && after,
            NeighborRule::Either => before || after,
        };
        if !neighbors_blank {
            return false;
        }

        let section_end = self
            .candidates
            .get(candidate + 1)
            .copied()
            .unwrap_or(self.lines.len());
        !self.has_qualifying(line_idx + 1..section_end)
    }

    fn has_qualifying(&self, range: Range<usize>) -> bool {
        self.lines
            .get(range)
            .is_some_and(|lines| lines.iter().any(ScannedLine::is_qualifying))
    }

    fn candidate(&self, line_idx: usize) -> DelimiterCandidate {
        let line = &self.lines[line_idx].line;
        DelimiterCandidate {
            line: line.number,
            range: line.start..line.end,
        }
    }

    fn build_block(&self, open_idx: usize, close_idx: usize) -> MetadataBlock {
        let body = &self.lines[open_idx + 1..close_idx];

        let mut keywords = Vec::new();
        let mut entries = Vec::new();
        for scanned in body {
            match &scanned.shape {
                LineShape::Keyword(keyword) => keywords.push(keyword.clone()),
                LineShape::Entry(entry) => entries.push(entry.clone()),
                LineShape::Blank | LineShape::Delimiter | LineShape::Text => {}
            }
        }

        let opening = self.candidate(open_idx);
        let closing = self.candidate(close_idx);
        let body_start = body.first().map_or(opening.range.end, |l| l.line.start);
        let body_end = body.last().map_or(opening.range.end, |l| l.line.end);

        MetadataBlock {
            body_lines: opening.line + 1..closing.line,
            body_range: body_start..body_end,
            line_ranges: self.lines[open_idx..=close_idx]
                .iter()
                .map(|scanned| scanned.line.start..scanned.line.next_start)
                .collect(),
            keywords,
            entries,
            opening,
            closing,
        }
    }
}
