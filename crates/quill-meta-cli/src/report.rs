//! Inspection report (text and JSON).

use quill_meta::{
    Candidate, CatalogEntry, CompletionContext, DelimiterCandidate, DetectionResult, Document,
    FoldRange, LineNumber, MetadataEngine, Offset, Span, SpanScope, completion_context,
};
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// What the user asked for besides detection.
pub struct Request<'a> {
    pub viewport: Option<Range<Offset>>,
    pub fold_line: Option<LineNumber>,
    pub cursor: Option<Offset>,
    pub catalog: &'a [CatalogEntry],
}

#[derive(Debug, Serialize)]
pub struct FoldReport {
    line: LineNumber,
    range: Option<FoldRange>,
}

#[derive(Debug, Serialize)]
pub struct CompletionReport {
    cursor: Offset,
    context: Option<CompletionContext>,
    candidates: Vec<Candidate>,
}

#[derive(Debug, Serialize)]
pub struct Report {
    lines: usize,
    chars: usize,
    detection: DetectionResult,
    viewport: Range<Offset>,
    spans: Vec<Span>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fold: Option<FoldReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completion: Option<CompletionReport>,
}

impl Report {
    pub fn build(engine: &mut MetadataEngine, document: &Document, request: Request<'_>) -> Self {
        let viewport = request
            .viewport
            .map_or(0..document.char_count(), |range| {
                document.clamp_offset(range.start)..document.clamp_offset(range.end)
            });

        let detection = DetectionResult::clone(&engine.detect(document));
        let spans = engine.decorate(document, viewport.clone());
        let fold = request.fold_line.map(|line| FoldReport {
            line,
            range: engine.fold_range(document, line),
        });
        let completion = request.cursor.map(|cursor| {
            let cursor = document.clamp_offset(cursor);
            CompletionReport {
                cursor,
                context: completion_context(cursor, document),
                candidates: engine.complete(document, cursor, request.catalog),
            }
        });

        Self {
            lines: document.line_count(),
            chars: document.char_count(),
            detection,
            viewport,
            spans,
            fold,
            completion,
        }
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

fn line_list(candidates: &[DelimiterCandidate]) -> String {
    if candidates.is_empty() {
        return String::from("none");
    }
    candidates
        .iter()
        .map(|candidate| candidate.line.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "document: {} lines, {} chars", self.lines, self.chars)?;

        writeln!(f, "blocks: {}", self.detection.blocks.len())?;
        for block in &self.detection.blocks {
            writeln!(f, "  lines {}-{}", block.opening.line, block.closing.line)?;
            for keyword in &block.keywords {
                writeln!(
                    f,
                    "    {} {:?} (line {})",
                    keyword.kind.as_str(),
                    keyword.identifier,
                    keyword.line
                )?;
            }
            for entry in &block.entries {
                writeln!(
                    f,
                    "    {}: {:?} [{:?}] (line {})",
                    entry.key, entry.value, entry.value_type, entry.line
                )?;
            }
        }
        writeln!(
            f,
            "horizontal rules: {}",
            line_list(&self.detection.horizontal_rules)
        )?;
        writeln!(
            f,
            "orphan delimiters: {}",
            line_list(&self.detection.orphan_delimiters)
        )?;

        writeln!(
            f,
            "spans {}..{}: {}",
            self.viewport.start,
            self.viewport.end,
            self.spans.len()
        )?;
        for span in &self.spans {
            let scope = match span.scope {
                SpanScope::Line => "line",
                SpanScope::Mark => "mark",
            };
            let range = format!("{}..{}", span.range.start, span.range.end);
            writeln!(f, "  {range:<12} {scope} {:?}", span.kind)?;
        }

        if let Some(fold) = &self.fold {
            match &fold.range {
                Some(range) => writeln!(
                    f,
                    "fold line {}: lines {}-{}, chars {}..{}",
                    fold.line, range.start_line, range.end_line, range.from, range.to
                )?,
                None => writeln!(f, "fold line {}: none", fold.line)?,
            }
        }

        if let Some(completion) = &self.completion {
            match &completion.context {
                Some(context) => writeln!(
                    f,
                    "completion at {} ({}, typed {:?}):",
                    completion.cursor,
                    context.keyword.as_str(),
                    context.typed
                )?,
                None => writeln!(f, "completion at {}: not on a keyword line", completion.cursor)?,
            }
            for candidate in &completion.candidates {
                match &candidate.detail {
                    Some(detail) => writeln!(f, "  {} - {detail}", candidate.label)?,
                    None => writeln!(f, "  {}", candidate.label)?,
                }
            }
        }

        Ok(())
    }
}
