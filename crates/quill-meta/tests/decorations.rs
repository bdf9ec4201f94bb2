use pretty_assertions::assert_eq;
use quill_meta::{
    Document, MetaStyles, SpanKind, SpanScope, decorate, decorate_detection, detect, to_intervals,
};
use std::ops::Range;

const SCENARIO: &str = "---\nSCOPE: alpha\nQUILL: memo\ntitle: Report\n---\n\n---\n\n";

fn summary(spans: &[quill_meta::Span]) -> Vec<(Range<usize>, SpanKind)> {
    spans.iter().map(|s| (s.range.clone(), s.kind)).collect()
}

#[test]
fn test_scenario_spans_in_order() {
    let doc = Document::new(SCENARIO);
    let result = detect(&doc);
    let spans = decorate(&result.blocks, 0..doc.char_count());

    use SpanKind::*;
    assert_eq!(
        summary(&spans),
        vec![
            (0..4, BlockBackground),
            (0..3, Delimiter),
            (4..17, BlockBackground),
            (4..9, ScopeKeyword),
            (11..16, Identifier),
            (17..29, BlockBackground),
            (17..22, QuillKeyword),
            (24..28, Identifier),
            (29..43, BlockBackground),
            (29..34, YamlKey),
            (36..42, YamlValueString),
            (43..47, BlockBackground),
            (43..46, Delimiter),
        ]
    );
}

#[test]
fn test_line_spans_precede_marks_at_equal_start() {
    let doc = Document::new(SCENARIO);
    let result = detect(&doc);
    let spans = decorate(&result.blocks, 0..doc.char_count());

    for pair in spans.windows(2) {
        assert!(pair[0].range.start <= pair[1].range.start);
        if pair[0].range.start == pair[1].range.start {
            assert!(
                !(pair[0].scope == SpanScope::Mark && pair[1].scope == SpanScope::Line),
                "{pair:?}"
            );
        }
    }
}

#[test]
fn test_viewport_restriction() {
    let doc = Document::new(SCENARIO);
    let result = detect(&doc);
    let viewport = 20..30;
    let spans = decorate(&result.blocks, viewport.clone());

    use SpanKind::*;
    assert_eq!(
        summary(&spans),
        vec![
            (17..29, BlockBackground),
            (17..22, QuillKeyword),
            (24..28, Identifier),
            (29..43, BlockBackground),
            (29..34, YamlKey),
        ]
    );
    assert!(spans.iter().all(|span| span.intersects(&viewport)));
}

#[test]
fn test_viewport_outside_blocks_is_empty() {
    let text = "---\nSCOPE: a\n---\n\nLong prose paragraph here.\n\n---\nQUILL: memo\n---\n";
    let doc = Document::new(text);
    let result = detect(&doc);
    assert_eq!(result.blocks.len(), 2);

    // Only the prose line.
    assert!(decorate(&result.blocks, 18..44).is_empty());
    // Empty and reversed viewports.
    assert!(decorate(&result.blocks, 5..5).is_empty());
    assert!(decorate(&result.blocks, 30..2).is_empty());
}

#[test]
fn test_blank_body_line_gets_background() {
    let doc = Document::new("---\nSCOPE: a\n\n---\n");
    let result = detect(&doc);
    let spans = decorate(&result.blocks, 0..doc.char_count());

    let backgrounds: Vec<_> = spans
        .iter()
        .filter(|span| span.kind == SpanKind::BlockBackground)
        .map(|span| span.range.clone())
        .collect();
    assert_eq!(backgrounds, vec![0..4, 4..13, 13..14, 14..18]);
}

#[test]
fn test_empty_identifier_has_no_span() {
    let doc = Document::new("---\nQUILL:\n---\n");
    let result = detect(&doc);
    let spans = decorate(&result.blocks, 0..doc.char_count());
    assert!(spans.iter().all(|span| span.kind != SpanKind::Identifier));
    assert!(spans.iter().any(|span| span.kind == SpanKind::QuillKeyword));
}

#[test]
fn test_orphan_styled_as_plain_delimiter() {
    let doc = Document::new("text\n---\nSCOPE: intro\n");
    let result = detect(&doc);
    assert!(decorate(&result.blocks, 0..doc.char_count()).is_empty());

    let spans = decorate_detection(&result, 0..doc.char_count());
    assert_eq!(summary(&spans), vec![(5..8, SpanKind::Delimiter)]);
}

#[test]
fn test_intervals_use_style_table() {
    let doc = Document::new("---\ncount: 42\n---\n");
    let result = detect(&doc);
    let spans = decorate(&result.blocks, 0..doc.char_count());

    let styles = MetaStyles {
        yaml_number: 99,
        ..MetaStyles::default()
    };
    let intervals = to_intervals(&spans, &styles);
    assert_eq!(intervals.len(), spans.len());

    let number = intervals
        .iter()
        .find(|interval| interval.style_id == 99)
        .expect("number value interval");
    assert_eq!((number.start, number.end), (11, 13));
}
