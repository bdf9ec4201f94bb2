use criterion::{Criterion, black_box, criterion_group, criterion_main};
use quill_meta::{Document, MetadataEngine, decorate, detect};

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 48);
    for i in 0..line_count {
        match i % 40 {
            0 => out.push_str("---\n"),
            1 => out.push_str(&format!("SCOPE: section-{}\n", i / 40)),
            2 => out.push_str("QUILL: memo\n"),
            3 => out.push_str(&format!("count: {i}\n")),
            4 => out.push_str("---\n"),
            19 | 21 => out.push('\n'),
            20 => out.push_str("---\n"),
            _ => out.push_str(&format!("{i:06} plain prose line with no metadata at all\n")),
        }
    }
    out
}

fn bench_detect_50k(c: &mut Criterion) {
    let doc = Document::new(large_text(50_000));
    c.bench_function("detect/50k_lines", |b| {
        b.iter(|| {
            let result = detect(black_box(&doc));
            black_box(result.blocks.len());
        })
    });
}

fn bench_decorate_viewport(c: &mut Criterion) {
    let doc = Document::new(large_text(50_000));
    let result = detect(&doc);

    // A screenful well into the file.
    let start = doc.line(25_000).map_or(0, |line| line.start);
    let end = doc.line(25_060).map_or(doc.char_count(), |line| line.end);

    c.bench_function("decorate/60_line_viewport", |b| {
        b.iter(|| {
            let spans = decorate(black_box(&result.blocks), start..end);
            black_box(spans.len());
        })
    });
}

fn bench_engine_cache_hit(c: &mut Criterion) {
    let doc = Document::with_revision(large_text(50_000), 1);
    let mut engine = MetadataEngine::default();
    engine.detect(&doc);

    c.bench_function("engine/cached_detect_50k_lines", |b| {
        b.iter(|| {
            let result = engine.detect(black_box(&doc));
            black_box(result.blocks.len());
        })
    });
}

criterion_group!(
    benches,
    bench_detect_50k,
    bench_decorate_viewport,
    bench_engine_cache_hit
);
criterion_main!(benches);
