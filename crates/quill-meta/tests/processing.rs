use pretty_assertions::assert_eq;
use quill_meta::{
    CacheLookup, CandidateKind, CatalogEntry, Document, DocumentProcessor, EngineConfig,
    FoldRegion, Interval, MetadataEngine, MetadataProcessor, ProcessingEdit, StyleLayerId,
};
use std::collections::BTreeMap;

/// Minimal host keeping style layers and fold regions the way an editor does.
#[derive(Default)]
struct Host {
    layers: BTreeMap<StyleLayerId, Vec<Interval>>,
    folds: Vec<FoldRegion>,
}

impl Host {
    fn apply(&mut self, edits: Vec<ProcessingEdit>) {
        for edit in edits {
            match edit {
                ProcessingEdit::ReplaceStyleLayer { layer, intervals } => {
                    self.layers.insert(layer, intervals);
                }
                ProcessingEdit::ClearStyleLayer { layer } => {
                    self.layers.remove(&layer);
                }
                ProcessingEdit::ReplaceFoldingRegions {
                    mut regions,
                    preserve_collapsed,
                } => {
                    if preserve_collapsed {
                        for region in &mut regions {
                            region.is_collapsed = self.folds.iter().any(|old| {
                                old.is_collapsed
                                    && old.start_line == region.start_line
                                    && old.end_line == region.end_line
                            });
                        }
                    }
                    self.folds = regions;
                }
                ProcessingEdit::ClearFoldingRegions => self.folds.clear(),
            }
        }
    }
}

fn run(processor: &mut MetadataProcessor, host: &mut Host, document: &Document) {
    match processor.process(document) {
        Ok(edits) => host.apply(edits),
        Err(never) => match never {},
    }
}

#[test]
fn test_collapsed_block_survives_edit_below() {
    let mut processor = MetadataProcessor::default();
    let mut host = Host::default();

    let v1 = Document::with_revision("---\nSCOPE: intro\n---\n\nText\n", 1);
    run(&mut processor, &mut host, &v1);
    assert_eq!(host.folds.len(), 1);
    assert_eq!(host.folds[0].placeholder, "---…---");
    host.folds[0].collapse();

    let v2 = Document::with_revision("---\nSCOPE: intro\n---\n\nMore text\n", 2);
    run(&mut processor, &mut host, &v2);
    assert_eq!(host.folds.len(), 1);
    assert!(host.folds[0].is_collapsed);

    let layer = &host.layers[&StyleLayerId::METADATA];
    assert!(layer.iter().all(|interval| interval.end <= 21));
}

#[test]
fn test_removing_metadata_clears_host_state() {
    let mut processor = MetadataProcessor::default();
    let mut host = Host::default();

    run(
        &mut processor,
        &mut host,
        &Document::with_revision("---\nQUILL: memo\n---\n", 1),
    );
    assert!(host.layers.contains_key(&StyleLayerId::METADATA));
    assert_eq!(host.folds.len(), 1);

    run(
        &mut processor,
        &mut host,
        &Document::with_revision("QUILL: memo\n", 2),
    );
    assert!(host.layers.is_empty());
    assert!(host.folds.is_empty());
}

#[test]
fn test_preserve_collapsed_can_be_disabled() {
    let config = EngineConfig::from_yaml_str("folding:\n  preserve_collapsed: false\n").unwrap();
    let mut processor = MetadataProcessor::new(config);
    let mut host = Host::default();

    let doc = Document::with_revision("---\nSCOPE: intro\n---\n", 1);
    run(&mut processor, &mut host, &doc);
    host.folds[0].collapse();

    let doc = Document::with_revision("---\nSCOPE: intro\n---\n\n", 2);
    run(&mut processor, &mut host, &doc);
    assert!(!host.folds[0].is_collapsed);
}

#[test]
fn test_engine_serves_all_views_from_one_detection() {
    let mut engine = MetadataEngine::default();
    let text = "---\nSCOPE: alpha\nQUILL: memo\n---\n\n---\nSCOPE: \n---\n";
    let doc = Document::with_revision(text, 7);
    let catalog = vec![
        CatalogEntry::new("report"),
        CatalogEntry::new("memo").with_description("Internal memo"),
    ];

    assert_eq!(engine.detect(&doc).blocks.len(), 2);
    assert_eq!(engine.last_lookup(), Some(CacheLookup::Miss));

    let fold = engine.fold_range(&doc, 6).expect("second block folds");
    assert_eq!((fold.start_line, fold.end_line), (6, 8));
    assert_eq!(engine.last_lookup(), Some(CacheLookup::Hit));

    // Cursor right after "SCOPE: " on line 7.
    let cursor = doc.line(7).map(|line| line.end).unwrap();
    let scopes = engine.complete(&doc, cursor, &catalog);
    assert_eq!(
        scopes.iter().map(|c| c.label.as_str()).collect::<Vec<_>>(),
        vec!["alpha"]
    );
    assert!(scopes.iter().all(|c| c.kind == CandidateKind::Scope));

    // Cursor at the end of "QUILL: memo" on line 3.
    let cursor = doc.line(3).map(|line| line.end).unwrap();
    let templates = engine.complete(&doc, cursor, &catalog);
    assert_eq!(
        templates
            .iter()
            .map(|c| (c.label.as_str(), c.detail.as_deref()))
            .collect::<Vec<_>>(),
        vec![("memo", Some("Internal memo")), ("report", None)]
    );
    assert_eq!(engine.last_lookup(), Some(CacheLookup::Hit));
}
