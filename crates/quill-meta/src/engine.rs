//! Configured engine facade with a revision-keyed detection cache.

use crate::completion::{Candidate, CatalogEntry, complete};
use crate::config::EngineConfig;
use crate::decorations::{Span, decorate_detection, to_intervals};
use crate::detector::{DetectionResult, detect_with};
use crate::document::{Document, LineNumber, Offset};
use crate::folding::{FoldRange, fold_range, fold_regions};
use crate::intervals::{FoldRegion, Interval};
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::sync::Arc;

/// How the last [`MetadataEngine::detect`] call was served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLookup {
    /// Revision and content hash matched the cached result.
    Hit,
    /// Detection ran again.
    Miss,
}

#[derive(Debug)]
struct CachedDetection {
    revision: u64,
    hash: u64,
    result: Arc<DetectionResult>,
}

/// Detection, decoration, folding and completion sharing one configuration and cache.
///
/// The cache holds a single result keyed by document revision **and** content hash, so a host
/// that reuses a revision number for different text still gets a fresh detection.
#[derive(Debug, Default)]
pub struct MetadataEngine {
    config: EngineConfig,
    cache: Option<CachedDetection>,
    last_lookup: Option<CacheLookup>,
}

impl MetadataEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            cache: None,
            last_lookup: None,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// How the last detection was served (useful for tests and instrumentation).
    pub fn last_lookup(&self) -> Option<CacheLookup> {
        self.last_lookup
    }

    /// Drop the cached detection.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Detect blocks, reusing the cached result when the document is unchanged.
    pub fn detect(&mut self, document: &Document) -> Arc<DetectionResult> {
        let revision = document.revision();
        let hash = content_hash(document.text());

        if let Some(cached) = &self.cache
            && cached.revision == revision
            && cached.hash == hash
        {
            tracing::trace!(revision, "metadata detection cache hit");
            self.last_lookup = Some(CacheLookup::Hit);
            return Arc::clone(&cached.result);
        }

        tracing::trace!(revision, "metadata detection cache miss");
        let result = Arc::new(detect_with(document, &self.config.detection));
        self.cache = Some(CachedDetection {
            revision,
            hash,
            result: Arc::clone(&result),
        });
        self.last_lookup = Some(CacheLookup::Miss);
        result
    }

    /// Spans for `viewport`, clamped to the document. Orphan delimiters are included.
    pub fn decorate(&mut self, document: &Document, viewport: Range<Offset>) -> Vec<Span> {
        let viewport = document.clamp_offset(viewport.start)..document.clamp_offset(viewport.end);
        let result = self.detect(document);
        decorate_detection(&result, viewport)
    }

    /// Host style intervals for `viewport`, mapped through the configured styles.
    pub fn intervals(&mut self, document: &Document, viewport: Range<Offset>) -> Vec<Interval> {
        let spans = self.decorate(document, viewport);
        to_intervals(&spans, &self.config.styles)
    }

    /// Fold range for the block opened on `line` (1-indexed).
    pub fn fold_range(&mut self, document: &Document, line: LineNumber) -> Option<FoldRange> {
        let result = self.detect(document);
        fold_range(line, &result.blocks)
    }

    /// Host fold regions for every block, with the configured placeholder.
    pub fn fold_regions(&mut self, document: &Document) -> Vec<FoldRegion> {
        let result = self.detect(document);
        fold_regions(&result.blocks, &self.config.folding.placeholder)
    }

    /// Completion candidates at `cursor`.
    pub fn complete(
        &mut self,
        document: &Document,
        cursor: Offset,
        catalog: &[CatalogEntry],
    ) -> Vec<Candidate> {
        let result = self.detect(document);
        complete(cursor, document, &result.blocks, catalog)
    }
}

pub(crate) fn content_hash(text: &str) -> u64 {
    let mut hasher = FxHasher::default();
    text.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DetectionConfig, NeighborRule};

    const TEXT: &str = "---\nSCOPE: alpha\nQUILL: memo\ntitle: Report\n---\n\n---\n\n";

    #[test]
    fn test_cache_hit_on_same_revision_and_text() {
        let mut engine = MetadataEngine::default();
        let doc = Document::with_revision(TEXT, 3);

        let first = engine.detect(&doc);
        assert_eq!(engine.last_lookup(), Some(CacheLookup::Miss));
        let second = engine.detect(&doc);
        assert_eq!(engine.last_lookup(), Some(CacheLookup::Hit));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_reused_revision_with_new_text_misses() {
        let mut engine = MetadataEngine::default();
        engine.detect(&Document::with_revision(TEXT, 1));

        let edited = Document::with_revision("---\nSCOPE: alpha\n", 1);
        let result = engine.detect(&edited);
        assert_eq!(engine.last_lookup(), Some(CacheLookup::Miss));
        assert!(result.blocks.is_empty());
        assert_eq!(result.orphan_delimiters.len(), 1);
    }

    #[test]
    fn test_invalidate_forces_detection() {
        let mut engine = MetadataEngine::default();
        let doc = Document::new(TEXT);
        engine.detect(&doc);
        engine.invalidate();
        engine.detect(&doc);
        assert_eq!(engine.last_lookup(), Some(CacheLookup::Miss));
    }

    #[test]
    fn test_decorate_clamps_viewport() {
        let mut engine = MetadataEngine::default();
        let doc = Document::new(TEXT);

        let clamped = engine.decorate(&doc, 0..10_000);
        let full = engine.decorate(&doc, 0..doc.char_count());
        assert_eq!(clamped, full);
        assert!(!full.is_empty());
        assert!(engine.decorate(&doc, 5_000..10_000).is_empty());
        assert!(engine.decorate(&doc, 5..5).is_empty());
        assert!(engine.decorate(&doc, 8..2).is_empty());
    }

    #[test]
    fn test_fold_regions_use_configured_placeholder() {
        let mut config = EngineConfig::default();
        config.folding.placeholder = String::from("[meta]");
        let mut engine = MetadataEngine::new(config);
        let doc = Document::new(TEXT);

        let regions = engine.fold_regions(&doc);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].placeholder, "[meta]");
        assert_eq!((regions[0].start_line, regions[0].end_line), (0, 4));
        assert!(engine.fold_range(&doc, 1).is_some());
        assert!(engine.fold_range(&doc, 7).is_none());
    }

    #[test]
    fn test_detection_follows_config() {
        let text = "intro\n\n---\nprose\n";
        let doc = Document::new(text);

        let mut strict = MetadataEngine::default();
        assert_eq!(strict.detect(&doc).orphan_delimiters.len(), 1);

        let mut lenient = MetadataEngine::new(EngineConfig {
            detection: DetectionConfig {
                rule_neighbors: NeighborRule::Either,
                ..DetectionConfig::default()
            },
            ..EngineConfig::default()
        });
        let result = lenient.detect(&doc);
        assert!(result.orphan_delimiters.is_empty());
        assert_eq!(result.horizontal_rules.len(), 1);
    }

    #[test]
    fn test_engine_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<MetadataEngine>();
    }
}
