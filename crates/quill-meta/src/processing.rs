//! Host processing interfaces.
//!
//! Hosts that keep derived state in style layers and fold regions consume [`ProcessingEdit`]
//! values. [`MetadataProcessor`] produces them for the metadata dialect: one replacement for the
//! [`StyleLayerId::METADATA`] layer and one for the fold regions, or clears for both when the
//! document holds no metadata at all.

use crate::config::EngineConfig;
use crate::document::Document;
use crate::engine::{MetadataEngine, content_hash};
use crate::intervals::{FoldRegion, Interval, StyleLayerId};
use std::convert::Infallible;

/// A change to host-side derived state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingEdit {
    /// Replace an entire style layer with the given intervals (char offsets).
    ReplaceStyleLayer {
        /// The style layer being replaced.
        layer: StyleLayerId,
        /// The full set of style intervals for the layer (char offsets, half-open).
        intervals: Vec<Interval>,
    },
    /// Clear a style layer.
    ClearStyleLayer {
        /// The style layer being cleared.
        layer: StyleLayerId,
    },
    /// Replace folding regions.
    ///
    /// If `preserve_collapsed` is true, regions that match an existing collapsed region
    /// (`start_line`, `end_line`) stay collapsed after replacement.
    ReplaceFoldingRegions {
        /// The complete set of folding regions.
        regions: Vec<FoldRegion>,
        /// Whether to keep the collapsed state of regions that still exist.
        preserve_collapsed: bool,
    },
    /// Clear all folding regions.
    ClearFoldingRegions,
}

/// A processor that turns a document snapshot into [`ProcessingEdit`]s.
pub trait DocumentProcessor {
    /// The error type returned by [`DocumentProcessor::process`].
    type Error;

    /// Compute derived state updates for `document`.
    ///
    /// Implementations return edits for the caller to apply instead of touching host state.
    fn process(&mut self, document: &Document) -> Result<Vec<ProcessingEdit>, Self::Error>;
}

/// How the processor handled the last `process()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataUpdateMode {
    /// First run for this processor instance.
    Initial,
    /// The document changed and was rescanned in full.
    FullRescan,
    /// No work was performed (this revision was already processed).
    Skipped,
}

/// Metadata highlighting and folding as host edits.
#[derive(Debug)]
pub struct MetadataProcessor {
    engine: MetadataEngine,
    last_processed: Option<(u64, u64)>,
    last_update_mode: Option<MetadataUpdateMode>,
}

impl MetadataProcessor {
    /// Create a processor with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: MetadataEngine::new(config),
            last_processed: None,
            last_update_mode: None,
        }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &MetadataEngine {
        &self.engine
    }

    /// Get the last update mode (useful for tests and instrumentation).
    pub fn last_update_mode(&self) -> Option<MetadataUpdateMode> {
        self.last_update_mode
    }

    /// Returns whether fold replacement preserves the collapsed state for existing regions.
    pub fn preserve_collapsed_folds(&self) -> bool {
        self.engine.config().folding.preserve_collapsed
    }

    /// Forget the last processed revision so the next call always produces edits.
    pub fn reset(&mut self) {
        self.last_processed = None;
        self.engine.invalidate();
    }

    fn replacement_edits(&mut self, document: &Document) -> Vec<ProcessingEdit> {
        let intervals = self.engine.intervals(document, 0..document.char_count());
        let regions = self.engine.fold_regions(document);
        vec![
            ProcessingEdit::ReplaceStyleLayer {
                layer: StyleLayerId::METADATA,
                intervals,
            },
            ProcessingEdit::ReplaceFoldingRegions {
                regions,
                preserve_collapsed: self.preserve_collapsed_folds(),
            },
        ]
    }
}

impl Default for MetadataProcessor {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl DocumentProcessor for MetadataProcessor {
    type Error = Infallible;

    fn process(&mut self, document: &Document) -> Result<Vec<ProcessingEdit>, Self::Error> {
        let key = (document.revision(), content_hash(document.text()));
        if self.last_processed == Some(key) {
            tracing::debug!(revision = key.0, "metadata processing skipped");
            self.last_update_mode = Some(MetadataUpdateMode::Skipped);
            return Ok(Vec::new());
        }

        let update_mode = if self.last_processed.is_none() {
            MetadataUpdateMode::Initial
        } else {
            MetadataUpdateMode::FullRescan
        };

        let edits = if self.engine.detect(document).is_empty() {
            vec![
                ProcessingEdit::ClearStyleLayer {
                    layer: StyleLayerId::METADATA,
                },
                ProcessingEdit::ClearFoldingRegions,
            ]
        } else {
            self.replacement_edits(document)
        };

        self.last_processed = Some(key);
        self.last_update_mode = Some(update_mode);
        Ok(edits)
    }
}
