#![warn(missing_docs)]
//! Quill Meta - Headless Engine for Metadata Blocks Embedded in Markdown
//!
//! # Overview
//!
//! `quill-meta` recognizes, highlights, folds and completes a small metadata dialect living
//! inside Markdown documents. A block is delimited by bare-dash lines and holds declarative
//! keyword lines plus YAML-like `key: value` pairs:
//!
//! ```text
//! ---
//! SCOPE: intro
//! QUILL: memo
//! title: Quarterly report
//! ---
//! ```
//!
//! The bare-dash line is also a Markdown horizontal rule, so the detector disambiguates every
//! delimiter from its surroundings alone. The engine never renders and never edits: it maps an
//! immutable snapshot (plus viewport or cursor) to plain values any host can apply.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  MetadataEngine / MetadataProcessor         │  ← Host facade (cache, style layers)
//! ├──────────────┬──────────────┬───────────────┤
//! │  Decorations │  Folding     │  Completion   │  ← Derived views
//! ├──────────────┴──────────────┴───────────────┤
//! │  Pattern Detector                           │  ← Blocks, orphans, rules
//! ├─────────────────────────────────────────────┤
//! │  Document + Line Index (Rope-based)         │  ← Snapshot
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use quill_meta::{Document, KeywordKind, SpanKind, decorate, detect, fold_range};
//!
//! let doc = Document::new("---\nSCOPE: intro\ncount: 42\n---\n\n---\n\nText\n");
//! let result = detect(&doc);
//!
//! assert_eq!(result.blocks.len(), 1);
//! assert_eq!(result.horizontal_rules.len(), 1);
//! assert_eq!(result.blocks[0].keywords[0].kind, KeywordKind::Scope);
//!
//! let spans = decorate(&result.blocks, 0..doc.char_count());
//! assert_eq!(spans[0].kind, SpanKind::BlockBackground);
//!
//! assert!(fold_range(1, &result.blocks).is_some());
//! assert!(fold_range(2, &result.blocks).is_none());
//! ```
//!
//! # Module Description
//!
//! - [`document`] - immutable snapshots addressed by char offset and 1-indexed line
//! - [`line_index`] - Rope based line index
//! - [`detector`] - delimiter disambiguation and body classification
//! - [`decorations`] - viewport spans (line spans before mark spans)
//! - [`folding`] - fold ranges and host fold regions
//! - [`completion`] - `SCOPE:` / `QUILL:` candidates
//! - [`engine`] - configured facade with a revision cache
//! - [`processing`] - style layer / fold region edits for hosts

pub mod completion;
pub mod config;
pub mod decorations;
pub mod detector;
pub mod document;
pub mod engine;
pub mod error;
pub mod folding;
pub mod intervals;
pub mod line_index;
pub mod processing;

pub use completion::{
    Candidate, CandidateKind, CatalogEntry, CompletionContext, catalog_from_yaml_path,
    catalog_from_yaml_str, complete, completion_context,
};
pub use config::{DetectionConfig, EngineConfig, FoldingConfig, NeighborRule};
pub use decorations::{
    MetaStyles, Span, SpanKind, SpanScope, decorate, decorate_detection, to_intervals,
};
pub use detector::{
    DelimiterCandidate, DetectionResult, Keyword, KeywordKind, MetadataBlock, ValueType,
    YamlEntry, detect, detect_with,
};
pub use document::{Document, DocumentLine, LineNumber, Offset};
pub use engine::{CacheLookup, MetadataEngine};
pub use error::ConfigError;
pub use folding::{FoldRange, enclosing_block, fold_range, fold_regions};
pub use intervals::{FoldRegion, Interval, StyleId, StyleLayerId};
pub use line_index::LineIndex;
pub use processing::{DocumentProcessor, MetadataProcessor, MetadataUpdateMode, ProcessingEdit};
