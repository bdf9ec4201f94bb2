//! Completion provider for `SCOPE:` and `QUILL:` lines.
//!
//! Completion is gated on the text of the cursor's line up to the cursor: it must start with one
//! of the two keywords followed by a colon. `SCOPE:` offers identifiers already used by detected
//! blocks, `QUILL:` offers template names from a host-supplied catalog. Candidates are advisory;
//! applying one is the host's job.

use crate::detector::{KeywordKind, MetadataBlock, compile};
use crate::document::{Document, LineNumber, Offset, char_len};
use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

static KEYWORD_PREFIX: LazyLock<Regex> = LazyLock::new(|| compile(r"^\s*(SCOPE|QUILL):\s*"));

/// A template the host knows about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Template name inserted after `QUILL:`.
    pub name: String,
    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CatalogEntry {
    /// An entry without description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogItem {
    Name(String),
    Entry(CatalogEntry),
}

/// Parse a catalog: a YAML (or JSON) list of names and/or `{name, description}` mappings.
pub fn catalog_from_yaml_str(yaml: &str) -> Result<Vec<CatalogEntry>, ConfigError> {
    if yaml.trim().is_empty() {
        return Ok(Vec::new());
    }
    let items: Vec<CatalogItem> = serde_yaml::from_str(yaml)?;
    Ok(items
        .into_iter()
        .map(|item| match item {
            CatalogItem::Name(name) => CatalogEntry::new(name),
            CatalogItem::Entry(entry) => entry,
        })
        .collect())
}

/// Read and parse a catalog file.
pub fn catalog_from_yaml_path(path: impl AsRef<Path>) -> Result<Vec<CatalogEntry>, ConfigError> {
    let yaml = std::fs::read_to_string(path)?;
    catalog_from_yaml_str(&yaml)
}

/// Where a candidate comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    /// A `SCOPE` identifier already used in the document.
    Scope,
    /// A catalog template.
    Template,
}

/// One completion suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Candidate {
    /// Text to insert.
    pub label: String,
    /// Extra information for the popup (template description).
    pub detail: Option<String>,
    /// Candidate source.
    pub kind: CandidateKind,
}

/// The keyword line a completion request sits on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CompletionContext {
    /// Keyword before the cursor.
    pub keyword: KeywordKind,
    /// 1-indexed line of the cursor.
    pub line: LineNumber,
    /// Identifier text typed so far (between the colon's whitespace and the cursor).
    pub typed: String,
    /// Range an accepted candidate replaces: from the typed text's start to the end of the
    /// identifier (trailing whitespace excluded), never ending before the cursor.
    pub replace: Range<Offset>,
}

/// Derive the completion context at `cursor`, if the line prefix is a keyword prefix.
///
/// The cursor is clamped to the document.
pub fn completion_context(cursor: Offset, document: &Document) -> Option<CompletionContext> {
    let cursor = document.clamp_offset(cursor);
    let (line, raw_prefix) = document.line_prefix(cursor);
    // A cursor between `\r` and `\n` sits at the end of the line text.
    let prefix = raw_prefix.strip_suffix('\r').unwrap_or(raw_prefix);
    let cursor = cursor - (raw_prefix.len() - prefix.len());

    let caps = KEYWORD_PREFIX.captures(prefix)?;
    let keyword = KeywordKind::from_key(caps.get(1)?.as_str())?;
    let typed = &prefix[caps.get(0)?.end()..];

    let typed_start = cursor - char_len(typed);
    let line_end = document
        .line(line)
        .map_or(cursor, |l| l.start + char_len(l.text.trim_end()));

    Some(CompletionContext {
        keyword,
        line,
        typed: typed.to_string(),
        replace: typed_start..line_end.max(cursor),
    })
}

/// Completion candidates at `cursor`.
///
/// Empty unless the cursor's line, truncated at the cursor, starts with `SCOPE:` or `QUILL:`.
/// Candidates are not filtered by the typed text; hosts narrow the list as the user types.
pub fn complete(
    cursor: Offset,
    document: &Document,
    blocks: &[MetadataBlock],
    catalog: &[CatalogEntry],
) -> Vec<Candidate> {
    let Some(context) = completion_context(cursor, document) else {
        return Vec::new();
    };

    let candidates = match context.keyword {
        KeywordKind::Scope => scope_candidates(blocks, context.line),
        KeywordKind::Quill => template_candidates(catalog),
    };
    tracing::trace!(
        keyword = context.keyword.as_str(),
        line = context.line,
        candidates = candidates.len(),
        "completion"
    );
    candidates
}

fn scope_candidates(blocks: &[MetadataBlock], cursor_line: LineNumber) -> Vec<Candidate> {
    let names: BTreeSet<&str> = blocks
        .iter()
        .flat_map(|block| &block.keywords)
        .filter(|keyword| keyword.kind == KeywordKind::Scope && keyword.line != cursor_line)
        .map(|keyword| keyword.identifier.as_str())
        .filter(|name| !name.is_empty())
        .collect();

    names
        .into_iter()
        .map(|name| Candidate {
            label: name.to_string(),
            detail: None,
            kind: CandidateKind::Scope,
        })
        .collect()
}

fn template_candidates(catalog: &[CatalogEntry]) -> Vec<Candidate> {
    let mut entries: Vec<&CatalogEntry> = catalog
        .iter()
        .filter(|entry| !entry.name.is_empty())
        .collect();
    // Stable: the first entry wins among duplicates.
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries.dedup_by(|a, b| a.name == b.name);

    entries
        .into_iter()
        .map(|entry| Candidate {
            label: entry.name.clone(),
            detail: entry.description.clone(),
            kind: CandidateKind::Template,
        })
        .collect()
}
