//! `quill-meta` - inspect metadata blocks in a Markdown file.
//!
//! # Usage
//!
//! ```bash
//! quill-meta notes.md
//! quill-meta notes.md --viewport 0..400 --fold 1 --complete 12 --catalog templates.yaml
//! quill-meta notes.md --format json
//! ```
//!
//! Logging goes to stderr and is controlled by `QUILL_META_LOG` (falling back to `RUST_LOG`).

mod logging;
mod report;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use quill_meta::{
    CatalogEntry, Document, EngineConfig, MetadataEngine, Offset, catalog_from_yaml_path,
};
use std::ops::Range;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "quill-meta", version, about = "Inspect metadata blocks in a Markdown file")]
struct Cli {
    /// Markdown file to inspect.
    file: PathBuf,

    /// Engine configuration (YAML).
    #[arg(long, env = "QUILL_META_CONFIG")]
    config: Option<PathBuf>,

    /// Template catalog for `QUILL:` completion (YAML list).
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Char range to decorate, `<start>..<end>`. Defaults to the whole document.
    #[arg(long, value_parser = parse_viewport)]
    viewport: Option<Range<Offset>>,

    /// Print the fold range of the block opened on this 1-indexed line.
    #[arg(long)]
    fold: Option<usize>,

    /// Print completion candidates at this char offset.
    #[arg(long)]
    complete: Option<Offset>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn parse_viewport(value: &str) -> Result<Range<Offset>, String> {
    let (start, end) = value
        .split_once("..")
        .ok_or_else(|| format!("expected <start>..<end>, got {value:?}"))?;
    let start = start
        .trim()
        .parse()
        .map_err(|e| format!("invalid viewport start {start:?}: {e}"))?;
    let end = end
        .trim()
        .parse()
        .map_err(|e| format!("invalid viewport end {end:?}: {e}"))?;
    Ok(start..end)
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = logging::init() {
        eprintln!("Warning: failed to initialize logging: {err}");
    }

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_yaml_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let catalog: Vec<CatalogEntry> = match &cli.catalog {
        Some(path) => catalog_from_yaml_path(path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => Vec::new(),
    };

    let text = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    let document = Document::new(text);
    if let Some(viewport) = &cli.viewport
        && viewport.start > viewport.end
    {
        bail!("viewport start {} is after its end {}", viewport.start, viewport.end);
    }

    tracing::debug!(
        file = %cli.file.display(),
        chars = document.char_count(),
        lines = document.line_count(),
        "inspecting document"
    );

    let mut engine = MetadataEngine::new(config);
    let report = report::Report::build(
        &mut engine,
        &document,
        report::Request {
            viewport: cli.viewport.clone(),
            fold_line: cli.fold,
            cursor: cli.complete,
            catalog: &catalog,
        },
    );

    let out = match cli.format {
        Format::Text => report.to_text(),
        Format::Json => {
            serde_json::to_string_pretty(&report).context("failed to serialize report")? + "\n"
        }
    };
    print!("{out}");
    Ok(())
}
