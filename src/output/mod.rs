//! Output module for serializing crawl results
//!
//! This module handles:
//! - Writing one Markdown file per extracted page as the crawl runs
//! - Serializing the finished session as Markdown, CSV, Anki and JSON
//! - Converting an archived Markdown digest without re-crawling
//! - Printing the end-of-run report

mod anki;
mod convert;
mod csv;
mod json;
mod markdown;
pub mod stats;
mod traits;

pub use anki::{sanitize_field, sanitize_tag, AnkiDeck, ANKI_HEADER};
pub use convert::{
    convert_archive, convert_markdown, split_sections, ConvertFormat, DigestSection,
};
pub use csv::{escape_field, CsvDigest, QaCsv, CONTENT_CSV_HEADER, QA_CSV_HEADER};
pub use json::JsonDump;
pub use markdown::{
    format_header, format_markdown_digest, format_page_file, format_section, MarkdownDigest,
};
pub use stats::print_report;
pub use traits::{
    ArtifactFormat, ArtifactKind, CrawlReport, CrawlSession, OutputArtifact, OutputError,
    OutputResult, PageRecord, RunMetadata,
};

pub use crate::annotate::QaPair;

use crate::config::OutputConfig;
use crate::text::sanitize_filename;
use std::path::{Path, PathBuf};

/// File name of a per-page artifact, e.g. `007-Getting_Started.md`
pub fn page_file_name(page: &PageRecord) -> String {
    format!("{:03}-{}.md", page.index, sanitize_filename(&page.title))
}

/// Writes the standalone Markdown file for one page
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(OutputError)` - The file could not be written
pub fn write_page_file(content_dir: &Path, page: &PageRecord) -> OutputResult<PathBuf> {
    let path = content_dir.join(page_file_name(page));
    std::fs::write(&path, format_page_file(page)).map_err(|source| OutputError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Formats selected for this run, in write order
fn selected_formats(output: &OutputConfig, generate_qa: bool) -> Vec<Box<dyn ArtifactFormat>> {
    let format = output.format;
    let mut formats: Vec<Box<dyn ArtifactFormat>> = Vec::new();

    if format.includes_markdown() {
        formats.push(Box::new(MarkdownDigest));
    }
    if format.includes_csv() {
        formats.push(Box::new(CsvDigest));
    }
    if format.includes_anki() {
        formats.push(Box::new(AnkiDeck));
    }
    if format.includes_csv() && generate_qa {
        formats.push(Box::new(QaCsv));
    }
    if format.includes_json() {
        formats.push(Box::new(JsonDump));
    }

    formats
}

/// Writes every run-level artifact selected by the output config
///
/// Each artifact is rendered from the session alone and written once.
pub fn write_artifacts(
    session: &CrawlSession,
    output: &OutputConfig,
) -> OutputResult<Vec<OutputArtifact>> {
    std::fs::create_dir_all(&output.output_dir)?;

    let mut artifacts = Vec::new();
    for format in selected_formats(output, session.metadata.generate_qa) {
        let kind = format.kind();
        let path = output.output_dir.join(kind.file_name(&output.combined_file));
        let rendered = format.render(session)?;

        std::fs::write(&path, rendered).map_err(|source| OutputError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::info!("Wrote {}: {}", kind, path.display());
        artifacts.push(OutputArtifact { kind, path });
    }

    Ok(artifacts)
}
