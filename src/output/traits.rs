//! Output types and the artifact format trait
//!
//! This module defines the page record produced by a crawl, the session that
//! accumulates records, and the trait every serialized format implements.

use crate::annotate::QaPair;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported conversion format: {0} (expected csv or anki)")]
    UnsupportedFormat(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Everything the crawl learned about one successfully extracted page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// 1-based position in the link set; never renumbered
    pub index: usize,
    pub title: String,
    pub url: String,
    pub content: String,
    pub key_points: Vec<String>,
    pub qa: Vec<QaPair>,
}

/// Run-level facts printed in the digest header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunMetadata {
    /// Site name from the preset
    pub name: String,
    pub site_url: String,
    pub crawled_at: String,
    /// Number of links queued for the crawl
    pub page_count: usize,
    pub generate_qa: bool,
}

/// Accumulated results of one crawl, owned by the coordinator
#[derive(Debug, Clone)]
pub struct CrawlSession {
    pub metadata: RunMetadata,
    pub pages: Vec<PageRecord>,
    pub success_count: usize,
    pub fail_count: usize,
}

impl CrawlSession {
    pub fn new(metadata: RunMetadata) -> Self {
        Self {
            metadata,
            pages: Vec::new(),
            success_count: 0,
            fail_count: 0,
        }
    }

    /// Appends a successfully extracted page
    pub fn record_success(&mut self, page: PageRecord) {
        self.pages.push(page);
        self.success_count += 1;
    }

    /// Counts a link that produced no record
    pub fn record_failure(&mut self) {
        self.fail_count += 1;
    }

    /// Every QA pair of the run, with the page it came from
    pub fn qa_pairs(&self) -> impl Iterator<Item = (&PageRecord, &QaPair)> {
        self.pages
            .iter()
            .flat_map(|page| page.qa.iter().map(move |qa| (page, qa)))
    }
}

/// The kinds of run-level artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Markdown,
    Csv,
    Anki,
    QaCsv,
    Json,
}

impl ArtifactKind {
    /// File name inside the output directory
    ///
    /// The Markdown digest name is configurable; the rest are fixed.
    pub fn file_name<'a>(&self, combined_file: &'a str) -> &'a str {
        match self {
            Self::Markdown => combined_file,
            Self::Csv => "content.csv",
            Self::Anki => "anki-import.txt",
            Self::QaCsv => "qa-pairs.csv",
            Self::Json => "data.json",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Markdown => "Markdown digest",
            Self::Csv => "CSV digest",
            Self::Anki => "Anki deck",
            Self::QaCsv => "Q&A CSV",
            Self::Json => "JSON dump",
        };
        f.write_str(label)
    }
}

/// A file written at the end of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
}

/// Final outcome of a crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub success_count: usize,
    pub fail_count: usize,
    pub artifacts: Vec<OutputArtifact>,
    /// One Markdown file per extracted page, in crawl order
    pub page_files: Vec<PathBuf>,
    pub pages: Vec<PageRecord>,
}

/// A serialized view of a finished session
///
/// Formats are independent: each renders from the session alone.
pub trait ArtifactFormat {
    fn kind(&self) -> ArtifactKind;

    /// Renders the whole artifact
    fn render(&self, session: &CrawlSession) -> OutputResult<String>;
}
