//! Standalone Markdown digest converter
//!
//! Rebuilds a CSV table or an Anki deck from a digest written by an earlier
//! run. Only section titles and text survive; key points, QA pairs and source
//! URLs are not recovered.

use crate::output::anki::{format_card, sanitize_tag, ANKI_HEADER, MAX_CARD_BACK_CHARS};
use crate::output::csv::format_row;
use crate::output::traits::{OutputError, OutputResult};
use crate::text::{char_len, truncate_chars};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

static SECTION_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^## ").expect("valid section regex"));

static TRAILING_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n-{3,}\s*$").expect("valid rule regex"));

/// Header row of a converted CSV
pub const CONVERTED_CSV_HEADER: &str = "Title,Content Preview";

/// Preview length in a converted CSV
pub const CSV_PREVIEW_CHARS: usize = 200;

/// Previews at or below this length produce no card
pub const MIN_CARD_PREVIEW_CHARS: usize = 50;

/// Target of a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertFormat {
    Csv,
    Anki,
}

impl ConvertFormat {
    /// Output path next to `input`: `<stem>.csv` or `<stem>-anki.txt`
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "digest".to_string());
        let file_name = match self {
            Self::Csv => format!("{}.csv", stem),
            Self::Anki => format!("{}-anki.txt", stem),
        };
        input.with_file_name(file_name)
    }
}

impl FromStr for ConvertFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "anki" => Ok(Self::Anki),
            other => Err(OutputError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ConvertFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Anki => write!(f, "anki"),
        }
    }
}

/// A `## ` section recovered from a digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestSection {
    pub title: String,
    pub body: String,
}

/// Splits a digest into its sections, skipping the document header
pub fn split_sections(markdown: &str) -> Vec<DigestSection> {
    SECTION_HEADING
        .split(markdown)
        .skip(1)
        .filter_map(|block| {
            let (title, rest) = block.split_once('\n').unwrap_or((block, ""));
            let title = title.trim();
            if title.is_empty() {
                return None;
            }
            let body = TRAILING_RULE.replace(rest.trim_end(), "");
            Some(DigestSection {
                title: title.to_string(),
                body: body.trim().to_string(),
            })
        })
        .collect()
}

/// Renders sections as a CSV table
pub fn sections_to_csv(sections: &[DigestSection]) -> String {
    let mut rows = vec![CONVERTED_CSV_HEADER.to_string()];
    for section in sections {
        let preview = truncate_chars(&section.body, CSV_PREVIEW_CHARS).replace('\n', " ");
        rows.push(format_row(&[section.title.as_str(), preview.as_str()]));
    }
    rows.join("\n") + "\n"
}

/// Renders sections as an Anki deck
///
/// Sections whose preview is too short to study from are skipped.
pub fn sections_to_anki(sections: &[DigestSection]) -> String {
    let mut deck = String::from(ANKI_HEADER);
    for section in sections {
        let preview = truncate_chars(&section.body, MAX_CARD_BACK_CHARS);
        if char_len(preview) <= MIN_CARD_PREVIEW_CHARS {
            continue;
        }
        deck.push_str(&format_card(&section.title, preview, &sanitize_tag(&section.title)));
    }
    deck
}

/// Converts digest text in memory
pub fn convert_markdown(markdown: &str, format: ConvertFormat) -> String {
    let sections = split_sections(markdown);
    match format {
        ConvertFormat::Csv => sections_to_csv(&sections),
        ConvertFormat::Anki => sections_to_anki(&sections),
    }
}

/// Converts a digest file and writes the result next to it
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(OutputError)` - Unsupported format, or the input or output failed
pub fn convert_archive(input: &Path, format: &str) -> OutputResult<PathBuf> {
    let format: ConvertFormat = format.parse()?;
    let markdown = std::fs::read_to_string(input)?;

    let output = convert_markdown(&markdown, format);
    let output_path = format.output_path(input);
    std::fs::write(&output_path, output).map_err(|source| OutputError::Write {
        path: output_path.clone(),
        source,
    })?;

    tracing::info!(
        "Converted {} to {} ({})",
        input.display(),
        output_path.display(),
        format
    );

    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DIGEST: &str = "# Vue Guide\n\n> Source site: https://vuejs.org\n> Pages: 2\n\n---\n\n\
## Introduction\n\n> Source: https://vuejs.org/guide/introduction\n\n\
Vue is a progressive framework for building user interfaces on the web.\n\n---\n\n\
## Short\n\n> Source: https://vuejs.org/guide/short\n\nTiny.\n\n---\n\n";

    #[test]
    fn test_parse_format() {
        assert_eq!("csv".parse::<ConvertFormat>().unwrap(), ConvertFormat::Csv);
        assert_eq!("ANKI".parse::<ConvertFormat>().unwrap(), ConvertFormat::Anki);
        assert!(matches!(
            "json".parse::<ConvertFormat>(),
            Err(OutputError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_output_path() {
        let input = Path::new("/tmp/out/combined.md");
        assert_eq!(
            ConvertFormat::Csv.output_path(input),
            PathBuf::from("/tmp/out/combined.csv")
        );
        assert_eq!(
            ConvertFormat::Anki.output_path(input),
            PathBuf::from("/tmp/out/combined-anki.txt")
        );
    }

    #[test]
    fn test_split_sections() {
        let sections = split_sections(DIGEST);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Introduction");
        assert!(sections[0].body.starts_with("> Source: https://vuejs.org/guide/introduction"));
        assert!(sections[0].body.ends_with("on the web."));
        assert!(!sections[1].body.contains("---"));
    }

    #[test]
    fn test_csv_preview() {
        let csv = convert_markdown(DIGEST, ConvertFormat::Csv);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], CONVERTED_CSV_HEADER);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with(
            "\"Introduction\",\"> Source: https://vuejs.org/guide/introduction  Vue is"
        ));
    }

    #[test]
    fn test_anki_skips_short_sections() {
        let deck = convert_markdown(DIGEST, ConvertFormat::Anki);
        assert!(deck.starts_with(ANKI_HEADER));
        let cards: Vec<_> = deck.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(cards.len(), 1);
        assert!(cards[0].starts_with("Introduction\t> Source:"));
        assert!(cards[0].ends_with("\tIntroduction"));
    }

    #[test]
    fn test_header_only_digest() {
        let header_only = "# Vue Guide\n\n> Pages: 0\n\n---\n\n";
        assert_eq!(
            convert_markdown(header_only, ConvertFormat::Csv),
            format!("{}\n", CONVERTED_CSV_HEADER)
        );
        assert_eq!(convert_markdown(header_only, ConvertFormat::Anki), ANKI_HEADER);
    }

    #[test]
    fn test_convert_archive_writes_next_to_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("combined.md");
        std::fs::write(&input, DIGEST).unwrap();

        let output = convert_archive(&input, "csv").unwrap();
        assert_eq!(output, dir.path().join("combined.csv"));
        assert!(std::fs::read_to_string(output).unwrap().starts_with(CONVERTED_CSV_HEADER));
    }

    #[test]
    fn test_convert_archive_unsupported_format() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("combined.md");
        std::fs::write(&input, DIGEST).unwrap();

        let result = convert_archive(&input, "pdf");
        assert!(matches!(result, Err(OutputError::UnsupportedFormat(f)) if f == "pdf"));
        assert!(!dir.path().join("combined.pdf").exists());
    }
}
