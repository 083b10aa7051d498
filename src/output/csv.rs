//! CSV digest and Q&A table
//!
//! Every field is wrapped in double quotes with embedded quotes doubled, so
//! commas and newlines inside content never break a row.

use crate::output::traits::{ArtifactFormat, ArtifactKind, CrawlSession, OutputResult};
use crate::text::{char_len, truncate_chars};

/// Header row of `content.csv`
pub const CONTENT_CSV_HEADER: &str = "Index,Title,URL,Content Length,Key Points";

/// Header row of `qa-pairs.csv`
pub const QA_CSV_HEADER: &str = "Chapter,Question,Answer,Source URL";

/// Maximum answer length in the Q&A table
pub const MAX_QA_CSV_ANSWER_CHARS: usize = 500;

/// Quotes a single CSV field
pub fn escape_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Joins already-unescaped fields into one quoted row
pub fn format_row<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// One row per page
pub struct CsvDigest;

impl ArtifactFormat for CsvDigest {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Csv
    }

    fn render(&self, session: &CrawlSession) -> OutputResult<String> {
        let mut rows = vec![CONTENT_CSV_HEADER.to_string()];

        for page in &session.pages {
            rows.push(format_row(&[
                page.index.to_string(),
                page.title.clone(),
                page.url.clone(),
                char_len(&page.content).to_string(),
                page.key_points.join("; "),
            ]));
        }

        Ok(rows.join("\n") + "\n")
    }
}

/// One row per QA pair across all pages
pub struct QaCsv;

impl ArtifactFormat for QaCsv {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::QaCsv
    }

    fn render(&self, session: &CrawlSession) -> OutputResult<String> {
        let mut rows = vec![QA_CSV_HEADER.to_string()];

        for (page, qa) in session.qa_pairs() {
            rows.push(format_row(&[
                page.title.as_str(),
                qa.question.as_str(),
                truncate_chars(&qa.answer, MAX_QA_CSV_ANSWER_CHARS),
                page.url.as_str(),
            ]));
        }

        Ok(rows.join("\n") + "\n")
    }
}
