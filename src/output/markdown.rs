//! Markdown digest generation
//!
//! The digest is a run header followed by one section per page. The same
//! section layout is what the standalone converter later splits on.

use crate::output::traits::{
    ArtifactFormat, ArtifactKind, CrawlSession, OutputResult, PageRecord, RunMetadata,
};

/// Formats the run header block
pub fn format_header(metadata: &RunMetadata) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", metadata.name));
    md.push_str(&format!("> Source site: {}\n", metadata.site_url));
    md.push_str(&format!("> Crawled at: {}\n", metadata.crawled_at));
    md.push_str(&format!("> Pages: {}\n", metadata.page_count));
    md.push_str(&format!(
        "> Tool: doc-scraper v{}\n\n",
        env!("CARGO_PKG_VERSION")
    ));
    md.push_str("---\n\n");

    md
}

/// Formats one page as a digest section
pub fn format_section(page: &PageRecord) -> String {
    format!(
        "## {}\n\n> Source: {}\n\n{}\n\n---\n\n",
        page.title, page.url, page.content
    )
}

/// Formats the standalone per-page file
pub fn format_page_file(page: &PageRecord) -> String {
    format!("# {}\n\n> Source: {}\n\n{}\n", page.title, page.url, page.content)
}

/// Formats the whole digest
pub fn format_markdown_digest(session: &CrawlSession) -> String {
    let mut md = format_header(&session.metadata);
    for page in &session.pages {
        md.push_str(&format_section(page));
    }
    md
}

/// Markdown digest artifact
pub struct MarkdownDigest;

impl ArtifactFormat for MarkdownDigest {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Markdown
    }

    fn render(&self, session: &CrawlSession) -> OutputResult<String> {
        Ok(format_markdown_digest(session))
    }
}
