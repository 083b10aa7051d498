//! Link discovery and work queue construction
//!
//! This module handles:
//! - Collecting `{text, href}` candidates from the index page
//! - Filtering them by link filter and exclusion patterns
//! - Deduplicating by href and bounding the queue to `max_pages`

use crate::config::CrawlConfig;
use crate::text::{collapse_whitespace, truncate_chars};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// Maximum length of a link's text
pub const MAX_LINK_TEXT_CHARS: usize = 100;

/// One entry of the work queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Anchor text, trimmed, newline-free, at most 100 chars
    pub text: String,

    /// Absolute URL
    pub href: String,
}

impl LinkRecord {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// Collects link candidates matched by `selector` in an index document
///
/// The text of every matched element is collapsed to single spaces, trimmed
/// and cut to [`MAX_LINK_TEXT_CHARS`]. The `href` attribute is resolved
/// against `base_url`; elements without one, or with one that does not
/// resolve, yield an empty href and are dropped later by [`build_link_set`].
///
/// # Example
///
/// ```
/// use doc_scraper::crawler::collect_link_candidates;
/// use scraper::{Html, Selector};
/// use url::Url;
///
/// let doc = Html::parse_document(r#"<nav><a href="/intro">Intro</a></nav>"#);
/// let selector = Selector::parse("nav a").unwrap();
/// let base = Url::parse("https://docs.example.com/guide/").unwrap();
/// let links = collect_link_candidates(&doc, &selector, &base);
/// assert_eq!(links[0].href, "https://docs.example.com/intro");
/// ```
pub fn collect_link_candidates(
    document: &Html,
    selector: &Selector,
    base_url: &Url,
) -> Vec<LinkRecord> {
    document
        .select(selector)
        .map(|element| {
            let text = collapse_whitespace(&element.text().collect::<String>());
            let href = element
                .value()
                .attr("href")
                .and_then(|href| resolve_link(href, base_url))
                .unwrap_or_default();
            LinkRecord {
                text: truncate_chars(&text, MAX_LINK_TEXT_CHARS).to_string(),
                href,
            }
        })
        .collect()
}

/// Resolves a link href to an absolute URL
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base_url.join(href).ok().map(|url| url.to_string())
}

/// Returns true if the candidate survives the configured filters
///
/// Rejected: empty text or href, href lacking the link filter, href that
/// contains or ends with any exclusion pattern.
pub fn is_eligible(link: &LinkRecord, config: &CrawlConfig) -> bool {
    if link.href.trim().is_empty() || link.text.trim().is_empty() {
        return false;
    }

    if let Some(filter) = &config.link_filter {
        if !link.href.contains(filter.as_str()) {
            return false;
        }
    }

    !config.exclude_patterns.iter().any(|pattern| {
        !pattern.is_empty()
            && (link.href.contains(pattern.as_str()) || link.href.ends_with(pattern.as_str()))
    })
}

/// Builds the ordered, deduplicated, bounded work queue
///
/// Deduplication is keyed on href: an href keeps the position of its first
/// appearance while its text is replaced by every later occurrence, so the
/// last-seen text wins.
pub fn build_link_set(candidates: Vec<LinkRecord>, config: &CrawlConfig) -> Vec<LinkRecord> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut links: Vec<LinkRecord> = Vec::new();

    for link in candidates.into_iter().filter(|l| is_eligible(l, config)) {
        match positions.get(&link.href) {
            Some(&idx) => links[idx] = link,
            None => {
                positions.insert(link.href.clone(), links.len());
                links.push(link);
            }
        }
    }

    if let Some(max) = config.max_pages {
        links.truncate(max);
    }

    tracing::debug!("Link set holds {} unique links", links.len());
    links
}
