//! Key point extraction
//!
//! A line becomes a key point when it looks like a heading, a numbered item,
//! a bullet item, or a short `label: value` line. Matching is purely
//! syntactic.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::char_len;

/// Upper bound on key points per page
pub const MAX_KEY_POINTS: usize = 10;

/// Colon lines at or above this length are prose, not key points
pub const MAX_COLON_LINE_CHARS: usize = 100;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}\s+").expect("valid heading regex"));

static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[.)、]\s*").expect("valid ordered item regex"));

static BULLET_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*•·]\s+").expect("valid bullet regex"));

static LEADING_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:#{1,6}\s+|\d+[.)、]\s*|[-*•·]\s+)").expect("valid marker regex")
});

/// Extracts up to [`MAX_KEY_POINTS`] key points from `content`, in line order
///
/// # Example
///
/// ```
/// use doc_scraper::annotate::extract_key_points;
///
/// let points = extract_key_points("Intro text\n- First item\n2. Second item");
/// assert_eq!(points, vec!["First item", "Second item"]);
/// ```
pub fn extract_key_points(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && is_key_line(line))
        .map(strip_marker)
        .filter(|point| !point.is_empty())
        .take(MAX_KEY_POINTS)
        .collect()
}

fn is_key_line(line: &str) -> bool {
    HEADING.is_match(line)
        || ORDERED_ITEM.is_match(line)
        || BULLET_ITEM.is_match(line)
        || (has_separator(line) && char_len(line) < MAX_COLON_LINE_CHARS)
}

fn has_separator(line: &str) -> bool {
    line.contains(':') || line.contains('：')
}

fn strip_marker(line: &str) -> String {
    LEADING_MARKER.replace(line, "").trim().to_string()
}
