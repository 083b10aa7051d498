//! Small text helpers shared by the crawler and the serializers
//!
//! All lengths here are counted in chars, never bytes, so multi-byte
//! content is never split inside a code point.

use once_cell::sync::Lazy;
use regex::Regex;

static UNSAFE_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[/\\:*?"<>|]"#).expect("valid filename regex"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Maximum length of a sanitized file name stem
pub const MAX_FILENAME_CHARS: usize = 80;

/// Returns the first `max` chars of `s`
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Number of chars in `s`
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Collapses every whitespace run (newlines included) into one space and trims
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Makes a string safe to use as a file name stem
///
/// Path-unsafe characters and whitespace runs become `_`, and the result is
/// cut to [`MAX_FILENAME_CHARS`].
pub fn sanitize_filename(name: &str) -> String {
    let replaced = UNSAFE_FILENAME_CHARS.replace_all(name, "_");
    let replaced = WHITESPACE_RUN.replace_all(&replaced, "_");
    truncate_chars(&replaced, MAX_FILENAME_CHARS).to_string()
}

/// Formats a size for progress output (`512 B`, `1.5 KB`, `2.0 MB`)
pub fn format_bytes(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("", 3), "");
        assert_eq!(truncate_chars("組件基礎教學", 2), "組件");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Getting\n  Started \t "), "Getting Started");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("a/b\\c:d*e?f\"g<h>i|j"), "a_b_c_d_e_f_g_h_i_j");
        assert_eq!(sanitize_filename("Getting   Started\nNow"), "Getting_Started_Now");
    }

    #[test]
    fn test_sanitize_filename_truncates() {
        let long = "x".repeat(200);
        assert_eq!(sanitize_filename(&long).chars().count(), MAX_FILENAME_CHARS);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(2 * 1024 * 1024), "2.0 MB");
    }
}
