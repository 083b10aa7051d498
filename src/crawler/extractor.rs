//! Main content extraction
//!
//! Finds the content region of a rendered page through an ordered list of
//! selectors, strips navigation chrome from a detached copy of it, and reads
//! the remaining text the way a browser's `innerText` would lay it out.

use crate::config::{parse_selector, CrawlConfig};
use crate::ConfigError;
use scraper::{ElementRef, Html, Node, Selector};

/// Elements removed from the matched region before reading its text
pub const STRIP_SELECTOR: &str = "script, style, nav, .sidebar, .toc";

/// Elements that start and end a line of text
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "details", "div", "dl", "dt",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "ol", "p", "pre", "section", "summary", "table", "tr", "ul",
];

/// Elements whose contents are never rendered as text
const HIDDEN_ELEMENTS: &[&str] = &["noscript", "template"];

/// Elements separated from their neighbours by a blank line
const PARAGRAPH_ELEMENTS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "p"];

/// Selectors compiled once per run
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    selectors: Vec<Selector>,
    strip: Selector,
}

impl ContentExtractor {
    /// Compiles the primary and fallback content selectors
    pub fn new(config: &CrawlConfig) -> Result<Self, ConfigError> {
        let mut selectors = vec![parse_selector(&config.content_selector)?];
        for fallback in &config.fallback_selectors {
            selectors.push(parse_selector(fallback)?);
        }

        Ok(Self {
            selectors,
            strip: parse_selector(STRIP_SELECTOR)?,
        })
    }

    /// Extracts the trimmed plain text of the content region
    ///
    /// The primary selector is tried first, then each fallback in order; the
    /// first selector with a match wins. No match yields an empty string.
    pub fn extract(&self, document: &Html) -> String {
        let region = self
            .selectors
            .iter()
            .find_map(|selector| document.select(selector).next());

        match region {
            Some(element) => self.clean_text(&element),
            None => String::new(),
        }
    }

    /// Reads the text of a detached copy of `element` with chrome removed
    fn clean_text(&self, element: &ElementRef<'_>) -> String {
        let mut copy = Html::parse_fragment(&element.html());

        // The region itself stays even when it matches the strip selector
        let wrapper = copy.root_element();
        let doomed: Vec<_> = match wrapper.children().find_map(ElementRef::wrap) {
            Some(region) => region
                .select(&self.strip)
                .map(|el| el.id())
                .filter(|id| *id != region.id())
                .collect(),
            None => Vec::new(),
        };
        for id in doomed {
            if let Some(mut node) = copy.tree.get_mut(id) {
                node.detach();
            }
        }

        let mut raw = String::new();
        collect_text(copy.root_element(), false, &mut raw);
        normalize_lines(&raw)
    }
}

/// Walks an element, appending text with line breaks around block elements
fn collect_text(element: ElementRef<'_>, in_pre: bool, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                if in_pre {
                    out.push_str(text);
                } else {
                    push_collapsed(text, out);
                }
            }
            Node::Element(el) => {
                let name = el.name();
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                if HIDDEN_ELEMENTS.contains(&name) {
                    continue;
                }
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };

                let breaks = if PARAGRAPH_ELEMENTS.contains(&name) {
                    2
                } else if BLOCK_ELEMENTS.contains(&name) {
                    1
                } else {
                    0
                };

                break_line(out, breaks);
                collect_text(child_el, in_pre || name == "pre", out);
                if name == "td" || name == "th" {
                    out.push('\t');
                }
                break_line(out, breaks);
            }
            _ => {}
        }
    }
}

/// Ensures `out` ends with at least `count` newlines
fn break_line(out: &mut String, count: usize) {
    if out.is_empty() {
        return;
    }
    let existing = out.chars().rev().take_while(|c| *c == '\n').count();
    for _ in existing..count {
        out.push('\n');
    }
}

fn push_space(out: &mut String) {
    if !out.is_empty() && !out.ends_with([' ', '\n', '\t']) {
        out.push(' ');
    }
}

/// Appends `text` with whitespace runs collapsed to single spaces
fn push_collapsed(text: &str, out: &mut String) {
    if text.starts_with(char::is_whitespace) {
        push_space(out);
    }

    let mut wrote = false;
    for word in text.split_whitespace() {
        if wrote {
            out.push(' ');
        }
        out.push_str(word);
        wrote = true;
    }

    if wrote && text.ends_with(char::is_whitespace) {
        push_space(out);
    }
}

/// Strips trailing whitespace from lines and collapses blank line runs
fn normalize_lines(raw: &str) -> String {
    let mut result = String::new();
    let mut blank_run = 0;

    for line in raw.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            blank_run += 1;
            continue;
        }
        if !result.is_empty() {
            result.push('\n');
            if blank_run > 0 {
                result.push('\n');
            }
        }
        result.push_str(line);
        blank_run = 0;
    }

    result.trim().to_string()
}
