//! Heuristic annotation of extracted page text
//!
//! This module derives study aids from plain text:
//! - Key points (headings, list items, short `label: value` lines)
//! - Question/answer pairs (title question plus keyword-driven questions)
//!
//! Both are deterministic, stateless functions of the page title and content.

mod key_points;
mod qa;

pub use key_points::{extract_key_points, MAX_KEY_POINTS};
pub use qa::{generate_qa, qualifying_sentences, title_question, QaPair, MAX_QA_PAIRS};

/// Annotations derived for a single page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    pub key_points: Vec<String>,
    pub qa: Vec<QaPair>,
}

/// Runs the enabled annotators over a page
///
/// # Arguments
///
/// * `title` - The page title
/// * `content` - The extracted plain text
/// * `key_points` - Whether to extract key points
/// * `qa` - Whether to generate question/answer pairs
pub fn annotate(title: &str, content: &str, key_points: bool, qa: bool) -> Annotations {
    Annotations {
        key_points: if key_points {
            extract_key_points(content)
        } else {
            Vec::new()
        },
        qa: if qa {
            generate_qa(title, content)
        } else {
            Vec::new()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = "Overview: short intro\n- Fast builds matter for how teams iterate daily";

    #[test]
    fn test_toggles_disable_annotators() {
        let none = annotate("Page", CONTENT, false, false);
        assert_eq!(none, Annotations::default());
    }

    #[test]
    fn test_toggles_enable_annotators() {
        let all = annotate("Page", CONTENT, true, true);
        assert_eq!(all.key_points.len(), 2);
        assert_eq!(all.qa[0].question, "What is Page?");
    }
}
