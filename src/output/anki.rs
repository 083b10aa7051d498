//! Anki import file generation
//!
//! The deck is a tab-separated text file with Anki's file header directives.
//! Columns are front, back and tag.

use crate::annotate::title_question;
use crate::output::traits::{ArtifactFormat, ArtifactKind, CrawlSession, OutputResult};
use crate::text::truncate_chars;

/// Header directives understood by Anki's text importer
pub const ANKI_HEADER: &str = "#separator:tab\n#html:true\n#tags column:3\n";

/// Maximum length of a card back built from raw text
pub const MAX_CARD_BACK_CHARS: usize = 300;

/// Maximum length of a tag
pub const MAX_TAG_CHARS: usize = 30;

/// Key points shown on a title card
const TITLE_CARD_KEY_POINTS: usize = 3;

/// Makes text safe for a single tab-separated field
///
/// Tabs become spaces and line breaks become `<br>`.
pub fn sanitize_field(value: &str) -> String {
    value
        .replace('\t', " ")
        .replace("\r\n", "<br>")
        .replace(['\n', '\r'], "<br>")
}

/// Turns a title into an Anki tag
///
/// Tags are whitespace-delimited in Anki, so anything that is not a letter,
/// digit, `-` or `_` becomes `_`.
pub fn sanitize_tag(title: &str) -> String {
    let tag: String = title
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    truncate_chars(&tag, MAX_TAG_CHARS).to_string()
}

/// Formats one card line
pub fn format_card(front: &str, back: &str, tag: &str) -> String {
    format!("{}\t{}\t{}\n", sanitize_field(front), sanitize_field(back), tag)
}

/// Flashcard deck for the whole run
pub struct AnkiDeck;

impl ArtifactFormat for AnkiDeck {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Anki
    }

    fn render(&self, session: &CrawlSession) -> OutputResult<String> {
        let mut deck = String::from(ANKI_HEADER);

        for page in &session.pages {
            let tag = sanitize_tag(&page.title);

            let back = if page.key_points.is_empty() {
                truncate_chars(&page.content, MAX_CARD_BACK_CHARS).to_string()
            } else {
                page.key_points
                    .iter()
                    .take(TITLE_CARD_KEY_POINTS)
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join("<br>")
            };
            deck.push_str(&format_card(&title_question(&page.title), &back, &tag));

            for qa in &page.qa {
                deck.push_str(&format_card(
                    &qa.question,
                    truncate_chars(&qa.answer, MAX_CARD_BACK_CHARS),
                    &tag,
                ));
            }
        }

        Ok(deck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::QaPair;
    use crate::output::traits::{PageRecord, RunMetadata};

    fn session_with(page: PageRecord) -> CrawlSession {
        let mut session = CrawlSession::new(RunMetadata {
            name: "Docs".to_string(),
            site_url: "https://docs.example.com".to_string(),
            crawled_at: "2024-01-01 00:00:00".to_string(),
            page_count: 1,
            generate_qa: true,
        });
        session.record_success(page);
        session
    }

    fn page() -> PageRecord {
        PageRecord {
            index: 1,
            title: "Reactivity Basics".to_string(),
            url: "https://docs.example.com/reactivity".to_string(),
            content: "Line one\twith tab\nLine two".to_string(),
            key_points: vec![],
            qa: vec![],
        }
    }

    #[test]
    fn test_sanitize_field() {
        assert_eq!(sanitize_field("a\tb\nc\r\nd"), "a b<br>c<br>d");
    }

    #[test]
    fn test_sanitize_tag() {
        assert_eq!(sanitize_tag("Getting Started: Intro"), "Getting_Started__Intro");
        assert_eq!(sanitize_tag(&"x".repeat(50)).len(), MAX_TAG_CHARS);
        assert_eq!(sanitize_tag("组件 基础"), "组件_基础");
    }

    #[test]
    fn test_title_card_uses_content_without_key_points() {
        let deck = AnkiDeck.render(&session_with(page())).unwrap();
        assert!(deck.starts_with(ANKI_HEADER));

        let cards: Vec<_> = deck.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(
            cards,
            vec!["What is Reactivity Basics?\tLine one with tab<br>Line two\tReactivity_Basics"]
        );
    }

    #[test]
    fn test_title_card_joins_three_key_points() {
        let mut p = page();
        p.key_points = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
        let deck = AnkiDeck.render(&session_with(p)).unwrap();
        assert!(deck.contains("What is Reactivity Basics?\tA<br>B<br>C\tReactivity_Basics\n"));
        assert!(!deck.contains("<br>D"));
    }

    #[test]
    fn test_qa_cards_truncated() {
        let mut p = page();
        p.qa = vec![QaPair {
            question: "Why?".to_string(),
            answer: "z".repeat(400),
        }];
        let deck = AnkiDeck.render(&session_with(p)).unwrap();
        let qa_line = deck.lines().find(|l| l.starts_with("Why?")).unwrap();
        let fields: Vec<_> = qa_line.split('\t').collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[1].len(), MAX_CARD_BACK_CHARS);
    }
}
