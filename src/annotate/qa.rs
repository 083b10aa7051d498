//! Question/answer pair generation
//!
//! Sentences are scanned for a fixed, ordered keyword table. Each rule turns a
//! matching sentence into one question that quotes the page title and a short
//! preview of the sentence; the full sentence is the answer.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::{char_len, truncate_chars};

/// Upper bound on pairs per page, title pair included
pub const MAX_QA_PAIRS: usize = 5;

/// Sentences shorter than this are fragments and never used
pub const MIN_SENTENCE_CHARS: usize = 20;

/// Only this many leading sentences are scanned for keywords
pub const MAX_SCANNED_SENTENCES: usize = 5;

/// Chars of the sentence quoted inside a keyword question
pub const PREVIEW_CHARS: usize = 30;

/// Fallback answer length when no sentence qualifies
pub const FALLBACK_ANSWER_CHARS: usize = 200;

/// A derived question with its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

struct KeywordRule {
    pattern: Regex,
    question: fn(&str, &str) -> String,
}

impl KeywordRule {
    fn new(pattern: &str, question: fn(&str, &str) -> String) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("valid keyword regex"),
            question,
        }
    }
}

// Priority order: the first matching rule wins for a sentence.
static KEYWORD_RULES: Lazy<Vec<KeywordRule>> = Lazy::new(|| {
    vec![
        KeywordRule::new(r"(?i)\bhow\b|如何|怎麼|怎么", |title, preview| {
            format!("In {}, how does this work: \"{}...\"?", title, preview)
        }),
        KeywordRule::new(r"(?i)\bwhy\b|為什麼|为什么", |title, preview| {
            format!("In {}, why is it that \"{}...\"?", title, preview)
        }),
        KeywordRule::new(r"(?i)\bwhat is\b|什麼是|什么是", |title, preview| {
            format!("In {}, what is meant by \"{}...\"?", title, preview)
        }),
        KeywordRule::new(r"(?i)\bfeatures?\b|特點|特点|特性", |title, preview| {
            format!("Which feature of {} is described by \"{}...\"?", title, preview)
        }),
        KeywordRule::new(r"(?i)\badvantages?\b|優勢|优势|優點|优点", |title, preview| {
            format!("What advantage of {} is described by \"{}...\"?", title, preview)
        }),
        KeywordRule::new(r"(?i)\bsteps?\b|步驟|步骤", |title, preview| {
            format!("Which steps in {} does \"{}...\" describe?", title, preview)
        }),
        KeywordRule::new(r"(?i)\bmethods?\b|方法", |title, preview| {
            format!("Which method in {} does \"{}...\" describe?", title, preview)
        }),
    ]
});

static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?。！？\n]").expect("valid sentence regex"));

/// Question always asked first for every page
pub fn title_question(title: &str) -> String {
    format!("What is {}?", title)
}

/// Splits content into trimmed sentences of at least [`MIN_SENTENCE_CHARS`]
pub fn qualifying_sentences(content: &str) -> Vec<&str> {
    SENTENCE_BREAK
        .split(content)
        .map(str::trim)
        .filter(|s| char_len(s) >= MIN_SENTENCE_CHARS)
        .collect()
}

/// Derives up to [`MAX_QA_PAIRS`] pairs from a page
///
/// The output is a pure function of `(title, content)`: the title pair comes
/// first, followed by at most one keyword pair for each of the first
/// [`MAX_SCANNED_SENTENCES`] qualifying sentences.
pub fn generate_qa(title: &str, content: &str) -> Vec<QaPair> {
    let sentences = qualifying_sentences(content);

    let first_answer = match sentences.first() {
        Some(sentence) => sentence.to_string(),
        None => truncate_chars(content, FALLBACK_ANSWER_CHARS).to_string(),
    };

    let mut pairs = vec![QaPair {
        question: title_question(title),
        answer: first_answer,
    }];

    for sentence in sentences.iter().take(MAX_SCANNED_SENTENCES) {
        if let Some(rule) = KEYWORD_RULES.iter().find(|r| r.pattern.is_match(sentence)) {
            let preview = truncate_chars(sentence, PREVIEW_CHARS);
            pairs.push(QaPair {
                question: (rule.question)(title, preview),
                answer: sentence.to_string(),
            });
        }
    }

    pairs.truncate(MAX_QA_PAIRS);
    pairs
}
