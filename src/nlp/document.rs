//! Tokenised documents and the annotator seam that produces them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{error::DassResult, nlp::normalize::TextNormalizer};

/// Words a negator skips over when looking for the word it modifies.
const INTENSIFIERS: &[&str] = &[
    "really", "very", "so", "too", "quite", "at", "all", "even", "ever",
];

/// A token of the lowercased input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub index: usize,
    pub text: String,
    pub lemma: String,
    /// Byte offsets into the lowercased document text.
    pub start: usize,
    pub end: usize,
    /// Indices of syntactic dependents to the left of this token.
    pub lefts: Vec<usize>,
}

/// Lowercased input text plus its tokens.
#[derive(Debug, Clone, Default)]
pub struct Document {
    text: String,
    tokens: Vec<Token>,
}

impl Document {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Surface text of tokens `start..end`, including the whitespace between them.
    pub fn span_text(&self, start: usize, end: usize) -> &str {
        match (self.tokens.get(start), end.checked_sub(1).and_then(|i| self.tokens.get(i))) {
            (Some(first), Some(last)) if start < end => &self.text[first.start..last.end],
            _ => "",
        }
    }
}

/// Produces annotated documents. Swap in a statistical parser by implementing this.
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> DassResult<Document>;

    /// Token surface forms only; used when indexing keyword phrases.
    fn tokenize(&self, text: &str) -> Vec<String> {
        let folded = fold_text(text);
        split_tokens(&folded)
            .into_iter()
            .map(|(start, end)| folded[start..end].to_string())
            .collect()
    }
}

/// Tokeniser and dependency heuristics backed by [`TextNormalizer`].
#[derive(Debug, Default)]
pub struct RuleAnnotator {
    normalizer: TextNormalizer,
}

impl RuleAnnotator {
    pub fn new(normalizer: TextNormalizer) -> Self {
        Self { normalizer }
    }
}

impl Annotator for RuleAnnotator {
    fn annotate(&self, text: &str) -> DassResult<Document> {
        let text = fold_text(text);
        let mut tokens: Vec<Token> = split_tokens(&text)
            .into_iter()
            .enumerate()
            .map(|(index, (start, end))| {
                let surface = &text[start..end];
                Token {
                    index,
                    text: surface.to_string(),
                    lemma: self.normalizer.lemma(surface),
                    start,
                    end,
                    lefts: Vec::new(),
                }
            })
            .collect();
        attach_negators(&mut tokens);
        Ok(Document { text, tokens })
    }
}

/// Lowercase and fold typographic apostrophes.
fn fold_text(text: &str) -> String {
    text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}

fn split_tokens(text: &str) -> Vec<(usize, usize)> {
    static PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"[\p{L}\p{N}]+(?:'\p{L}+)?|'\p{L}+|\S").expect("valid token regex")
    });
    let mut spans = Vec::new();
    for m in PATTERN.find_iter(text) {
        let (start, end) = (m.start(), m.end());
        let word = m.as_str();
        if word.len() > 3 && word.ends_with("n't") {
            spans.push((start, end - 3));
            spans.push((end - 3, end));
        } else if let Some(pos) = word.find('\'').filter(|pos| *pos > 0) {
            spans.push((start, start + pos));
            spans.push((start + pos, end));
        } else {
            spans.push((start, end));
        }
    }
    spans
}

fn is_negator(text: &str) -> bool {
    super::negation::NEGATIONS.contains(&text)
}

fn is_clause_break(text: &str) -> bool {
    matches!(text, "." | "!" | "?" | ";" | ":" | ",")
}

/// Closed-class words that end a modifier run after `no`.
const FUNCTION_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "nor", "to", "of", "in", "on", "for", "with", "about",
    "from", "by", "as", "than", "that", "which", "who", "when", "because", "if", "i", "me", "my",
    "you", "he", "she", "it", "we", "they", "is", "am", "are", "was", "were", "be",
];

fn is_content_word(text: &str) -> bool {
    text.chars().all(char::is_alphabetic)
        && !FUNCTION_WORDS.contains(&text)
        && !INTENSIFIERS.contains(&text)
        && !is_negator(text)
}

/// Attach each negator to the next head word in its clause.
///
/// A determiner `no` governs the whole modifier run that follows it
/// ("no positive feelings"), so it is also attached to the last word of
/// that run.
fn attach_negators(tokens: &mut [Token]) {
    for i in 0..tokens.len() {
        if !is_negator(&tokens[i].text) {
            continue;
        }
        let head = tokens[i + 1..]
            .iter()
            .take_while(|t| !is_clause_break(&t.text))
            .find(|t| !INTENSIFIERS.contains(&t.text.as_str()) && !is_negator(&t.text))
            .map(|t| t.index);
        let Some(head) = head else {
            continue;
        };
        tokens[head].lefts.push(i);

        if tokens[i].text == "no" && is_content_word(&tokens[head].text) {
            let last = tokens[head + 1..]
                .iter()
                .take_while(|t| is_content_word(&t.text))
                .last()
                .map(|t| t.index);
            if let Some(last) = last {
                tokens[last].lefts.push(i);
            }
        }
    }
}
