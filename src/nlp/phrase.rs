//! Exact, case-insensitive multi-token phrase matching.

use super::document::Document;

/// A registered phrase and its token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    pub text: String,
    tokens: Vec<String>,
}

/// A phrase occurrence covering tokens `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseMatch {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PhraseMatcher {
    phrases: Vec<Phrase>,
}

impl PhraseMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a phrase by its (already lowercased) tokens. Empty phrases are ignored.
    pub fn add(&mut self, text: &str, tokens: Vec<String>) {
        if tokens.is_empty() {
            return;
        }
        let tokens = tokens.into_iter().map(|t| t.to_lowercase()).collect();
        self.phrases.push(Phrase {
            text: text.to_lowercase(),
            tokens,
        });
    }

    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Every occurrence of every phrase. Repeats and overlaps are all reported.
    pub fn find(&self, doc: &Document) -> Vec<PhraseMatch> {
        let tokens = doc.tokens();
        let mut matches = Vec::new();
        for phrase in &self.phrases {
            let width = phrase.tokens.len();
            if width > tokens.len() {
                continue;
            }
            for start in 0..=tokens.len() - width {
                let hit = tokens[start..start + width]
                    .iter()
                    .zip(&phrase.tokens)
                    .all(|(token, expected)| token.text.to_lowercase() == *expected);
                if hit {
                    matches.push(PhraseMatch {
                        start,
                        end: start + width,
                    });
                }
            }
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::document::{Annotator, RuleAnnotator};

    fn matcher(phrases: &[&str]) -> (RuleAnnotator, PhraseMatcher) {
        let annotator = RuleAnnotator::default();
        let mut matcher = PhraseMatcher::new();
        for phrase in phrases {
            matcher.add(phrase, annotator.tokenize(phrase));
        }
        (annotator, matcher)
    }

    #[test]
    fn finds_every_occurrence() {
        let (annotator, matcher) = matcher(&["worth nothing"]);
        let doc = annotator
            .annotate("I am WORTH NOTHING, worth nothing at all")
            .unwrap();
        let found = matcher.find(&doc);
        assert_eq!(found.len(), 2);
        assert_eq!(doc.span_text(found[0].start, found[0].end), "worth nothing");
    }

    #[test]
    fn no_partial_matches() {
        let (annotator, matcher) = matcher(&["positive feelings"]);
        let doc = annotator.annotate("positive feeling").unwrap();
        assert!(matcher.find(&doc).is_empty());
    }

    #[test]
    fn contraction_phrase() {
        let (annotator, matcher) = matcher(&["couldn't"]);
        let doc = annotator.annotate("I couldn't cope").unwrap();
        let found = matcher.find(&doc);
        assert_eq!(found.len(), 1);
        assert_eq!(doc.span_text(found[0].start, found[0].end), "couldn't");
    }
}
