//! Free-text symptom cue extraction.
//!
//! The pipeline lowercases and tokenises the narrative, matches each token's
//! lemma or stem against the per-category keyword forms, matches multi-word
//! cues as exact phrases, and drops anything under local negation. Results
//! are sets: the order of matched strings carries no meaning.

pub mod document;
pub mod keywords;
pub mod negation;
pub mod normalize;
pub mod phrase;

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::debug;

use crate::{
    error::{DassError, DassResult},
    scoring::SymptomCategory,
};
use document::{Annotator, RuleAnnotator};
use keywords::KeywordIndex;
use normalize::TextNormalizer;

/// Matched cue strings per category.
pub type MatchedSymptoms = BTreeMap<SymptomCategory, BTreeSet<String>>;
/// Cardinality of each matched set.
pub type SymptomCounts = BTreeMap<SymptomCategory, usize>;

/// Result of analysing one narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub matched_symptoms: MatchedSymptoms,
    pub symptom_counts: SymptomCounts,
}

impl Analysis {
    fn from_matches(matched_symptoms: MatchedSymptoms) -> Self {
        let symptom_counts = matched_symptoms
            .iter()
            .map(|(category, set)| (*category, set.len()))
            .collect();
        Self {
            matched_symptoms,
            symptom_counts,
        }
    }

    pub fn matched(&self, category: SymptomCategory) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.matched_symptoms.get(&category).unwrap_or(&EMPTY)
    }

    pub fn count(&self, category: SymptomCategory) -> usize {
        self.symptom_counts.get(&category).copied().unwrap_or(0)
    }
}

/// Normaliser, annotator and keyword tables, built once and then read-only.
pub struct SymptomExtractor {
    annotator: Box<dyn Annotator>,
    normalizer: TextNormalizer,
    index: KeywordIndex,
}

static SHARED: Lazy<SymptomExtractor> = Lazy::new(SymptomExtractor::new);

impl Default for SymptomExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SymptomExtractor {
    /// Build with the rule annotator and the DASS-21 cue lists.
    pub fn new() -> Self {
        Self::with_annotator(Box::new(RuleAnnotator::new(TextNormalizer::new())))
    }

    pub fn with_annotator(annotator: Box<dyn Annotator>) -> Self {
        let normalizer = TextNormalizer::new();
        let index = KeywordIndex::build(annotator.as_ref(), &normalizer);
        Self {
            annotator,
            normalizer,
            index,
        }
    }

    /// Process-wide instance; the first caller builds it, everyone else waits.
    pub fn shared() -> &'static SymptomExtractor {
        &SHARED
    }

    pub fn index(&self) -> &KeywordIndex {
        &self.index
    }

    /// Extract matched cues from a narrative.
    pub fn analyze(&self, text: &str) -> DassResult<Analysis> {
        let doc = self.annotator.annotate(text)?;
        let stems: Vec<String> = doc
            .tokens()
            .iter()
            .map(|token| self.normalizer.stem(&token.lemma))
            .collect();

        let mut matched = MatchedSymptoms::new();
        for (category, index) in self.index.iter() {
            let found = matched.entry(category).or_default();

            for (token, stem) in doc.tokens().iter().zip(&stems) {
                if token.text == "not" || !index.contains_form(&token.lemma, stem) {
                    continue;
                }
                if !negation::is_negated(&doc, token.index) {
                    found.insert(token.text.clone());
                }
            }

            for hit in index.phrases().find(&doc) {
                if negation::is_negated(&doc, hit.start) {
                    continue;
                }
                let surface = doc.span_text(hit.start, hit.end);
                if surface.is_empty() {
                    return Err(DassError::AnalysisFailure(format!(
                        "phrase span {}..{} outside document",
                        hit.start, hit.end
                    )));
                }
                found.insert(surface.to_string());
            }
            debug!(%category, matched = found.len(), "category analysed");
        }
        Ok(Analysis::from_matches(matched))
    }
}

/// Analyse with the shared extractor.
pub fn analyze(text: &str) -> DassResult<Analysis> {
    SymptomExtractor::shared().analyze(text)
}
