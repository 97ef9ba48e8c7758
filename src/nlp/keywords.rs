//! Per-category cue lists and the normalised index built from them.

use std::collections::{BTreeMap, HashSet};

use tracing::info;

use super::{document::Annotator, normalize::TextNormalizer, phrase::PhraseMatcher};
use crate::scoring::SymptomCategory;

/// Raw cue phrases for each subscale.
pub fn keywords(category: SymptomCategory) -> &'static [&'static str] {
    match category {
        SymptomCategory::Depression => &[
            "downhearted",
            "blue",
            "positive feelings",
            "meaningless",
            "disheartened",
            "not worth",
            "worth nothing",
            "worthless",
            "unable",
            "nothing",
            "couldn't",
            "hopeless",
        ],
        SymptomCategory::Anxiety => &[
            "trembling",
            "scared",
            "scary",
            "panic",
            "panicked",
            "panicking",
            "absence",
            "worried",
            "dryness",
            "drying",
            "breathe",
            "breathing",
        ],
        SymptomCategory::Stress => &[
            "hard",
            "agitated",
            "agitating",
            "agitatedly",
            "difficult",
            "nervous",
            "nervously",
            "nervousness",
            "overreact",
            "overreacting",
            "overreacted",
            "frustrating",
            "frustrated",
        ],
    }
}

/// Normalised single-token forms plus the phrase matcher for one category.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    forms: HashSet<String>,
    phrases: PhraseMatcher,
}

impl CategoryIndex {
    /// True when either the lemma or the stem is a keyword form.
    pub fn contains_form(&self, lemma: &str, stem: &str) -> bool {
        self.forms.contains(lemma) || self.forms.contains(stem)
    }

    pub fn forms(&self) -> &HashSet<String> {
        &self.forms
    }

    pub fn phrases(&self) -> &PhraseMatcher {
        &self.phrases
    }
}

/// Keyword tables for every category, built once.
#[derive(Debug, Clone, Default)]
pub struct KeywordIndex {
    categories: BTreeMap<SymptomCategory, CategoryIndex>,
}

impl KeywordIndex {
    /// Index the built-in DASS-21 cue lists.
    pub fn build(annotator: &dyn Annotator, normalizer: &TextNormalizer) -> Self {
        Self::from_entries(
            annotator,
            normalizer,
            SymptomCategory::ALL.map(|c| (c, keywords(c))),
        )
    }

    pub fn from_entries<'a>(
        annotator: &dyn Annotator,
        normalizer: &TextNormalizer,
        entries: impl IntoIterator<Item = (SymptomCategory, &'a [&'a str])>,
    ) -> Self {
        let mut categories = BTreeMap::new();
        for (category, cues) in entries {
            let index: &mut CategoryIndex = categories.entry(category).or_default();
            for cue in cues {
                let tokens = annotator.tokenize(cue);
                for token in &tokens {
                    let forms = normalizer.forms(token);
                    index.forms.insert(forms.lemma);
                    index.forms.insert(forms.stem);
                }
                if tokens.len() > 1 {
                    index.phrases.add(cue, tokens);
                }
            }
            info!(
                %category,
                forms = index.forms.len(),
                phrases = index.phrases.len(),
                "indexed keyword category"
            );
        }
        Self { categories }
    }

    pub fn category(&self, category: SymptomCategory) -> Option<&CategoryIndex> {
        self.categories.get(&category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymptomCategory, &CategoryIndex)> {
        self.categories.iter().map(|(c, idx)| (*c, idx))
    }
}
