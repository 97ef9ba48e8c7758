//! Token normalisation: rule-based lemmas plus Snowball stems.
//!
//! Keyword preprocessing and document analysis both go through the same
//! [`TextNormalizer`], so the two sides always agree on a word's forms.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use rust_stemmers::{Algorithm, Stemmer};

/// Lemma and stem for one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forms {
    pub lemma: String,
    pub stem: String,
}

/// Irregular forms the suffix rules would get wrong.
static IRREGULAR: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("am", "be"),
        ("is", "be"),
        ("are", "be"),
        ("was", "be"),
        ("were", "be"),
        ("been", "be"),
        ("being", "be"),
        ("'m", "be"),
        ("'re", "be"),
        ("n't", "not"),
        ("ca", "can"),
        ("wo", "will"),
        ("'ll", "will"),
        ("'ve", "have"),
        ("'d", "would"),
        ("has", "have"),
        ("had", "have"),
        ("having", "have"),
        ("does", "do"),
        ("did", "do"),
        ("done", "do"),
        ("doing", "do"),
        ("felt", "feel"),
        ("went", "go"),
        ("gone", "go"),
        ("made", "make"),
        ("said", "say"),
        ("thought", "think"),
        ("got", "get"),
        ("kept", "keep"),
        ("slept", "sleep"),
        ("lost", "lose"),
        ("left", "leave"),
        ("began", "begin"),
        ("worse", "bad"),
        ("worst", "bad"),
        ("better", "good"),
        ("best", "good"),
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("feet", "foot"),
        ("teeth", "tooth"),
    ]
    .into_iter()
    .collect()
});

/// Words that merely look inflected.
const INVARIANT: &[&str] = &[
    "this", "his", "its", "us", "thus", "yes", "news", "always", "perhaps", "nothing",
    "something", "anything", "everything", "during", "morning", "evening", "ceiling",
];

/// Lemmatiser and stemmer shared by keyword indexing and document analysis.
pub struct TextNormalizer {
    stemmer: Stemmer,
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer").finish_non_exhaustive()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Lemma and the stem of that lemma.
    pub fn forms(&self, token: &str) -> Forms {
        let lemma = self.lemma(token);
        let stem = self.stem(&lemma);
        Forms { lemma, stem }
    }

    pub fn stem(&self, word: &str) -> String {
        self.stemmer.stem(word).into_owned()
    }

    /// Dictionary-ish base form of a lowercased token.
    pub fn lemma(&self, token: &str) -> String {
        let word = token.to_lowercase();
        if let Some(base) = IRREGULAR.get(word.as_str()) {
            return (*base).to_string();
        }
        if word.len() <= 3
            || INVARIANT.contains(&word.as_str())
            || !word.chars().all(|c| c.is_ascii_alphabetic())
        {
            return word;
        }
        strip_inflection(&word)
    }
}

fn strip_inflection(word: &str) -> String {
    if word.len() > 4 && (word.ends_with("ies") || word.ends_with("ied")) {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if word.ends_with("sses") {
        return word[..word.len() - 2].to_string();
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    if word.ends_with('s') {
        return word[..word.len() - 1].to_string();
    }
    if word.ends_with("eed") {
        return word.to_string();
    }
    for suffix in ["ing", "ed"] {
        if let Some(base) = word.strip_suffix(suffix) {
            if base.len() >= 2 && has_vowel(base) {
                return restore_base(base);
            }
        }
    }
    word.to_string()
}

/// Undo spelling changes made when the suffix was attached.
fn restore_base(base: &str) -> String {
    let bytes = base.as_bytes();
    let n = bytes.len();
    if base.ends_with("ick") && n >= 6 {
        // panicked -> panick -> panic
        return base[..n - 1].to_string();
    }
    if base.ends_with("at") || base.ends_with("bl") || base.ends_with("iz") {
        return format!("{base}e");
    }
    if n >= 2 && bytes[n - 1] == bytes[n - 2] && is_consonant(bytes, n - 1) {
        if !matches!(bytes[n - 1], b'l' | b's' | b'z') {
            return base[..n - 1].to_string();
        }
        return base.to_string();
    }
    if measure(bytes) == 1 && ends_cvc(bytes) {
        return format!("{base}e");
    }
    base.to_string()
}

fn is_consonant(word: &[u8], i: usize) -> bool {
    match word[i] {
        b'a' | b'e' | b'i' | b'o' | b'u' => false,
        b'y' => i == 0 || !is_consonant(word, i - 1),
        _ => true,
    }
}

fn has_vowel(word: &str) -> bool {
    let bytes = word.as_bytes();
    (0..bytes.len()).any(|i| !is_consonant(bytes, i))
}

/// Number of vowel-consonant sequences, as in Porter's `m`.
fn measure(word: &[u8]) -> usize {
    let mut m = 0;
    let mut prev_vowel = false;
    for i in 0..word.len() {
        let vowel = !is_consonant(word, i);
        if prev_vowel && !vowel {
            m += 1;
        }
        prev_vowel = vowel;
    }
    m
}

fn ends_cvc(word: &[u8]) -> bool {
    let n = word.len();
    n >= 3
        && is_consonant(word, n - 3)
        && !is_consonant(word, n - 2)
        && is_consonant(word, n - 1)
        && !matches!(word[n - 1], b'w' | b'x' | b'y')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(word: &str) -> String {
        TextNormalizer::new().lemma(word)
    }

    #[test]
    fn verb_inflections() {
        assert_eq!(lemma("panicking"), "panic");
        assert_eq!(lemma("panicked"), "panic");
        assert_eq!(lemma("agitated"), "agitate");
        assert_eq!(lemma("trembling"), "tremble");
        assert_eq!(lemma("worried"), "worry");
        assert_eq!(lemma("drying"), "dry");
        assert_eq!(lemma("scared"), "scare");
        assert_eq!(lemma("stopping"), "stop");
        assert_eq!(lemma("feeling"), "feel");
    }

    #[test]
    fn plurals_and_invariants() {
        assert_eq!(lemma("things"), "thing");
        assert_eq!(lemma("worries"), "worry");
        assert_eq!(lemma("nervous"), "nervous");
        assert_eq!(lemma("hopeless"), "hopeless");
        assert_eq!(lemma("nothing"), "nothing");
        assert_eq!(lemma("thing"), "thing");
    }

    #[test]
    fn irregulars_and_contractions() {
        assert_eq!(lemma("am"), "be");
        assert_eq!(lemma("n't"), "not");
        assert_eq!(lemma("felt"), "feel");
    }

    #[test]
    fn forms_share_stemmer() {
        let normalizer = TextNormalizer::new();
        let forms = normalizer.forms("nervously");
        assert_eq!(forms.lemma, "nervously");
        assert_eq!(forms.stem, normalizer.stem("nervously"));
    }
}
