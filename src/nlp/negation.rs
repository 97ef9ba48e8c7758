//! Local negation scope.
//!
//! A candidate is negated when a negator is one of its left dependents or
//! sits immediately before it. Nothing wider than that counts.

use super::document::Document;

/// Closed set of negator tokens.
pub const NEGATIONS: &[&str] = &["not", "no", "never", "n't"];

fn is_negator(text: &str) -> bool {
    NEGATIONS.contains(&text.to_lowercase().as_str())
}

/// Whether the token at `index` is under negation.
pub fn is_negated(doc: &Document, index: usize) -> bool {
    let tokens = doc.tokens();
    let Some(token) = tokens.get(index) else {
        return false;
    };
    let by_dependency = token
        .lefts
        .iter()
        .filter_map(|&i| tokens.get(i))
        .any(|dep| is_negator(&dep.text));
    let by_adjacency = index
        .checked_sub(1)
        .and_then(|prev| tokens.get(prev))
        .is_some_and(|prev| is_negator(&prev.text));
    by_dependency || by_adjacency
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::document::{Annotator, RuleAnnotator};

    fn doc(text: &str) -> Document {
        RuleAnnotator::default().annotate(text).unwrap()
    }

    #[test]
    fn adjacent_negator() {
        let d = doc("i am not nervous");
        assert!(is_negated(&d, 3));
        assert!(!is_negated(&d, 1));
    }

    #[test]
    fn dependent_negator_past_intensifier() {
        let d = doc("never really worried");
        assert!(is_negated(&d, 2));
    }

    #[test]
    fn contraction_negates_its_verb_only() {
        let d = doc("i don't feel hopeless");
        // i do n't feel hopeless
        assert!(is_negated(&d, 3));
        assert!(!is_negated(&d, 4));
    }

    #[test]
    fn out_of_range_is_not_negated() {
        let d = doc("fine");
        assert!(!is_negated(&d, 0));
        assert!(!is_negated(&d, 7));
    }
}
