use std::collections::BTreeSet;

use dass_screen::{
    nlp::{analyze, SymptomExtractor},
    scoring::SymptomCategory,
};

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn negated_nervous_is_not_a_stress_cue() {
    let analysis = analyze("I am not nervous about small things").unwrap();
    assert!(!analysis.matched(SymptomCategory::Stress).contains("nervous"));
    assert_eq!(analysis.count(SymptomCategory::Stress), 0);
}

#[test]
fn hopeless_and_worthless_are_two_depression_cues() {
    let analysis = analyze("Lately everything seems hopeless and I am worthless.").unwrap();
    assert_eq!(analysis.count(SymptomCategory::Depression), 2);
    assert_eq!(
        analysis.matched(SymptomCategory::Depression),
        &set(&["hopeless", "worthless"])
    );
}

#[test]
fn mixed_narrative_splits_by_category() {
    let text = "I get nervous thinking about the future and I am frustrated at work. \
                I am not nervous about small things. My hands keep trembling.";
    let analysis = analyze(text).unwrap();
    // The first "nervous" is not negated, so it is still reported once.
    assert_eq!(
        analysis.matched(SymptomCategory::Stress),
        &set(&["nervous", "frustrated"])
    );
    assert_eq!(
        analysis.matched(SymptomCategory::Anxiety),
        &set(&["trembling"])
    );
}

#[test]
fn repeated_analysis_is_set_equal() {
    let text = "Panicking again, scared and worried, I couldn't breathe.";
    let first = analyze(text).unwrap();
    let second = analyze(text).unwrap();
    for category in SymptomCategory::ALL {
        assert_eq!(first.matched(category), second.matched(category));
    }
}

#[test]
fn contraction_phrase_is_reported_whole() {
    let analysis = analyze("I couldn't get out of bed").unwrap();
    assert!(analysis
        .matched(SymptomCategory::Depression)
        .contains("couldn't"));
}

#[test]
fn negation_does_not_reach_past_the_next_word() {
    let analysis = analyze("no sleep and hopeless").unwrap();
    assert!(analysis
        .matched(SymptomCategory::Depression)
        .contains("hopeless"));
}

#[test]
fn fresh_extractor_matches_shared_one() {
    let text = "worth nothing, meaningless days";
    let local = SymptomExtractor::new().analyze(text).unwrap();
    assert_eq!(local, analyze(text).unwrap());
    assert!(local
        .matched(SymptomCategory::Depression)
        .contains("worth nothing"));
}

#[test]
fn no_before_adjective_noun_run_negates_the_noun() {
    let analysis = analyze("I have no positive feelings").unwrap();
    assert!(analysis.matched(SymptomCategory::Depression).is_empty());
    assert_eq!(analysis.count(SymptomCategory::Depression), 0);
}
