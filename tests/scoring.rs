use dass_screen::{
    scoring::{
        classify, compute_score, score_labels, AnswerLabel, AnswerSet, CategoryScore,
        SeverityLevel, SeverityThresholds, SymptomCategory, MAX_CATEGORY_SCORE,
    },
    DassError,
};
use proptest::prelude::*;

fn label() -> impl Strategy<Value = AnswerLabel> {
    prop::sample::select(AnswerLabel::ALL.to_vec())
}

proptest! {
    #[test]
    fn score_is_twice_the_raw_sum(answers in prop::array::uniform7(label())) {
        let set = AnswerSet::new(SymptomCategory::Depression, answers);
        let score = compute_score(&set);
        let raw: u32 = answers.iter().map(|a| a.value()).sum();
        prop_assert_eq!(score.value(), 2 * raw);
        prop_assert!(score.value() <= MAX_CATEGORY_SCORE);
    }

    #[test]
    fn severity_is_monotonic(a in 0u32..=42, b in 0u32..=42) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        for category in SymptomCategory::ALL {
            let thresholds = SeverityThresholds::for_category(category);
            let lo_level = classify(CategoryScore::new(lo).unwrap(), &thresholds);
            let hi_level = classify(CategoryScore::new(hi).unwrap(), &thresholds);
            prop_assert!(lo_level <= hi_level);
        }
    }

    #[test]
    fn unknown_labels_are_rejected(bad in "[A-Za-z ]{1,12}") {
        prop_assume!(AnswerLabel::ALL.iter().all(|l| l.as_str() != bad));
        let mut raw = vec!["Never".to_string(); 7];
        raw[3] = bad.clone();
        let err = score_labels(SymptomCategory::Anxiety, &raw).unwrap_err();
        prop_assert!(matches!(err, DassError::InvalidAnswerLabel(ref l) if *l == bad));
    }
}

#[test]
fn zero_is_normal() {
    let thresholds = SeverityThresholds::for_category(SymptomCategory::Depression);
    assert_eq!(
        classify(CategoryScore::new(0).unwrap(), &thresholds),
        SeverityLevel::Normal
    );
    let score = score_labels(SymptomCategory::Depression, &["Never"; 7]).unwrap();
    assert_eq!(score.value(), 0);
}

#[test]
fn raw_fourteen_is_extremely_severe_depression() {
    let raw = [
        "Very Often",
        "Very Often",
        "Very Often",
        "Very Often",
        "Sometimes",
        "Sometimes",
        "Never",
    ];
    let score = score_labels(SymptomCategory::Depression, &raw).unwrap();
    assert_eq!(score.value(), 28);
    let thresholds = SeverityThresholds::for_category(SymptomCategory::Depression);
    assert_eq!(classify(score, &thresholds), SeverityLevel::ExtremelySevere);
}
