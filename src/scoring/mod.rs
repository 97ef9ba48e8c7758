//! DASS-21 questionnaire scoring: answer labels, category scores and severity bands.

pub mod questions;
pub mod severity;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{DassError, DassResult};

pub use severity::{classify, SeverityLevel, SeverityThresholds};

/// Number of items answered per subscale.
pub const ITEMS_PER_CATEGORY: usize = 7;
/// DASS-21 sums are doubled to line up with the 42-item DASS norms.
pub const GROUP_WEIGHT: u32 = 2;
/// Highest possible category score.
pub const MAX_CATEGORY_SCORE: u32 = 3 * ITEMS_PER_CATEGORY as u32 * GROUP_WEIGHT;

/// The three DASS-21 subscales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SymptomCategory {
    Depression,
    Anxiety,
    Stress,
}

impl SymptomCategory {
    pub const ALL: [SymptomCategory; 3] = [Self::Depression, Self::Anxiety, Self::Stress];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Depression => "Depression",
            Self::Anxiety => "Anxiety",
            Self::Stress => "Stress",
        }
    }
}

impl fmt::Display for SymptomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Likert response to a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnswerLabel {
    Never,
    Sometimes,
    Often,
    #[serde(rename = "Very Often")]
    VeryOften,
}

impl AnswerLabel {
    pub const ALL: [AnswerLabel; 4] = [Self::Never, Self::Sometimes, Self::Often, Self::VeryOften];

    /// Numeric value on the 0..=3 scale.
    pub fn value(self) -> u32 {
        match self {
            Self::Never => 0,
            Self::Sometimes => 1,
            Self::Often => 2,
            Self::VeryOften => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Never => "Never",
            Self::Sometimes => "Sometimes",
            Self::Often => "Often",
            Self::VeryOften => "Very Often",
        }
    }
}

impl fmt::Display for AnswerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerLabel {
    type Err = DassError;

    /// Labels must match exactly; near misses are rejected rather than coerced.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| DassError::InvalidAnswerLabel(s.to_string()))
    }
}

/// Seven validated answers for one subscale, in questionnaire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    category: SymptomCategory,
    answers: [AnswerLabel; ITEMS_PER_CATEGORY],
}

impl AnswerSet {
    pub fn new(category: SymptomCategory, answers: [AnswerLabel; ITEMS_PER_CATEGORY]) -> Self {
        Self { category, answers }
    }

    /// Parse raw labels. Any unrecognised label aborts the whole set.
    pub fn parse<S: AsRef<str>>(category: SymptomCategory, raw: &[S]) -> DassResult<Self> {
        let labels = raw
            .iter()
            .map(|label| label.as_ref().parse::<AnswerLabel>())
            .collect::<DassResult<Vec<_>>>()?;
        let found = labels.len();
        let answers: [AnswerLabel; ITEMS_PER_CATEGORY] =
            labels
                .try_into()
                .map_err(|_| DassError::InvalidAnswerCount {
                    category,
                    expected: ITEMS_PER_CATEGORY,
                    found,
                })?;
        Ok(Self { category, answers })
    }

    pub fn category(&self) -> SymptomCategory {
        self.category
    }

    pub fn answers(&self) -> &[AnswerLabel] {
        &self.answers
    }
}

/// Weighted subscale score in `0..=42`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryScore(u32);

impl CategoryScore {
    /// Wrap an already weighted score, rejecting values outside the scale.
    pub fn new(value: u32) -> Option<Self> {
        (value <= MAX_CATEGORY_SCORE).then_some(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl fmt::Display for CategoryScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sum the numeric answers and apply the group weight.
pub fn compute_score(answers: &AnswerSet) -> CategoryScore {
    let raw: u32 = answers.answers.iter().map(|a| a.value()).sum();
    CategoryScore(raw * GROUP_WEIGHT)
}

/// Parse and score raw labels in one step.
pub fn score_labels<S: AsRef<str>>(
    category: SymptomCategory,
    raw: &[S],
) -> DassResult<CategoryScore> {
    AnswerSet::parse(category, raw).map(|set| compute_score(&set))
}

/// Score plus severity band for one subscale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryAssessment {
    pub category: SymptomCategory,
    pub score: CategoryScore,
    pub severity: SeverityLevel,
}

/// Score an answer set and classify it against its category's thresholds.
pub fn assess(answers: &AnswerSet) -> CategoryAssessment {
    let score = compute_score(answers);
    CategoryAssessment {
        category: answers.category(),
        score,
        severity: severity::classify_category(answers.category(), score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: [&str; 7]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn all_never_scores_zero() {
        let score = score_labels(SymptomCategory::Depression, &["Never"; 7]).unwrap();
        assert_eq!(score.value(), 0);
    }

    #[test]
    fn all_very_often_scores_maximum() {
        let score = score_labels(SymptomCategory::Stress, &["Very Often"; 7]).unwrap();
        assert_eq!(score.value(), MAX_CATEGORY_SCORE);
        assert_eq!(MAX_CATEGORY_SCORE, 42);
    }

    #[test]
    fn mixed_answers_are_doubled() {
        let raw = labels([
            "Never",
            "Sometimes",
            "Often",
            "Very Often",
            "Often",
            "Sometimes",
            "Never",
        ]);
        let score = score_labels(SymptomCategory::Anxiety, &raw).unwrap();
        assert_eq!(score.value(), 2 * 9);
    }

    #[test]
    fn label_matching_is_exact() {
        assert!("very often".parse::<AnswerLabel>().is_err());
        assert!(" Never".parse::<AnswerLabel>().is_err());
        assert_eq!("Very Often".parse::<AnswerLabel>().unwrap(), AnswerLabel::VeryOften);
    }

    #[test]
    fn bad_label_wins_over_bad_length() {
        let err = AnswerSet::parse(SymptomCategory::Depression, &["Always"]).unwrap_err();
        assert!(matches!(err, DassError::InvalidAnswerLabel(ref l) if l == "Always"));
    }

    #[test]
    fn wrong_length_is_rejected() {
        let err = AnswerSet::parse(SymptomCategory::Stress, &["Never"; 6]).unwrap_err();
        assert!(matches!(
            err,
            DassError::InvalidAnswerCount {
                expected: 7,
                found: 6,
                ..
            }
        ));
    }

    #[test]
    fn category_score_rejects_out_of_range() {
        assert!(CategoryScore::new(43).is_none());
        assert_eq!(CategoryScore::new(28).map(CategoryScore::value), Some(28));
    }
}
