//! Threshold-based severity bands.

use std::fmt;

use serde::{Serialize, Serializer};

use super::{CategoryScore, SymptomCategory};
use crate::error::{DassError, DassResult};

/// Clinical severity bands, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeverityLevel {
    Normal,
    Mild,
    Moderate,
    Severe,
    ExtremelySevere,
}

impl SeverityLevel {
    pub const ALL: [SeverityLevel; 5] = [
        Self::Normal,
        Self::Mild,
        Self::Moderate,
        Self::Severe,
        Self::ExtremelySevere,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
            Self::ExtremelySevere => "Extremely Severe",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SeverityLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Inclusive upper bounds for Normal, Mild, Moderate and Severe.
/// Anything above the last bound is Extremely Severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityThresholds {
    bounds: [u32; 4],
}

impl SeverityThresholds {
    /// Validate a boundary sequence; bounds must be strictly ascending.
    pub fn new(bounds: [u32; 4]) -> DassResult<Self> {
        if let Some(pair) = bounds.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(DassError::InvalidThresholds(format!(
                "bounds {bounds:?} are not strictly ascending ({} then {})",
                pair[0], pair[1]
            )));
        }
        Ok(Self { bounds })
    }

    pub fn bounds(&self) -> [u32; 4] {
        self.bounds
    }

    /// Published DASS-21 cut-offs for a subscale.
    pub const fn for_category(category: SymptomCategory) -> Self {
        let bounds = match category {
            SymptomCategory::Depression => [9, 13, 20, 27],
            SymptomCategory::Anxiety => [7, 9, 14, 19],
            SymptomCategory::Stress => [14, 18, 25, 33],
        };
        Self { bounds }
    }
}

/// Re-check the built-in cut-off tables. Called once at startup.
pub fn validate_builtin() -> DassResult<()> {
    for category in SymptomCategory::ALL {
        SeverityThresholds::new(SeverityThresholds::for_category(category).bounds)?;
    }
    Ok(())
}

/// Walk the bounds in order and return the first band whose bound is >= score.
pub fn classify(score: CategoryScore, thresholds: &SeverityThresholds) -> SeverityLevel {
    thresholds
        .bounds
        .iter()
        .zip(SeverityLevel::ALL)
        .find(|(bound, _)| score.value() <= **bound)
        .map(|(_, level)| level)
        .unwrap_or(SeverityLevel::ExtremelySevere)
}

pub fn classify_category(category: SymptomCategory, score: CategoryScore) -> SeverityLevel {
    classify(score, &SeverityThresholds::for_category(category))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(v: u32) -> CategoryScore {
        CategoryScore::new(v).unwrap()
    }

    #[test]
    fn builtin_tables_are_valid() {
        validate_builtin().unwrap();
    }

    #[test]
    fn bounds_are_inclusive() {
        let t = SeverityThresholds::for_category(SymptomCategory::Depression);
        assert_eq!(classify(score(9), &t), SeverityLevel::Normal);
        assert_eq!(classify(score(10), &t), SeverityLevel::Mild);
        assert_eq!(classify(score(13), &t), SeverityLevel::Mild);
        assert_eq!(classify(score(20), &t), SeverityLevel::Moderate);
        assert_eq!(classify(score(27), &t), SeverityLevel::Severe);
        assert_eq!(classify(score(28), &t), SeverityLevel::ExtremelySevere);
    }

    #[test]
    fn anxiety_and_stress_bands() {
        use SymptomCategory::*;
        assert_eq!(classify_category(Anxiety, score(8)), SeverityLevel::Mild);
        assert_eq!(classify_category(Anxiety, score(20)), SeverityLevel::ExtremelySevere);
        assert_eq!(classify_category(Stress, score(16)), SeverityLevel::Mild);
        assert_eq!(classify_category(Stress, score(14)), SeverityLevel::Normal);
        assert_eq!(classify_category(Stress, score(34)), SeverityLevel::ExtremelySevere);
    }

    #[test]
    fn rejects_unordered_bounds() {
        assert!(SeverityThresholds::new([9, 9, 20, 27]).is_err());
        assert!(SeverityThresholds::new([9, 13, 12, 27]).is_err());
    }

    #[test]
    fn extremely_severe_serializes_with_space() {
        let json = serde_json::to_string(&SeverityLevel::ExtremelySevere).unwrap();
        assert_eq!(json, "\"Extremely Severe\"");
    }
}
