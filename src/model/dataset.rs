//! Historical questionnaire exports used to fit the models.

use std::{io::Read, path::Path};

use csv::ReaderBuilder;
use tracing::{info, warn};

use crate::{
    error::{DassError, DassResult},
    scoring::{self, questions, AnswerSet, CategoryScore, SymptomCategory, ITEMS_PER_CATEGORY},
};

/// Depression scores above this are treated as an increase.
pub const CLINICAL_CUTOFF: u32 = 13;

/// Label assumed for an item the export has no column for.
const MISSING_ITEM: &str = "Never";

/// One scored respondent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRecord {
    pub depression: CategoryScore,
    pub anxiety: CategoryScore,
    pub stress: CategoryScore,
}

impl ScoredRecord {
    /// Features in model order: anxiety, stress, depression.
    pub fn features(&self) -> [f64; 3] {
        [
            self.anxiety.as_f64(),
            self.stress.as_f64(),
            self.depression.as_f64(),
        ]
    }

    pub fn exceeds_cutoff(&self) -> bool {
        self.depression.value() > CLINICAL_CUTOFF
    }

    pub fn excess(&self) -> f64 {
        self.depression.as_f64() - f64::from(CLINICAL_CUTOFF)
    }
}

pub fn load_csv(path: &Path) -> DassResult<Vec<ScoredRecord>> {
    let file = std::fs::File::open(path).map_err(|e| {
        DassError::TrainingFailure(format!("opening dataset {}: {e}", path.display()))
    })?;
    let records = read_records(file)?;
    info!(path = %path.display(), rows = records.len(), "loaded training dataset");
    Ok(records)
}

/// Score every row of a CSV export. Columns that are not item texts are ignored.
///
/// Some historical exports dropped an item (item 11 in the anxiety block);
/// an absent item contributes 0 to its subscale. A subscale with no item
/// columns at all is an error.
pub fn read_records<R: Read>(source: R) -> DassResult<Vec<ScoredRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);
    let headers = reader
        .headers()
        .map_err(|e| DassError::TrainingFailure(format!("reading header: {e}")))?
        .clone();

    let mut columns = Vec::with_capacity(questions::ITEMS.len());
    for item in questions::ITEMS.iter() {
        let column = headers.iter().position(|h| item.matches_header(h));
        if column.is_none() {
            warn!(
                item = item.number,
                category = %item.category,
                "dataset has no column for item; scoring it as Never"
            );
        }
        columns.push((item.category, column));
    }
    for category in SymptomCategory::ALL {
        if !columns.iter().any(|(c, idx)| *c == category && idx.is_some()) {
            return Err(DassError::TrainingFailure(format!(
                "dataset has no {category} item columns"
            )));
        }
    }

    let mut out = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| DassError::TrainingFailure(format!("row {}: {e}", row + 1)))?;
        let score = |category: SymptomCategory| -> DassResult<CategoryScore> {
            let labels: Vec<&str> = columns
                .iter()
                .filter(|(c, _)| *c == category)
                .map(|(_, idx)| match idx {
                    Some(idx) => record.get(*idx).unwrap_or_default(),
                    None => MISSING_ITEM,
                })
                .collect();
            debug_assert_eq!(labels.len(), ITEMS_PER_CATEGORY);
            AnswerSet::parse(category, &labels)
                .map(|set| scoring::compute_score(&set))
                .map_err(|e| DassError::TrainingFailure(format!("row {}: {e}", row + 1)))
        };
        out.push(ScoredRecord {
            depression: score(SymptomCategory::Depression)?,
            anxiety: score(SymptomCategory::Anxiety)?,
            stress: score(SymptomCategory::Stress)?,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_with(rows: &[[&str; 21]]) -> String {
        let mut out = String::from("Timestamp,Email Address");
        for item in questions::ITEMS.iter() {
            out.push_str(&format!(",\"{}\"", item.text));
        }
        out.push('\n');
        for row in rows {
            out.push_str("2024-01-01,someone@example.com");
            for label in row {
                out.push_str(&format!(",{label}"));
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn scores_rows_and_derives_targets() {
        let mut row = ["Never"; 21];
        row[..7].copy_from_slice(&["Very Often"; 7]);
        row[7] = "Often";
        let records = read_records(csv_with(&[row]).as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        let r = records[0];
        assert_eq!(r.depression.value(), 42);
        assert_eq!(r.anxiety.value(), 4);
        assert_eq!(r.stress.value(), 0);
        assert_eq!(r.features(), [4.0, 0.0, 42.0]);
        assert!(r.exceeds_cutoff());
        assert_eq!(r.excess(), 29.0);
    }

    #[test]
    fn missing_item_column_fails() {
        let err = read_records("Timestamp,Name\n1,a\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DassError::TrainingFailure(_)));
    }

    #[test]
    fn absent_item_scores_as_never() {
        let item_11 = &questions::ITEMS[10];
        let mut out = String::from("Timestamp");
        for item in questions::ITEMS.iter().filter(|i| i.number != 11) {
            out.push_str(&format!(",\"{}\"", item.text));
        }
        out.push_str("\n2024-01-01");
        for item in questions::ITEMS.iter().filter(|i| i.number != 11) {
            let label = if item.category == item_11.category { "Often" } else { "Never" };
            out.push_str(&format!(",{label}"));
        }
        out.push('\n');
        let records = read_records(out.as_bytes()).unwrap();
        assert_eq!(records[0].anxiety.value(), 24);
        assert_eq!(records[0].depression.value(), 0);
    }

    #[test]
    fn unknown_label_fails() {
        let mut row = ["Never"; 21];
        row[20] = "Always";
        let err = read_records(csv_with(&[row]).as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Always"));
    }
}
