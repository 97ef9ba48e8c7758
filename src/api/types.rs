//! Request and response bodies for the JSON API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{nlp::Analysis, scoring::SymptomCategory};

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Matched cues per category. Lists are sorted but carry set semantics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeResponse {
    pub matched_symptoms: BTreeMap<SymptomCategory, Vec<String>>,
    pub symptom_counts: BTreeMap<SymptomCategory, usize>,
}

impl From<Analysis> for AnalyzeResponse {
    fn from(value: Analysis) -> Self {
        AnalyzeResponse {
            matched_symptoms: value
                .matched_symptoms
                .into_iter()
                .map(|(category, set)| (category, set.into_iter().collect()))
                .collect(),
            symptom_counts: value.symptom_counts,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComputeRequest {
    #[serde(rename = "dAnswers")]
    pub d_answers: Vec<String>,
    #[serde(rename = "aAnswers")]
    pub a_answers: Vec<String>,
    #[serde(rename = "sAnswers")]
    pub s_answers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub model: crate::model::ModelState,
}
