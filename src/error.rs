//! Typed failures raised by the scoring, prediction and text pipelines.

use std::path::PathBuf;

use thiserror::Error;

use crate::scoring::SymptomCategory;

/// Errors surfaced by the library. The HTTP and CLI layers decide how much
/// of each variant is shown to the caller.
#[derive(Debug, Clone, Error)]
pub enum DassError {
    #[error("unrecognised answer label '{0}' (expected Never, Sometimes, Often or Very Often)")]
    InvalidAnswerLabel(String),

    #[error("{category} expects {expected} answers, got {found}")]
    InvalidAnswerCount {
        category: SymptomCategory,
        expected: usize,
        found: usize,
    },

    #[error("prediction models are not loaded")]
    ModelNotLoaded,

    #[error("failed to load model artifact {}: {reason}", path.display())]
    ModelLoadFailure { path: PathBuf, reason: String },

    #[error("model training failed: {0}")]
    TrainingFailure(String),

    #[error("model inference failed: {0}")]
    InferenceFailure(String),

    #[error("text analysis failed: {0}")]
    AnalysisFailure(String),

    #[error("invalid severity thresholds: {0}")]
    InvalidThresholds(String),
}

impl DassError {
    /// True for errors caused by the caller's input rather than server state.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAnswerLabel(_) | Self::InvalidAnswerCount { .. }
        )
    }
}

pub type DassResult<T> = Result<T, DassError>;
