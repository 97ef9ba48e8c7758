//! Depression-increase prediction from the three DASS-21 subscale scores.
//!
//! [`PredictiveModel`] owns the classifier/regressor pair for the life of
//! the process. Loading moves through `Unloaded -> Loading -> Ready | Failed`
//! exactly once; when the artifacts are missing the training path runs
//! inside `Loading`. The load guard and the reported state are separate
//! locks, so the state can be read while a load is in progress. After
//! `Ready` the artifacts are read without locking.

pub mod artifacts;
pub mod dataset;
pub mod train;

use std::{
    path::PathBuf,
    sync::{Mutex, PoisonError},
};

use once_cell::sync::OnceCell;
use serde::{ser::SerializeStruct, Serialize, Serializer};
use tracing::{info, warn};

use crate::{
    config::Settings,
    error::{DassError, DassResult},
    scoring::{self, AnswerSet, CategoryAssessment, CategoryScore, SeverityLevel},
};
use artifacts::{ArtifactStore, ModelArtifacts};
use train::{TrainingConfig, TrainingReport};

/// Lifecycle of the model artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "reason")]
pub enum ModelState {
    Unloaded,
    Loading,
    Ready,
    Failed(LoadFailure),
}

/// Why loading ended in `Failed`; kept so repeat callers get the same answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    /// Artifacts existed but could not be read.
    Corrupt { path: PathBuf, reason: String },
    /// Artifacts were missing and training did not succeed.
    Training(String),
}

impl LoadFailure {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Corrupt { .. } => "corrupt",
            Self::Training(_) => "training",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Corrupt { path, reason } => format!("{}: {reason}", path.display()),
            Self::Training(reason) => reason.clone(),
        }
    }
}

/// Serialized as `{"kind": ..., "message": ...}` with a string message for every variant.
impl Serialize for LoadFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LoadFailure", 2)?;
        state.serialize_field("kind", self.kind())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

impl From<LoadFailure> for DassError {
    fn from(failure: LoadFailure) -> Self {
        match failure {
            LoadFailure::Corrupt { path, reason } => DassError::ModelLoadFailure { path, reason },
            LoadFailure::Training(reason) => DassError::TrainingFailure(reason),
        }
    }
}

/// How `load` obtained the artifacts.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    AlreadyLoaded,
    Loaded,
    Trained(TrainingReport),
}

/// Scores, severities and the increase forecast for one questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub depression_score: CategoryScore,
    pub depression_severity: SeverityLevel,
    pub anxiety_score: CategoryScore,
    pub anxiety_severity: SeverityLevel,
    pub stress_score: CategoryScore,
    pub stress_severity: SeverityLevel,
    /// Probability that depression will exceed the clinical cut-off.
    pub depression_increase_likelihood: f64,
    /// Predicted depression score minus the cut-off; may be negative.
    pub depression_increase_magnitude: f64,
}

/// Classifier and regressor with a load-once lifecycle.
pub struct PredictiveModel {
    store: ArtifactStore,
    dataset_path: PathBuf,
    training: TrainingConfig,
    /// Held for the whole load so only one caller loads or trains.
    load_guard: Mutex<()>,
    /// Lifecycle state; only ever locked briefly.
    state: Mutex<ModelState>,
    artifacts: OnceCell<ModelArtifacts>,
}

impl std::fmt::Debug for PredictiveModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictiveModel")
            .field("model_dir", &self.store.classifier_path().parent())
            .field("dataset_path", &self.dataset_path)
            .field("state", &self.state())
            .finish()
    }
}

impl PredictiveModel {
    pub fn new(settings: &Settings) -> Self {
        Self {
            store: ArtifactStore::new(&settings.model_dir),
            dataset_path: settings.dataset_path.clone(),
            training: TrainingConfig {
                seed: settings.train_seed,
                test_ratio: settings.test_ratio,
                ..TrainingConfig::default()
            },
            load_guard: Mutex::new(()),
            state: Mutex::new(ModelState::Unloaded),
            artifacts: OnceCell::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ModelState {
        self.lock_state().clone()
    }

    pub fn is_ready(&self) -> bool {
        self.artifacts.get().is_some()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, ModelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, next: ModelState) {
        *self.lock_state() = next;
    }

    /// Load the artifacts, training them first if they are missing.
    ///
    /// Concurrent callers block on the same guard, so training runs at most
    /// once. A failure is final: later calls return the same error.
    pub fn load(&self) -> DassResult<LoadOutcome> {
        if self.is_ready() {
            return Ok(LoadOutcome::AlreadyLoaded);
        }
        let _guard = self.load_guard.lock().unwrap_or_else(PoisonError::into_inner);
        match self.state() {
            ModelState::Ready => return Ok(LoadOutcome::AlreadyLoaded),
            ModelState::Failed(failure) => return Err(failure.into()),
            ModelState::Unloaded | ModelState::Loading => {}
        }
        self.set_state(ModelState::Loading);

        let result = if self.store.exists() {
            self.store
                .load()
                .map(|artifacts| (artifacts, LoadOutcome::Loaded))
                .map_err(|err| match err {
                    DassError::ModelLoadFailure { path, reason } => {
                        LoadFailure::Corrupt { path, reason }
                    }
                    other => LoadFailure::Corrupt {
                        path: self.store.classifier_path(),
                        reason: other.to_string(),
                    },
                })
        } else {
            warn!(
                dataset = %self.dataset_path.display(),
                "model artifacts not found; training from dataset"
            );
            self.train_and_save()
                .map(|(artifacts, report)| (artifacts, LoadOutcome::Trained(report)))
                .map_err(|err| LoadFailure::Training(err.to_string()))
        };

        match result {
            Ok((artifacts, outcome)) => {
                // Only the guard holder sets the cell.
                let _ = self.artifacts.set(artifacts);
                self.set_state(ModelState::Ready);
                info!(
                    ?outcome,
                    classifier = %self.store.classifier_path().display(),
                    regressor = %self.store.regressor_path().display(),
                    "prediction models ready"
                );
                Ok(outcome)
            }
            Err(failure) => {
                self.set_state(ModelState::Failed(failure.clone()));
                Err(failure.into())
            }
        }
    }

    /// Fit from the configured dataset and overwrite both artifacts.
    pub fn train_and_save(&self) -> DassResult<(ModelArtifacts, TrainingReport)> {
        let records = dataset::load_csv(&self.dataset_path)?;
        let (artifacts, report) = train::train(&records, &self.training)?;
        self.store.save(&artifacts)?;
        Ok((artifacts, report))
    }

    fn artifacts(&self) -> DassResult<&ModelArtifacts> {
        self.artifacts.get().ok_or(DassError::ModelNotLoaded)
    }

    /// Likelihood and magnitude for an `[anxiety, stress, depression]` feature vector.
    pub fn infer(&self, features: &[f64]) -> DassResult<(f64, f64)> {
        let artifacts = self.artifacts()?;
        let z = artifacts.classifier.decision(features)?;
        let likelihood = 1.0 / (1.0 + (-z).exp());
        let magnitude = artifacts.regressor.decision(features)?;
        Ok((likelihood, magnitude))
    }

    /// Score all three subscales and forecast the depression increase.
    pub fn predict(
        &self,
        depression: &AnswerSet,
        anxiety: &AnswerSet,
        stress: &AnswerSet,
    ) -> DassResult<PredictionResult> {
        self.artifacts()?;
        let d: CategoryAssessment = scoring::assess(depression);
        let a = scoring::assess(anxiety);
        let s = scoring::assess(stress);
        let features = [a.score.as_f64(), s.score.as_f64(), d.score.as_f64()];
        let (likelihood, magnitude) = self.infer(&features)?;
        Ok(PredictionResult {
            depression_score: d.score,
            depression_severity: d.severity,
            anxiety_score: a.score,
            anxiety_severity: a.severity,
            stress_score: s.score,
            stress_severity: s.severity,
            depression_increase_likelihood: likelihood,
            depression_increase_magnitude: magnitude,
        })
    }

    /// Parse raw labels for each subscale, then predict.
    pub fn predict_labels<S: AsRef<str>>(
        &self,
        depression: &[S],
        anxiety: &[S],
        stress: &[S],
    ) -> DassResult<PredictionResult> {
        use crate::scoring::SymptomCategory::{Anxiety, Depression, Stress};
        let d = AnswerSet::parse(Depression, depression)?;
        let a = AnswerSet::parse(Anxiety, anxiety)?;
        let s = AnswerSet::parse(Stress, stress)?;
        self.predict(&d, &a, &s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artifacts::{LinearParams, ModelKind};

    fn seeded_model(dir: &std::path::Path) -> PredictiveModel {
        let store = ArtifactStore::new(dir);
        store
            .save(&ModelArtifacts {
                classifier: LinearParams::new(ModelKind::Logistic, -13.5, vec![0.0, 0.0, 1.0]),
                regressor: LinearParams::new(ModelKind::Linear, -13.0, vec![0.0, 0.0, 1.0]),
            })
            .unwrap();
        PredictiveModel::new(&Settings::with_paths(dir, dir.join("missing.csv")))
    }

    #[test]
    fn predict_before_load_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let model = seeded_model(dir.path());
        assert_eq!(model.state(), ModelState::Unloaded);
        let err = model
            .predict_labels(&["Never"; 7], &["Never"; 7], &["Never"; 7])
            .unwrap_err();
        assert!(matches!(err, DassError::ModelNotLoaded));
    }

    #[test]
    fn load_once_then_predict() {
        let dir = tempfile::tempdir().unwrap();
        let model = seeded_model(dir.path());
        assert!(matches!(model.load().unwrap(), LoadOutcome::Loaded));
        assert!(matches!(model.load().unwrap(), LoadOutcome::AlreadyLoaded));
        assert_eq!(model.state(), ModelState::Ready);

        let result = model
            .predict_labels(&["Very Often"; 7], &["Never"; 7], &["Never"; 7])
            .unwrap();
        assert_eq!(result.depression_score.value(), 42);
        assert_eq!(result.depression_severity, SeverityLevel::ExtremelySevere);
        assert!(result.depression_increase_likelihood > 0.99);
        assert_eq!(result.depression_increase_magnitude, 29.0);
    }

    #[test]
    fn missing_dataset_fails_as_training() {
        let dir = tempfile::tempdir().unwrap();
        let model = PredictiveModel::new(&Settings::with_paths(dir.path(), dir.path().join("nope.csv")));
        assert!(matches!(model.load().unwrap_err(), DassError::TrainingFailure(_)));
        assert!(matches!(model.state(), ModelState::Failed(LoadFailure::Training(_))));
        // No retry: the second call reports the stored failure.
        assert!(matches!(model.load().unwrap_err(), DassError::TrainingFailure(_)));
    }

    #[test]
    fn idle_model_reports_unloaded_under_concurrent_reads() {
        let dir = tempfile::tempdir().unwrap();
        let model = seeded_model(dir.path());
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..100 {
                        assert_eq!(model.state(), ModelState::Unloaded);
                    }
                });
            }
        });
    }

    #[test]
    fn state_reads_loading_while_guard_is_held() {
        let dir = tempfile::tempdir().unwrap();
        let model = seeded_model(dir.path());
        let _guard = model.load_guard.lock().unwrap();
        model.set_state(ModelState::Loading);
        assert_eq!(model.state(), ModelState::Loading);
    }

    #[test]
    fn failure_serializes_with_string_message() {
        let corrupt = LoadFailure::Corrupt {
            path: PathBuf::from("models/dass_logistic_model.json"),
            reason: "EOF while parsing".to_string(),
        };
        let json = serde_json::to_value(ModelState::Failed(corrupt)).unwrap();
        assert_eq!(json["state"], "failed");
        assert_eq!(json["reason"]["kind"], "corrupt");
        assert_eq!(
            json["reason"]["message"],
            "models/dass_logistic_model.json: EOF while parsing"
        );

        let training = serde_json::to_value(LoadFailure::Training("no rows".into())).unwrap();
        assert_eq!(training, serde_json::json!({"kind": "training", "message": "no rows"}));
    }

    #[test]
    fn corrupt_artifact_fails_as_load() {
        let dir = tempfile::tempdir().unwrap();
        let model = seeded_model(dir.path());
        std::fs::write(dir.path().join(artifacts::LOGISTIC_FILE), "{").unwrap();
        assert!(matches!(model.load().unwrap_err(), DassError::ModelLoadFailure { .. }));
        assert!(matches!(model.state(), ModelState::Failed(LoadFailure::Corrupt { .. })));
    }
}
