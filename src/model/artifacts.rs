//! On-disk form of the trained classifier and regressor.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{DassError, DassResult};

pub const LOGISTIC_FILE: &str = "dass_logistic_model.json";
pub const LINEAR_FILE: &str = "dass_linear_model.json";

/// Column order every artifact is trained and evaluated on.
pub const FEATURE_ORDER: [&str; 3] = ["anxiety", "stress", "depression"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Logistic,
    Linear,
}

/// Intercept and weights of a fitted linear predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearParams {
    pub kind: ModelKind,
    pub feature_order: Vec<String>,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearParams {
    pub fn new(kind: ModelKind, intercept: f64, coefficients: Vec<f64>) -> Self {
        Self {
            kind,
            feature_order: FEATURE_ORDER.iter().map(|s| s.to_string()).collect(),
            intercept,
            coefficients,
        }
    }

    /// `b + w·x`.
    pub fn decision(&self, features: &[f64]) -> DassResult<f64> {
        if features.len() != self.coefficients.len() {
            return Err(DassError::InferenceFailure(format!(
                "expected {} features, got {}",
                self.coefficients.len(),
                features.len()
            )));
        }
        let value = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(w, x)| w * x)
                .sum::<f64>();
        if value.is_finite() {
            Ok(value)
        } else {
            Err(DassError::InferenceFailure(format!(
                "{:?} model produced a non-finite value",
                self.kind
            )))
        }
    }

    fn validate(&self, expected: ModelKind) -> Result<(), String> {
        if self.kind != expected {
            return Err(format!("expected a {expected:?} model, found {:?}", self.kind));
        }
        if self.feature_order != FEATURE_ORDER {
            return Err(format!("unexpected feature order {:?}", self.feature_order));
        }
        if self.coefficients.len() != FEATURE_ORDER.len() {
            return Err(format!(
                "expected {} coefficients, found {}",
                FEATURE_ORDER.len(),
                self.coefficients.len()
            ));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("parameters are not finite".into());
        }
        Ok(())
    }
}

/// The classifier/regressor pair used for prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifacts {
    pub classifier: LinearParams,
    pub regressor: LinearParams,
}

/// Where the two artifacts live.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn classifier_path(&self) -> PathBuf {
        self.dir.join(LOGISTIC_FILE)
    }

    pub fn regressor_path(&self) -> PathBuf {
        self.dir.join(LINEAR_FILE)
    }

    /// Both files present. A lone survivor counts as missing and is retrained.
    pub fn exists(&self) -> bool {
        self.classifier_path().exists() && self.regressor_path().exists()
    }

    pub fn load(&self) -> DassResult<ModelArtifacts> {
        let classifier = read_params(&self.classifier_path(), ModelKind::Logistic)?;
        let regressor = read_params(&self.regressor_path(), ModelKind::Linear)?;
        info!(dir = %self.dir.display(), "loaded model artifacts");
        Ok(ModelArtifacts {
            classifier,
            regressor,
        })
    }

    pub fn save(&self, artifacts: &ModelArtifacts) -> DassResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| DassError::TrainingFailure(format!(
            "creating {}: {e}",
            self.dir.display()
        )))?;
        write_params(&self.classifier_path(), &artifacts.classifier)?;
        write_params(&self.regressor_path(), &artifacts.regressor)?;
        info!(dir = %self.dir.display(), "saved model artifacts");
        Ok(())
    }
}

fn read_params(path: &Path, kind: ModelKind) -> DassResult<LinearParams> {
    let failure = |reason: String| DassError::ModelLoadFailure {
        path: path.to_path_buf(),
        reason,
    };
    let raw = fs::read_to_string(path).map_err(|e| failure(e.to_string()))?;
    let params: LinearParams = serde_json::from_str(&raw).map_err(|e| failure(e.to_string()))?;
    params.validate(kind).map_err(failure)?;
    Ok(params)
}

fn write_params(path: &Path, params: &LinearParams) -> DassResult<()> {
    let json = serde_json::to_string_pretty(params)
        .map_err(|e| DassError::TrainingFailure(e.to_string()))?;
    fs::write(path, json)
        .map_err(|e| DassError::TrainingFailure(format!("writing {}: {e}", path.display())))
}
