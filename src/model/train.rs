//! Fitting the increase classifier and magnitude regressor.

use linfa::{
    dataset::DatasetBase,
    prelude::{Fit, Predict},
};
use linfa_linear::LinearRegression;
use linfa_logistic::LogisticRegression;
use ndarray::{Array1, Array2};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::Serialize;
use tracing::{info, instrument};

use super::{
    artifacts::{LinearParams, ModelArtifacts, ModelKind},
    dataset::ScoredRecord,
};
use crate::error::{DassError, DassResult};

/// Split and solver settings.
#[derive(Debug, Clone, Copy)]
pub struct TrainingConfig {
    pub seed: u64,
    pub test_ratio: f64,
    pub max_iterations: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            seed: crate::config::DEFAULT_TRAIN_SEED,
            test_ratio: crate::config::DEFAULT_TEST_RATIO,
            max_iterations: 150,
        }
    }
}

/// Held-out evaluation of a training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    /// Classifier accuracy on the held-out rows.
    pub accuracy: f64,
    /// Regressor mean squared error on the held-out rows.
    pub mse: f64,
}

/// Deterministic shuffle, then hold out `test_ratio` of the rows (at least one each side).
pub fn split_indices(rows: usize, config: &TrainingConfig) -> DassResult<(Vec<usize>, Vec<usize>)> {
    if rows < 2 {
        return Err(DassError::TrainingFailure(format!(
            "need at least 2 rows to split, got {rows}"
        )));
    }
    let mut indices: Vec<usize> = (0..rows).collect();
    let mut rng = StdRng::seed_from_u64(config.seed);
    indices.shuffle(&mut rng);
    let test_len = ((rows as f64) * config.test_ratio).ceil() as usize;
    let test_len = test_len.clamp(1, rows - 1);
    let train = indices.split_off(test_len);
    Ok((train, indices))
}

fn feature_matrix(records: &[ScoredRecord], rows: &[usize]) -> DassResult<Array2<f64>> {
    let flat: Vec<f64> = rows
        .iter()
        .flat_map(|&i| records[i].features())
        .collect();
    Array2::from_shape_vec((rows.len(), 3), flat)
        .map_err(|e| DassError::TrainingFailure(e.to_string()))
}

/// Fit both models on the training split and evaluate on the rest.
#[instrument(skip(records), fields(rows = records.len()))]
pub fn train(
    records: &[ScoredRecord],
    config: &TrainingConfig,
) -> DassResult<(ModelArtifacts, TrainingReport)> {
    let (train_rows, test_rows) = split_indices(records.len(), config)?;
    let x_train = feature_matrix(records, &train_rows)?;
    let x_test = feature_matrix(records, &test_rows)?;

    let y_class: Array1<i32> = train_rows
        .iter()
        .map(|&i| i32::from(records[i].exceeds_cutoff()))
        .collect();
    let y_reg: Array1<f64> = train_rows.iter().map(|&i| records[i].excess()).collect();

    let class_data = DatasetBase::new(x_train.clone(), y_class.clone());
    let fitted_logistic = LogisticRegression::default()
        .max_iterations(config.max_iterations)
        .fit(&class_data)
        .map_err(|e| DassError::TrainingFailure(format!("logistic regression: {e}")))?;

    let reg_data = DatasetBase::new(x_train.clone(), y_reg);
    let fitted_linear = LinearRegression::new()
        .fit(&reg_data)
        .map_err(|e| DassError::TrainingFailure(format!("linear regression: {e}")))?;

    let mut classifier = LinearParams::new(
        ModelKind::Logistic,
        fitted_logistic.intercept(),
        fitted_logistic.params().to_vec(),
    );
    let train_pred: Array1<i32> = fitted_logistic.predict(&x_train);
    orient_towards_increase(&mut classifier, &x_train, &train_pred)?;

    let regressor = LinearParams::new(
        ModelKind::Linear,
        fitted_linear.intercept(),
        fitted_linear.params().to_vec(),
    );

    let test_pred: Array1<i32> = fitted_logistic.predict(&x_test);
    let correct = test_rows
        .iter()
        .zip(test_pred.iter())
        .filter(|&(&i, &p)| i32::from(records[i].exceeds_cutoff()) == p)
        .count();
    let accuracy = correct as f64 / test_rows.len() as f64;

    let mut squared = 0.0;
    for (&i, row) in test_rows.iter().zip(x_test.rows()) {
        let predicted = regressor.decision(&row.to_vec())?;
        squared += (predicted - records[i].excess()).powi(2);
    }
    let mse = squared / test_rows.len() as f64;

    let report = TrainingReport {
        rows: records.len(),
        train_rows: train_rows.len(),
        test_rows: test_rows.len(),
        accuracy,
        mse,
    };
    info!(
        train_rows = report.train_rows,
        test_rows = report.test_rows,
        accuracy = report.accuracy,
        mse = report.mse,
        "trained dass models"
    );
    Ok((
        ModelArtifacts {
            classifier,
            regressor,
        },
        report,
    ))
}

/// Make a positive decision value mean "score will exceed the cutoff".
///
/// The fitted model picks its own positive class; compare its labels with
/// the sign of our decision function and flip the weights if they disagree.
fn orient_towards_increase(
    params: &mut LinearParams,
    x: &Array2<f64>,
    labels: &Array1<i32>,
) -> DassResult<()> {
    let mut agree = 0usize;
    for (row, label) in x.rows().into_iter().zip(labels.iter()) {
        let positive = params.decision(&row.to_vec())? >= 0.0;
        if positive == (*label == 1) {
            agree += 1;
        }
    }
    if agree * 2 < labels.len() {
        params.intercept = -params.intercept;
        params.coefficients.iter_mut().for_each(|w| *w = -*w);
    }
    Ok(())
}
