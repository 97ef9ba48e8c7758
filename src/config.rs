//! Runtime configuration utilities for dass-screen.

use std::{env, path::PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Default seed for the train/test shuffle.
pub const DEFAULT_TRAIN_SEED: u64 = 42;
/// Default held-out fraction for evaluation.
pub const DEFAULT_TEST_RATIO: f64 = 0.2;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Folder holding the classifier and regressor artifacts.
    pub model_dir: PathBuf,
    /// Historical questionnaire export used when artifacts are missing.
    pub dataset_path: PathBuf,
    /// Seed for the deterministic train/test split.
    pub train_seed: u64,
    /// Fraction of records held out for evaluation.
    pub test_ratio: f64,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let model_dir = env::var("MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./models"));
        let dataset_path = env::var("DATASET_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/dataset.csv"));
        let train_seed = env::var("TRAIN_SEED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TRAIN_SEED);
        let test_ratio = env::var("TEST_RATIO")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|ratio| *ratio > 0.0 && *ratio < 1.0)
            .unwrap_or(DEFAULT_TEST_RATIO);

        std::fs::create_dir_all(&model_dir).context("creating model dir")?;

        Ok(Self {
            model_dir,
            dataset_path,
            train_seed,
            test_ratio,
        })
    }

    /// Settings rooted at an explicit model directory, used by tests and embedders.
    pub fn with_paths(model_dir: impl Into<PathBuf>, dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            dataset_path: dataset_path.into(),
            train_seed: DEFAULT_TRAIN_SEED,
            test_ratio: DEFAULT_TEST_RATIO,
        }
    }
}
