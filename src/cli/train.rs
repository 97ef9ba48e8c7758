//! CLI entry-point for retraining the prediction models.

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::{config::Settings, model::PredictiveModel};

#[instrument(skip(settings))]
pub async fn run(settings: Settings) -> Result<()> {
    let model = PredictiveModel::new(&settings);
    let (_, report) = tokio::task::spawn_blocking(move || model.train_and_save())
        .await
        .context("training task")?
        .with_context(|| format!("training from {}", settings.dataset_path.display()))?;
    info!(
        rows = report.rows,
        accuracy = report.accuracy,
        mse = report.mse,
        "models retrained"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
