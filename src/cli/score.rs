//! CLI entry-point for questionnaire scoring and prediction.

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{config::Settings, model::PredictiveModel};

/// Args for the `score` command. Each list holds seven comma separated labels.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Depression items 1-7.
    #[arg(long, value_delimiter = ',', required = true)]
    pub depression: Vec<String>,
    /// Anxiety items 8-14.
    #[arg(long, value_delimiter = ',', required = true)]
    pub anxiety: Vec<String>,
    /// Stress items 15-21.
    #[arg(long, value_delimiter = ',', required = true)]
    pub stress: Vec<String>,
}

fn trimmed(labels: &[String]) -> Vec<&str> {
    labels.iter().map(|s| s.trim()).collect()
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let model = PredictiveModel::new(&settings);
    let outcome = tokio::task::spawn_blocking(move || {
        let outcome = model.load()?;
        model
            .predict_labels(
                &trimmed(&args.depression),
                &trimmed(&args.anxiety),
                &trimmed(&args.stress),
            )
            .map(|result| (outcome, result))
    })
    .await
    .context("prediction task")?;
    let (load, result) = outcome.context("scoring answers")?;
    info!(?load, "model load outcome");
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
