//! Command-line interface wiring for dass-screen.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod analyze;
pub mod questions;
pub mod score;
pub mod serve;
pub mod train;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "DASS-21 screening assistant", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::run(args, settings).await,
            Commands::Analyze(args) => analyze::run(args, settings).await,
            Commands::Score(args) => score::run(args, settings).await,
            Commands::Train => train::run(settings).await,
            Commands::Questions => questions::run(settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the JSON API.
    Serve(serve::Args),
    /// Extract symptom cues from free text.
    Analyze(analyze::Args),
    /// Score DASS-21 answers and forecast a depression increase.
    Score(score::Args),
    /// Retrain the prediction models from the configured dataset.
    Train,
    /// Print the 21 questionnaire items.
    Questions,
}
