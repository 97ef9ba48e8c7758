//! CLI entry-point for free-text symptom extraction.

use std::io::Read;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{api::types::AnalyzeResponse, config::Settings, nlp};

/// Args for the `analyze` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Narrative to analyse; read from stdin when omitted.
    #[arg(long)]
    pub text: Option<String>,
}

#[instrument(skip(_settings))]
pub async fn run(args: Args, _settings: Settings) -> Result<()> {
    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading narrative from stdin")?;
            buf
        }
    };
    let analysis = nlp::analyze(&text).context("analysing text")?;
    let response = AnalyzeResponse::from(analysis);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
