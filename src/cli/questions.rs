//! CLI entry-point listing the questionnaire items.

use anyhow::Result;
use tracing::instrument;

use crate::{
    config::Settings,
    scoring::{questions, SymptomCategory},
};

#[instrument(skip(_settings))]
pub async fn run(_settings: Settings) -> Result<()> {
    for category in SymptomCategory::ALL {
        println!("{category}");
        for item in questions::for_category(category) {
            println!("  {:>2}. {}", item.number, item.text);
        }
    }
    Ok(())
}
