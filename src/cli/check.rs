//! Check command implementation
//!
//! Runs normalization and detection over a provider-shaped JSON file, the
//! offline entry point for exercising the fail-soft contract.

use super::report::print_detection;
use crate::config::Config;
use crate::detect::Engine;
use crate::quote::normalize_batch;
use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to a JSON file holding an array of fixtures
    pub file: PathBuf,

    /// Override the configured minimum profit margin (percent)
    #[arg(long)]
    pub min_profit: Option<Decimal>,

    /// Emit opportunities as JSON
    #[arg(long)]
    pub json: bool,

    /// Also print skipped fixtures
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let content = std::fs::read_to_string(&self.file)
            .with_context(|| format!("reading {}", self.file.display()))?;
        let payload = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", self.file.display()))?;

        let normalized = normalize_batch(&payload)?;
        for malformed in &normalized.malformed {
            tracing::warn!(
                index = malformed.index,
                fixture_id = ?malformed.fixture_id,
                detail = %malformed.detail,
                "Excluded malformed fixture"
            );
        }

        let mut detection_config = config.detection.clone();
        if let Some(min_profit) = self.min_profit {
            detection_config.min_profit_pct = min_profit;
        }
        let engine = Engine::from_config(&detection_config, &config.stake);
        let detection = engine.detect(&normalized.fixtures);

        if self.verbose {
            println!(
                "{} fixtures, {} malformed, {} invalid quotes dropped",
                normalized.fixtures.len(),
                normalized.malformed.len(),
                normalized.invalid_quotes
            );
        }

        print_detection(&detection, self.json, self.verbose)
    }
}
