//! Scan command implementation

use super::report::print_detection;
use crate::config::Config;
use crate::detect::Engine;
use crate::provider::{OddsApiClient, QuoteSource};
use crate::quote::FixtureQuoteSet;
use crate::telemetry::{increment, record_scan, CounterMetric};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Override the configured minimum profit margin (percent)
    #[arg(long)]
    pub min_profit: Option<Decimal>,

    /// Emit opportunities as JSON
    #[arg(long)]
    pub json: bool,

    /// Also print skipped fixtures and fetch failures
    #[arg(short, long)]
    pub verbose: bool,
}

impl ScanArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let source = OddsApiClient::new(config.provider.clone());
        self.run(&source, config).await
    }

    /// Run one scan against any quote source
    pub async fn run(&self, source: &dyn QuoteSource, config: &Config) -> anyhow::Result<()> {
        let mut detection_config = config.detection.clone();
        if let Some(min_profit) = self.min_profit {
            detection_config.min_profit_pct = min_profit;
        }
        let engine = Engine::from_config(&detection_config, &config.stake);

        let mut fixtures: Vec<FixtureQuoteSet> = Vec::new();
        for fetch in source.fetch_all().await {
            match fetch.result {
                Ok(normalized) => {
                    increment(
                        CounterMetric::MalformedFixtures,
                        normalized.malformed.len() as u64,
                    );
                    increment(
                        CounterMetric::InvalidQuotes,
                        normalized.invalid_quotes as u64,
                    );
                    for malformed in &normalized.malformed {
                        tracing::warn!(
                            sport = %fetch.sport,
                            index = malformed.index,
                            fixture_id = ?malformed.fixture_id,
                            detail = %malformed.detail,
                            "Excluded malformed fixture"
                        );
                    }
                    fixtures.extend(normalized.fixtures);
                }
                Err(e) => {
                    // A failed sport leaves its fixtures absent; the batch continues
                    increment(CounterMetric::FetchFailures, 1);
                    tracing::warn!(sport = %fetch.sport, error = %e, "Fetch failed");
                    if self.verbose {
                        eprintln!("fetch failed for {}: {}", fetch.sport, e);
                    }
                }
            }
        }

        let detection = engine.detect(&fixtures);
        record_scan(fixtures.len(), &detection);

        tracing::info!(
            fixtures = fixtures.len(),
            opportunities = detection.opportunities.len(),
            unsupported = detection.unsupported_count(),
            "Scan complete"
        );

        print_detection(&detection, self.json, self.verbose)
    }
}
