//! Prometheus metrics

use crate::detect::{Detection, SkipReason};

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Fixtures processed by a detection pass
    FixturesScanned,
    /// Opportunities emitted
    OpportunitiesFound,
    /// Fixtures dropped at normalization for malformed payloads
    MalformedFixtures,
    /// Bookmaker entries dropped for invalid prices
    InvalidQuotes,
    /// Per-sport fetches that failed
    FetchFailures,
}

impl CounterMetric {
    fn name(self) -> &'static str {
        match self {
            CounterMetric::FixturesScanned => "hedgescan_fixtures_scanned_total",
            CounterMetric::OpportunitiesFound => "hedgescan_opportunities_found_total",
            CounterMetric::MalformedFixtures => "hedgescan_malformed_fixtures_total",
            CounterMetric::InvalidQuotes => "hedgescan_invalid_quotes_total",
            CounterMetric::FetchFailures => "hedgescan_fetch_failures_total",
        }
    }
}

/// Increment a counter
pub fn increment(metric: CounterMetric, amount: u64) {
    metrics::counter!(metric.name()).increment(amount);
}

/// Count one skipped fixture by reason
pub fn count_skip(reason: &SkipReason) {
    let reason_label = match reason {
        SkipReason::IncompleteMarket { .. } => "incomplete_market",
        SkipReason::UnsupportedMarketShape { .. } => "unsupported_market_shape",
        SkipReason::BelowThreshold { .. } => "below_threshold",
    };
    metrics::counter!("hedgescan_fixtures_skipped_total", "reason" => reason_label).increment(1);
}

/// Record the headline counters for one detection pass
pub fn record_scan(fixtures: usize, detection: &Detection) {
    increment(CounterMetric::FixturesScanned, fixtures as u64);
    increment(
        CounterMetric::OpportunitiesFound,
        detection.opportunities.len() as u64,
    );
    for skip in &detection.skips {
        count_skip(&skip.reason);
    }
}
