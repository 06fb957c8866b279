//! Canonical quote types
//!
//! Provider payloads are normalized into these shapes before detection.
//! Quotes live for a single detection pass and are never retained between
//! fetch cycles.

mod normalizer;

pub use normalizer::{normalize_batch, MalformedFixture, Normalized, NormalizeError};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One bookmaker's price for one outcome of one fixture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Fixture the quote belongs to
    pub fixture_id: String,
    /// Outcome label, verbatim from the provider apart from trimming
    pub outcome: String,
    /// Price source
    pub bookmaker: String,
    /// Decimal odds; always > 1.0 after normalization
    pub price: Decimal,
}

/// All quotes for one fixture, grouped for a single detection pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureQuoteSet {
    /// Opaque stable fixture identifier
    pub fixture_id: String,
    /// Home side display name, when the provider supplies one
    pub home_team: Option<String>,
    /// Away side display name, when the provider supplies one
    pub away_team: Option<String>,
    /// Scheduled start time
    pub commence_time: Option<DateTime<Utc>>,
    /// Normalized quotes in provider order
    pub quotes: Vec<Quote>,
}

impl FixtureQuoteSet {
    /// Display name for the fixture, falling back to the id
    pub fn match_name(&self) -> String {
        match (&self.home_team, &self.away_team) {
            (Some(home), Some(away)) => format!("{} vs {}", home, away),
            _ => self.fixture_id.clone(),
        }
    }
}
