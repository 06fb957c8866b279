//! Detection output types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One side of a hedge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leg {
    /// Outcome backed by this leg
    pub outcome: String,
    /// Bookmaker offering the best price for the outcome
    pub bookmaker: String,
    /// Decimal odds
    pub price: Decimal,
    /// Fractional odds rendering of `price`
    pub fractional: String,
    /// Stake allocated to this leg
    pub stake: Decimal,
    /// Return if this leg wins: `round(stake * price, 2)`
    pub payout_if_win: Decimal,
}

/// A detected hedge opportunity for one two-outcome fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    /// Unique opportunity identifier
    pub id: Uuid,
    /// Fixture the opportunity was found on
    pub fixture_id: String,
    /// Fixture display name
    pub match_name: String,
    /// Scheduled start time of the fixture
    pub commence_time: Option<DateTime<Utc>>,
    /// Both legs, in first-seen outcome order
    pub legs: [Leg; 2],
    /// `round((1/price_a + 1/price_b) * 100, 2)`
    pub implied_probability_pct: Decimal,
    /// `round(100 - implied_probability_pct, 2)`; positive means guaranteed profit
    pub profit_margin_pct: Decimal,
    /// Worst-case return minus total stake under the allocation
    pub estimated_profit: Decimal,
    /// Detection timestamp
    pub detected_at: DateTime<Utc>,
}

impl Opportunity {
    /// Total stake across both legs
    pub fn total_stake(&self) -> Decimal {
        self.legs[0].stake + self.legs[1].stake
    }
}

/// Why a fixture produced no opportunity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Fewer than two distinct outcomes survived best-price selection
    IncompleteMarket { outcomes: usize },
    /// More than two distinct outcomes; multi-way markets are unsupported
    UnsupportedMarketShape { outcomes: usize },
    /// Profit margin fell below the configured threshold
    BelowThreshold { profit_margin_pct: Decimal },
}

/// A fixture skipped during a detection pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSkip {
    pub fixture_id: String,
    pub reason: SkipReason,
}

/// Result of one detection pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Detection {
    /// Opportunities in fixture input order
    pub opportunities: Vec<Opportunity>,
    /// Fixtures that produced no opportunity, with the reason
    pub skips: Vec<FixtureSkip>,
}

impl Detection {
    /// Count of fixtures skipped for a shape the engine does not support
    pub fn unsupported_count(&self) -> usize {
        self.skips
            .iter()
            .filter(|s| matches!(s.reason, SkipReason::UnsupportedMarketShape { .. }))
            .count()
    }
}
