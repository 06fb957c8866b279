//! Opportunity detection
//!
//! Aggregates the best price per outcome across bookmakers, computes implied
//! probability and profit margin for two-outcome markets, and allocates
//! stakes for fixtures that clear the configured threshold.

mod engine;
mod types;

pub use engine::Engine;
pub use types::{Detection, FixtureSkip, Leg, Opportunity, SkipReason};
