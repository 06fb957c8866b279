//! Detection engine

use super::{Detection, FixtureSkip, Leg, Opportunity, SkipReason};
use crate::config::{DetectionConfig, StakeConfig};
use crate::odds;
use crate::quote::{FixtureQuoteSet, Quote};
use crate::stake::{create_allocator, StakeAllocator};
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Detects hedge opportunities across fixtures.
///
/// Pure over its inputs: the same fixtures and configuration always produce
/// the same detection, and fixtures are processed independently of one
/// another.
pub struct Engine {
    config: DetectionConfig,
    allocator: Box<dyn StakeAllocator>,
}

impl Engine {
    /// Create an engine with an explicit stake allocator
    pub fn new(config: DetectionConfig, allocator: Box<dyn StakeAllocator>) -> Self {
        Self { config, allocator }
    }

    /// Create an engine from configuration values
    pub fn from_config(detection: &DetectionConfig, stake: &StakeConfig) -> Self {
        Self::new(detection.clone(), create_allocator(stake))
    }

    /// Run one detection pass over the given fixtures.
    ///
    /// Returns opportunities in fixture input order plus a skip event for
    /// every fixture that produced none. Never fails for a single bad
    /// fixture.
    pub fn detect(&self, fixtures: &[FixtureQuoteSet]) -> Detection {
        let mut detection = Detection::default();

        for fixture in fixtures {
            match self.detect_fixture(fixture) {
                Ok(opportunity) => detection.opportunities.push(opportunity),
                Err(reason) => detection.skips.push(FixtureSkip {
                    fixture_id: fixture.fixture_id.clone(),
                    reason,
                }),
            }
        }

        detection
    }

    /// Evaluate a single fixture
    fn detect_fixture(&self, fixture: &FixtureQuoteSet) -> Result<Opportunity, SkipReason> {
        let mut best = self.select_best_prices(&fixture.quotes);

        if best.len() > 2 {
            if self.config.legacy_truncate_outcomes {
                best.truncate(2);
            } else {
                return Err(SkipReason::UnsupportedMarketShape {
                    outcomes: best.len(),
                });
            }
        }
        if best.len() < 2 {
            return Err(SkipReason::IncompleteMarket {
                outcomes: best.len(),
            });
        }

        let (leg_a, leg_b) = (&best[0], &best[1]);

        let implied_probability_pct =
            ((Decimal::ONE / leg_a.price + Decimal::ONE / leg_b.price) * HUNDRED).round_dp(2);
        let profit_margin_pct = (HUNDRED - implied_probability_pct).round_dp(2);

        if profit_margin_pct < self.config.min_profit_pct {
            return Err(SkipReason::BelowThreshold { profit_margin_pct });
        }

        let stakes = self.allocator.allocate(leg_a.price, leg_b.price);
        let legs = [
            build_leg(leg_a, stakes[0]),
            build_leg(leg_b, stakes[1]),
        ];

        let total_stake = stakes[0] + stakes[1];
        let worst_payout = legs[0].payout_if_win.min(legs[1].payout_if_win);
        let estimated_profit = (worst_payout - total_stake).round_dp(2);

        Ok(Opportunity {
            id: Uuid::new_v4(),
            fixture_id: fixture.fixture_id.clone(),
            match_name: fixture.match_name(),
            commence_time: fixture.commence_time,
            legs,
            implied_probability_pct,
            profit_margin_pct,
            estimated_profit,
            detected_at: Utc::now(),
        })
    }

    /// Keep the best-priced quote per distinct outcome.
    ///
    /// Outcomes keep first-seen order; exact price ties keep the
    /// first-encountered bookmaker. Quotes outside the bookmaker allow-list
    /// or with prices at or below 1.0 never participate.
    fn select_best_prices(&self, quotes: &[Quote]) -> Vec<Quote> {
        let mut best: Vec<Quote> = Vec::new();

        for quote in quotes {
            if quote.price <= Decimal::ONE || !self.bookmaker_allowed(&quote.bookmaker) {
                continue;
            }
            match best.iter_mut().find(|b| b.outcome == quote.outcome) {
                Some(current) => {
                    if quote.price > current.price {
                        *current = quote.clone();
                    }
                }
                None => best.push(quote.clone()),
            }
        }

        best
    }

    fn bookmaker_allowed(&self, bookmaker: &str) -> bool {
        match &self.config.allowed_bookmakers {
            Some(allowed) if !allowed.is_empty() => allowed.contains(bookmaker),
            _ => true,
        }
    }
}

fn build_leg(quote: &Quote, stake: Decimal) -> Leg {
    Leg {
        outcome: quote.outcome.clone(),
        bookmaker: quote.bookmaker.clone(),
        price: quote.price,
        fractional: odds::to_fractional(quote.price),
        stake,
        payout_if_win: (stake * quote.price).round_dp(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashSet;

    fn quote(outcome: &str, bookmaker: &str, price: Decimal) -> Quote {
        Quote {
            fixture_id: "f1".to_string(),
            outcome: outcome.to_string(),
            bookmaker: bookmaker.to_string(),
            price,
        }
    }

    fn fixture(quotes: Vec<Quote>) -> FixtureQuoteSet {
        FixtureQuoteSet {
            fixture_id: "f1".to_string(),
            home_team: Some("Arsenal".to_string()),
            away_team: Some("Chelsea".to_string()),
            commence_time: None,
            quotes,
        }
    }

    fn default_engine() -> Engine {
        Engine::from_config(&DetectionConfig::default(), &StakeConfig::default())
    }

    #[test]
    fn test_scenario_two_outcomes_normalized_100() {
        let engine = default_engine();
        let fixtures = vec![fixture(vec![
            quote("Arsenal", "bet365", dec!(2.00)),
            quote("Chelsea", "paddypower", dec!(2.10)),
        ])];

        let detection = engine.detect(&fixtures);
        assert_eq!(detection.opportunities.len(), 1);

        let opp = &detection.opportunities[0];
        assert_eq!(opp.implied_probability_pct, dec!(97.62));
        assert_eq!(opp.profit_margin_pct, dec!(2.38));
        assert_eq!(opp.legs[0].stake, dec!(100));
        assert_eq!(opp.legs[1].stake, dec!(95.24));
        assert_eq!(opp.legs[0].payout_if_win, dec!(200.00));
        assert_eq!(opp.legs[1].payout_if_win, dec!(200.00));
        assert_eq!(opp.match_name, "Arsenal vs Chelsea");
    }

    #[test]
    fn test_margin_identity() {
        let engine = default_engine();
        let fixtures = vec![fixture(vec![
            quote("A", "x", dec!(1.85)),
            quote("B", "y", dec!(2.35)),
        ])];

        let opp = &engine.detect(&fixtures).opportunities[0];
        assert_eq!(
            opp.implied_probability_pct + opp.profit_margin_pct,
            dec!(100)
        );
    }

    #[test]
    fn test_best_price_picks_maximum() {
        let engine = default_engine();
        let fixtures = vec![fixture(vec![
            quote("A", "low", dec!(1.90)),
            quote("A", "high", dec!(2.05)),
            quote("A", "mid", dec!(1.99)),
            quote("B", "only", dec!(2.10)),
        ])];

        let opp = &engine.detect(&fixtures).opportunities[0];
        assert_eq!(opp.legs[0].bookmaker, "high");
        assert_eq!(opp.legs[0].price, dec!(2.05));
    }

    #[test]
    fn test_best_price_tie_keeps_first_seen() {
        let engine = default_engine();
        let fixtures = vec![fixture(vec![
            quote("A", "first", dec!(2.05)),
            quote("A", "second", dec!(2.05)),
            quote("B", "only", dec!(2.10)),
        ])];

        let opp = &engine.detect(&fixtures).opportunities[0];
        assert_eq!(opp.legs[0].bookmaker, "first");

        // Reordering the tie set changes the winner with the order
        let fixtures = vec![fixture(vec![
            quote("A", "second", dec!(2.05)),
            quote("A", "first", dec!(2.05)),
            quote("B", "only", dec!(2.10)),
        ])];
        let opp = &engine.detect(&fixtures).opportunities[0];
        assert_eq!(opp.legs[0].bookmaker, "second");
    }

    #[test]
    fn test_three_outcomes_rejected() {
        let engine = default_engine();
        let fixtures = vec![fixture(vec![
            quote("Home", "x", dec!(2.50)),
            quote("Draw", "x", dec!(3.30)),
            quote("Away", "x", dec!(2.90)),
        ])];

        let detection = engine.detect(&fixtures);
        assert!(detection.opportunities.is_empty());
        assert_eq!(detection.unsupported_count(), 1);
        assert_eq!(
            detection.skips[0].reason,
            SkipReason::UnsupportedMarketShape { outcomes: 3 }
        );
    }

    #[test]
    fn test_legacy_truncation_opt_in() {
        let config = DetectionConfig {
            legacy_truncate_outcomes: true,
            ..DetectionConfig::default()
        };
        let engine = Engine::from_config(&config, &StakeConfig::default());
        let fixtures = vec![fixture(vec![
            quote("Home", "x", dec!(2.50)),
            quote("Draw", "x", dec!(3.30)),
            quote("Away", "x", dec!(2.90)),
        ])];

        let detection = engine.detect(&fixtures);
        assert_eq!(detection.opportunities.len(), 1);
        let opp = &detection.opportunities[0];
        assert_eq!(opp.legs[0].outcome, "Home");
        assert_eq!(opp.legs[1].outcome, "Draw");
    }

    #[test]
    fn test_single_outcome_incomplete() {
        let engine = default_engine();
        let fixtures = vec![fixture(vec![quote("A", "x", dec!(2.00))])];

        let detection = engine.detect(&fixtures);
        assert!(detection.opportunities.is_empty());
        assert_eq!(
            detection.skips[0].reason,
            SkipReason::IncompleteMarket { outcomes: 1 }
        );
    }

    #[test]
    fn test_sub_even_price_never_wins() {
        let engine = default_engine();
        // 0.95 is the only quote for B; it must not survive selection,
        // leaving the fixture incomplete
        let fixtures = vec![fixture(vec![
            quote("A", "x", dec!(2.00)),
            quote("B", "y", dec!(0.95)),
        ])];

        let detection = engine.detect(&fixtures);
        assert!(detection.opportunities.is_empty());
        assert_eq!(
            detection.skips[0].reason,
            SkipReason::IncompleteMarket { outcomes: 1 }
        );
    }

    #[test]
    fn test_threshold_filters_negative_margins() {
        let config = DetectionConfig {
            min_profit_pct: dec!(0),
            ..DetectionConfig::default()
        };
        let engine = Engine::from_config(&config, &StakeConfig::default());
        // 1/1.90 + 1/1.90 > 1, guaranteed loss
        let fixtures = vec![fixture(vec![
            quote("A", "x", dec!(1.90)),
            quote("B", "y", dec!(1.90)),
        ])];

        let detection = engine.detect(&fixtures);
        assert!(detection.opportunities.is_empty());
        assert!(matches!(
            detection.skips[0].reason,
            SkipReason::BelowThreshold { .. }
        ));
    }

    #[test]
    fn test_threshold_monotonicity() {
        let fixtures = vec![
            fixture(vec![
                quote("A", "x", dec!(2.00)),
                quote("B", "y", dec!(2.10)),
            ]),
            fixture(vec![
                quote("A", "x", dec!(1.90)),
                quote("B", "y", dec!(1.95)),
            ]),
        ];

        let mut previous = usize::MAX;
        for threshold in [dec!(-10), dec!(-2), dec!(0), dec!(2), dec!(5)] {
            let config = DetectionConfig {
                min_profit_pct: threshold,
                ..DetectionConfig::default()
            };
            let engine = Engine::from_config(&config, &StakeConfig::default());
            let found = engine.detect(&fixtures).opportunities.len();
            assert!(found <= previous);
            previous = found;
        }
    }

    #[test]
    fn test_allow_list_restricts_bookmakers() {
        let config = DetectionConfig {
            allowed_bookmakers: Some(HashSet::from(["bet365".to_string(), "sky".to_string()])),
            ..DetectionConfig::default()
        };
        let engine = Engine::from_config(&config, &StakeConfig::default());
        let fixtures = vec![fixture(vec![
            quote("A", "bet365", dec!(1.95)),
            quote("A", "banned", dec!(2.50)),
            quote("B", "sky", dec!(2.10)),
        ])];

        let opp = &engine.detect(&fixtures).opportunities[0];
        assert_eq!(opp.legs[0].bookmaker, "bet365");
        assert_eq!(opp.legs[0].price, dec!(1.95));
    }

    #[test]
    fn test_empty_allow_list_means_no_restriction() {
        let config = DetectionConfig {
            allowed_bookmakers: Some(HashSet::new()),
            ..DetectionConfig::default()
        };
        let engine = Engine::from_config(&config, &StakeConfig::default());
        let fixtures = vec![fixture(vec![
            quote("A", "anyone", dec!(2.00)),
            quote("B", "else", dec!(2.10)),
        ])];

        assert_eq!(engine.detect(&fixtures).opportunities.len(), 1);
    }

    #[test]
    fn test_idempotent_for_identical_inputs() {
        let engine = default_engine();
        let fixtures = vec![fixture(vec![
            quote("A", "x", dec!(2.00)),
            quote("B", "y", dec!(2.10)),
        ])];

        let first = engine.detect(&fixtures);
        let second = engine.detect(&fixtures);
        assert_eq!(first.opportunities.len(), second.opportunities.len());
        let (a, b) = (&first.opportunities[0], &second.opportunities[0]);
        assert_eq!(a.profit_margin_pct, b.profit_margin_pct);
        assert_eq!(a.legs[0].stake, b.legs[0].stake);
        assert_eq!(a.legs[1].stake, b.legs[1].stake);
    }

    #[test]
    fn test_fixtures_processed_independently() {
        let engine = default_engine();
        let bad = FixtureQuoteSet {
            fixture_id: "bad".to_string(),
            home_team: None,
            away_team: None,
            commence_time: None,
            quotes: vec![quote("Only", "x", dec!(2.0))],
        };
        let good = fixture(vec![
            quote("A", "x", dec!(2.00)),
            quote("B", "y", dec!(2.10)),
        ]);

        let detection = engine.detect(&[bad, good]);
        assert_eq!(detection.opportunities.len(), 1);
        assert_eq!(detection.skips.len(), 1);
        assert_eq!(detection.opportunities[0].fixture_id, "f1");
    }
}
