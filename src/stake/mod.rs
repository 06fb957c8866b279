//! Stake allocation policies
//!
//! Splits a hedge across both legs so the return is balanced regardless of
//! outcome. Two policies are provided: normalized-100 anchors the first leg
//! at 100 units, equalized-return targets a fixed total return per leg.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::{StakeConfig, StakePolicy};

/// Trait for stake allocation implementations
pub trait StakeAllocator: Send + Sync {
    /// Stakes for the two legs priced `price_a` and `price_b`
    fn allocate(&self, price_a: Decimal, price_b: Decimal) -> [Decimal; 2];

    /// Get the policy name
    fn policy_name(&self) -> &'static str;
}

/// Normalized-100 allocation.
///
/// The first leg is staked at 100 units; the second leg is scaled so both
/// payouts are equal up to rounding: `stake_b = round(100 * a / b, 2)`.
#[derive(Debug, Clone, Default)]
pub struct Normalized100;

impl StakeAllocator for Normalized100 {
    fn allocate(&self, price_a: Decimal, price_b: Decimal) -> [Decimal; 2] {
        let stake_a = dec!(100);
        let stake_b = (stake_a * price_a / price_b).round_dp(2);
        [stake_a, stake_b]
    }

    fn policy_name(&self) -> &'static str {
        "normalized100"
    }
}

/// Equalized-return allocation.
///
/// Each leg is staked to return the same fixed target:
/// `stake_i = round(target / price_i, 2)`. Total outlay floats with the
/// prices rather than being normalized.
#[derive(Debug, Clone)]
pub struct EqualizedReturn {
    /// Target total return per leg
    pub target: Decimal,
}

impl EqualizedReturn {
    /// Create an allocator targeting the given return
    pub fn new(target: Decimal) -> Self {
        Self { target }
    }
}

impl Default for EqualizedReturn {
    fn default() -> Self {
        Self { target: dec!(200) }
    }
}

impl StakeAllocator for EqualizedReturn {
    fn allocate(&self, price_a: Decimal, price_b: Decimal) -> [Decimal; 2] {
        [
            (self.target / price_a).round_dp(2),
            (self.target / price_b).round_dp(2),
        ]
    }

    fn policy_name(&self) -> &'static str {
        "equalizedreturn"
    }
}

/// Create a stake allocator based on configuration
pub fn create_allocator(config: &StakeConfig) -> Box<dyn StakeAllocator> {
    match config.policy {
        StakePolicy::Normalized100 => Box::new(Normalized100),
        StakePolicy::EqualizedReturn => Box::new(EqualizedReturn::new(config.target_return)),
    }
}
