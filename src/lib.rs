//! hedge-scan: hedge opportunity scanner for two-way sports betting markets
//!
//! This library provides the core components for:
//! - Normalizing provider-native odds payloads into canonical quotes
//! - Best-price aggregation across bookmakers
//! - Implied-probability and profit-margin computation
//! - Proportional stake allocation (equalized-return or normalized-100)
//! - Fractional-odds rendering
//! - Odds fetching from providers with bounded concurrency
//! - Full observability stack

pub mod cli;
pub mod config;
pub mod detect;
pub mod odds;
pub mod provider;
pub mod quote;
pub mod stake;
pub mod telemetry;
