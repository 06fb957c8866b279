//! Configuration types for hedge-scan

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub provider: ProviderConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub stake: StakeConfig,
    pub telemetry: TelemetryConfig,
}

/// Odds provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the odds API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key; overridden by the ODDS_API_KEY environment variable if set
    #[serde(default)]
    pub api_key: String,

    /// Sport keys to scan (e.g. "soccer_epl")
    pub sports: Vec<String>,

    /// Bookmaker regions requested from the provider
    #[serde(default = "default_regions")]
    pub regions: String,

    /// Market keys requested from the provider
    #[serde(default = "default_markets")]
    pub markets: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum in-flight provider requests
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_requests: usize,
}

fn default_base_url() -> String {
    crate::provider::ODDS_API_URL.to_string()
}
fn default_regions() -> String {
    "uk".to_string()
}
fn default_markets() -> String {
    "h2h".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_max_concurrent() -> usize {
    4
}

/// Opportunity detection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionConfig {
    /// Minimum profit margin (percent) an opportunity must clear.
    /// Negative values admit bounded-loss near misses.
    #[serde(default = "default_min_profit_pct")]
    pub min_profit_pct: Decimal,

    /// Restrict detection to these bookmakers; empty or absent means all
    #[serde(default)]
    pub allowed_bookmakers: Option<HashSet<String>>,

    /// Reproduce the legacy behavior of truncating >2-outcome markets to
    /// their first two outcomes instead of rejecting them
    #[serde(default)]
    pub legacy_truncate_outcomes: bool,
}

fn default_min_profit_pct() -> Decimal {
    Decimal::new(-10, 0)
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_profit_pct: default_min_profit_pct(),
            allowed_bookmakers: None,
            legacy_truncate_outcomes: false,
        }
    }
}

/// Stake allocation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StakeConfig {
    /// Allocation policy: "normalized100" or "equalizedreturn"
    #[serde(default)]
    pub policy: StakePolicy,

    /// Target total return per leg for the equalized-return policy
    #[serde(default = "default_target_return")]
    pub target_return: Decimal,
}

/// Stake allocation policy
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StakePolicy {
    /// First leg staked at 100, second leg scaled so both payouts match
    #[default]
    Normalized100,
    /// Each leg staked to return a fixed target amount
    EqualizedReturn,
}

fn default_target_return() -> Decimal {
    Decimal::new(200, 0)
}

impl Default for StakeConfig {
    fn default() -> Self {
        Self {
            policy: StakePolicy::Normalized100,
            target_return: default_target_return(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    pub metrics_port: u16,
    pub log_level: String,
}

impl Config {
    /// Load configuration from a TOML file, applying environment overrides
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env();
        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("ODDS_API_KEY") {
            self.provider.api_key = key;
        }
    }
}
