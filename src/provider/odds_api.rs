//! the-odds-api client
//!
//! Issues one request per configured sport against
//! `/v4/sports/{sport}/odds` and normalizes the response. Requests run with
//! bounded concurrency to respect provider rate limits.

use super::{FetchError, QuoteSource, SportFetch};
use crate::config::ProviderConfig;
use crate::quote::{normalize_batch, Normalized};
use async_trait::async_trait;
use futures_util::{stream, StreamExt};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Default odds API base URL
pub const ODDS_API_URL: &str = "https://api.the-odds-api.com";

/// Client for the-odds-api v4 odds endpoint
pub struct OddsApiClient {
    config: ProviderConfig,
    client: Client,
}

impl OddsApiClient {
    /// Create a new client from provider configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn odds_url(&self, sport: &str) -> String {
        format!("{}/v4/sports/{}/odds", self.config.base_url, sport)
    }
}

#[async_trait]
impl QuoteSource for OddsApiClient {
    async fn fetch_sport(&self, sport: &str) -> Result<Normalized, FetchError> {
        let url = self.odds_url(sport);

        tracing::debug!(url = %url, sport = sport, "Fetching odds");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("apiKey", self.config.api_key.as_str()),
                ("regions", self.config.regions.as_str()),
                ("markets", self.config.markets.as_str()),
                ("oddsFormat", "decimal"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api { status, body });
        }

        let payload: Value = response.json().await?;
        let normalized = normalize_batch(&payload)?;

        tracing::debug!(
            sport = sport,
            fixtures = normalized.fixtures.len(),
            malformed = normalized.malformed.len(),
            "Normalized odds batch"
        );

        Ok(normalized)
    }

    async fn fetch_all(&self) -> Vec<SportFetch> {
        // Bounded concurrency, results kept in configured sport order
        stream::iter(self.config.sports.clone())
            .map(|sport| async move {
                let result = self.fetch_sport(&sport).await;
                SportFetch { sport, result }
            })
            .buffered(self.config.max_concurrent_requests.max(1))
            .collect()
            .await
    }
}
