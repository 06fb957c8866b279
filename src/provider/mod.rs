//! Odds provider clients
//!
//! Fetches raw odds payloads over HTTP and hands them to the normalizer.
//! Failures are typed per sport so a partial batch keeps its usable
//! fixtures.

mod odds_api;

pub use odds_api::{OddsApiClient, ODDS_API_URL};

use crate::quote::{Normalized, NormalizeError};
use async_trait::async_trait;
use thiserror::Error;

/// Errors fetching one sport's odds
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level request failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success response from the provider
    #[error("provider error: {status} - {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    /// Response body was not a fixture batch
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Outcome of fetching one sport
#[derive(Debug)]
pub struct SportFetch {
    /// Sport key the fetch was issued for
    pub sport: String,
    /// Normalized fixtures, or why the sport's data is absent
    pub result: Result<Normalized, FetchError>,
}

/// Trait for quote source implementations
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch and normalize odds for one sport
    async fn fetch_sport(&self, sport: &str) -> Result<Normalized, FetchError>;

    /// Fetch all configured sports, one typed result per sport
    async fn fetch_all(&self) -> Vec<SportFetch>;
}
