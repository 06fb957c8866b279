//! Quote normalization
//!
//! Converts provider-native fixture payloads into canonical [`Quote`]s.
//! Two payload shapes are recognized: the nested
//! bookmakers → markets → outcomes layout used by the-odds-api, and a flat
//! `selections` list. A single malformed fixture or bookmaker entry is
//! dropped without failing its siblings; only a top-level payload that is
//! not an array of fixtures is an error.

use super::{FixtureQuoteSet, Quote};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

/// Normalization errors that propagate to the caller
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The top-level payload is not a sequence of fixtures
    #[error("top-level payload is not an array of fixtures")]
    NotAnArray,
}

/// A fixture that could not be normalized and was excluded from the batch
#[derive(Debug, Clone)]
pub struct MalformedFixture {
    /// Position in the input array
    pub index: usize,
    /// Fixture id when one could be extracted
    pub fixture_id: Option<String>,
    /// Parse failure detail
    pub detail: String,
}

/// Result of normalizing one provider batch
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Fixtures that normalized cleanly, in input order
    pub fixtures: Vec<FixtureQuoteSet>,
    /// Fixtures excluded for shape errors
    pub malformed: Vec<MalformedFixture>,
    /// Bookmaker entries dropped for missing or invalid prices
    pub invalid_quotes: usize,
}

/// Provider-native fixture record.
///
/// Both recognized shapes deserialize into this struct; a fixture carrying
/// neither `bookmakers` nor `selections` simply yields zero quotes.
#[derive(Debug, Deserialize)]
struct RawFixture {
    id: String,
    home_team: Option<String>,
    away_team: Option<String>,
    commence_time: Option<String>,
    #[serde(default)]
    bookmakers: Vec<RawBookmaker>,
    #[serde(default)]
    selections: Vec<RawSelection>,
}

#[derive(Debug, Deserialize)]
struct RawBookmaker {
    key: Option<String>,
    title: Option<String>,
    #[serde(default)]
    markets: Vec<RawMarket>,
}

#[derive(Debug, Deserialize)]
struct RawMarket {
    #[serde(default)]
    outcomes: Vec<RawOutcome>,
}

#[derive(Debug, Deserialize)]
struct RawOutcome {
    name: Option<String>,
    price: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawSelection {
    bookmaker: Option<String>,
    #[serde(alias = "name")]
    outcome: Option<String>,
    price: Option<Value>,
}

/// Normalize a provider batch into canonical fixture quote sets.
///
/// Fails only if `payload` is not an array; everything below that level is
/// fail-soft and reported on the returned [`Normalized`].
pub fn normalize_batch(payload: &Value) -> Result<Normalized, NormalizeError> {
    let items = payload.as_array().ok_or(NormalizeError::NotAnArray)?;

    let mut result = Normalized::default();
    for (index, item) in items.iter().enumerate() {
        match serde_json::from_value::<RawFixture>(item.clone()) {
            Ok(raw) => {
                let (fixture, dropped) = normalize_fixture(raw);
                result.invalid_quotes += dropped;
                result.fixtures.push(fixture);
            }
            Err(e) => {
                let fixture_id = item
                    .get("id")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                result.malformed.push(MalformedFixture {
                    index,
                    fixture_id,
                    detail: e.to_string(),
                });
            }
        }
    }

    Ok(result)
}

/// Normalize one fixture, returning it plus the count of dropped entries
fn normalize_fixture(raw: RawFixture) -> (FixtureQuoteSet, usize) {
    let mut quotes = Vec::new();
    let mut dropped = 0;

    for bookmaker in &raw.bookmakers {
        let Some(name) = bookmaker_name(bookmaker) else {
            dropped += 1;
            continue;
        };
        for market in &bookmaker.markets {
            for outcome in &market.outcomes {
                match build_quote(&raw.id, &name, outcome.name.as_deref(), &outcome.price) {
                    Some(quote) => quotes.push(quote),
                    None => dropped += 1,
                }
            }
        }
    }

    for selection in &raw.selections {
        match build_quote(
            &raw.id,
            selection.bookmaker.as_deref().unwrap_or(""),
            selection.outcome.as_deref(),
            &selection.price,
        ) {
            Some(quote) => quotes.push(quote),
            None => dropped += 1,
        }
    }

    let fixture = FixtureQuoteSet {
        fixture_id: raw.id,
        home_team: raw.home_team,
        away_team: raw.away_team,
        commence_time: raw.commence_time.as_deref().and_then(parse_timestamp),
        quotes,
    };

    (fixture, dropped)
}

fn bookmaker_name(raw: &RawBookmaker) -> Option<String> {
    raw.title
        .as_deref()
        .or(raw.key.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Build a quote from one provider entry, or `None` if the entry is unusable
fn build_quote(
    fixture_id: &str,
    bookmaker: &str,
    outcome: Option<&str>,
    price: &Option<Value>,
) -> Option<Quote> {
    let bookmaker = bookmaker.trim();
    if bookmaker.is_empty() {
        return None;
    }

    // Outcome labels keep their case; surrounding whitespace is trimmed
    let outcome = outcome.map(str::trim).filter(|s| !s.is_empty())?;
    let price = parse_price(price.as_ref()?)?;

    Some(Quote {
        fixture_id: fixture_id.to_string(),
        outcome: outcome.to_string(),
        bookmaker: bookmaker.to_string(),
        price,
    })
}

/// Parse a decimal price from a JSON number or numeric string.
///
/// Parses the number's textual form rather than going through f64, so
/// prices like 2.10 stay exact. Prices at or below 1.0 are invalid.
fn parse_price(value: &Value) -> Option<Decimal> {
    let price = match value {
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok()?,
        Value::String(s) => Decimal::from_str(s.trim()).ok()?,
        _ => return None,
    };

    (price > Decimal::ONE).then_some(price)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
