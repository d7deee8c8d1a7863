//! Client for the MetalpriceAPI spot feed.
//!
//! The feed quotes USD-base FX-style rates (1 USD = `rate` units of metal),
//! so the USD-per-tonne price is the reciprocal. Every failure path degrades
//! to the built-in default quotes; callers never see an error.

use std::collections::HashMap;

use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;
use time::{Date, OffsetDateTime};

use crate::domain::catalogue::today_utc;
use crate::domain::entities::SpotPrice;

const DEFAULT_BASE_URL: &str = "https://api.metalpriceapi.com/v1/latest";
const DEFAULT_API_KEY: &str = "d010e3a7723ea0a77529739518a01ad4";

/// Symbol the API uses for each metal we track.
const METAL_SYMBOLS: &[(&str, &str)] = &[
    ("XCU", "Copper"),
    ("ALU", "Aluminium"),
    ("ZNC", "Zinc"),
    ("XPB", "Lead"),
    ("NI", "Nickel"),
    ("XSN", "Tin"),
    ("IRON", "Iron Ore"),
    ("XLI", "Lithium"),
];

/// Ticker order on the dashboard, regardless of API response order.
const DISPLAY_ORDER: &[&str] = &[
    "Copper", "Aluminium", "Zinc", "Lead", "Nickel", "Tin", "Lithium", "Iron Ore",
];

const GBP_FALLBACK_RATE: f64 = 0.79;

#[derive(Debug, Error)]
pub enum SpotClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
}

#[derive(Debug, Deserialize)]
struct RatesEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    timestamp: Option<i64>,
    #[serde(default)]
    rates: Option<HashMap<String, f64>>,
}

/// Fetch the live spot set, falling back to [`default_spot_prices`] on any
/// network, API, or decode failure.
pub async fn fetch_live_spot_prices(http: &Client, api_key_override: Option<&str>) -> Vec<SpotPrice> {
    let key = api_key_override.unwrap_or_else(|| spot_api_key());
    match try_fetch(http, key).await {
        Ok(prices) => prices,
        Err(error) => {
            tracing::warn!("spot feed unavailable ({error}), using default quotes");
            default_spot_prices()
        }
    }
}

async fn try_fetch(http: &Client, api_key: &str) -> Result<Vec<SpotPrice>, SpotClientError> {
    let mut url = Url::parse(spot_base_url())?;
    let currencies = METAL_SYMBOLS
        .iter()
        .map(|(symbol, _)| *symbol)
        .chain(std::iter::once("GBP"))
        .collect::<Vec<_>>()
        .join(",");
    url.query_pairs_mut()
        .append_pair("api_key", api_key)
        .append_pair("base", "USD")
        .append_pair("currencies", &currencies);

    let response = http.get(url).send().await?.error_for_status()?;
    let envelope: RatesEnvelope = response.json().await?;
    let prices = normalise(envelope)?;
    if prices.is_empty() {
        return Err(SpotClientError::Api("no usable rates in response".into()));
    }
    Ok(prices)
}

/// Convert a raw envelope to display quotes. Errors when the envelope is
/// unsuccessful or carries no rates at all.
fn normalise(envelope: RatesEnvelope) -> Result<Vec<SpotPrice>, SpotClientError> {
    if !envelope.success {
        return Err(SpotClientError::Api("unsuccessful response".into()));
    }
    let rates = envelope
        .rates
        .ok_or_else(|| SpotClientError::Api("response missing rates".into()))?;

    let gbp_rate = rates
        .get("GBP")
        .copied()
        .filter(|rate| *rate > 0.0)
        .unwrap_or(GBP_FALLBACK_RATE);
    let last_updated = timestamp_date(envelope.timestamp);

    let mut prices = Vec::new();
    for (symbol, name) in METAL_SYMBOLS {
        let Some(rate) = rates.get(*symbol).copied().filter(|rate| *rate > 0.0) else {
            continue;
        };

        let mut price_usd = 1.0 / rate;
        // Some provider tiers quote copper per pound instead of per tonne.
        // A tonne of copper is ~$9000, a pound ~$4, so anything under 100
        // is treated as per-pound and scaled up.
        if *symbol == "XCU" && price_usd < 100.0 {
            price_usd *= 2204.62;
        }

        prices.push(SpotPrice {
            metal: (*name).to_string(),
            price_usd_per_tonne: price_usd,
            price_gbp_per_kg: price_usd * gbp_rate / 1000.0,
            last_updated,
        });
    }

    prices.sort_by_key(|price| display_position(&price.metal));
    Ok(prices)
}

fn display_position(metal: &str) -> usize {
    DISPLAY_ORDER
        .iter()
        .position(|name| *name == metal)
        .unwrap_or(DISPLAY_ORDER.len())
}

fn timestamp_date(timestamp: Option<i64>) -> Date {
    timestamp
        .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok())
        .map(|datetime| datetime.date())
        .unwrap_or_else(today_utc)
}

/// The quotes shown before the first fetch lands and whenever the feed
/// fails. Copper leads at 8500 USD/t, £6.71/kg.
pub fn default_spot_prices() -> Vec<SpotPrice> {
    let today = today_utc();
    [
        ("Copper", 8500.0, 6.71),
        ("Aluminium", 2200.0, 1.74),
        ("Zinc", 2500.0, 1.97),
        ("Lead", 2100.0, 1.66),
        ("Nickel", 16000.0, 12.64),
    ]
    .into_iter()
    .map(|(metal, usd, gbp)| SpotPrice {
        metal: metal.to_string(),
        price_usd_per_tonne: usd,
        price_gbp_per_kg: gbp,
        last_updated: today,
    })
    .collect()
}

fn spot_base_url() -> &'static str {
    static BASE_URL: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    BASE_URL
        .get_or_init(|| std::env::var("SCRAP_ENGINE_SPOT_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()))
        .as_str()
}

fn spot_api_key() -> &'static str {
    static API_KEY: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    API_KEY
        .get_or_init(|| std::env::var("SCRAP_ENGINE_SPOT_API_KEY").unwrap_or_else(|_| DEFAULT_API_KEY.to_string()))
        .as_str()
}
