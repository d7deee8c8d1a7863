//! Gemini-backed market commentary for the Analysis view.
//!
//! The caller always gets prose back: configuration and transport failures
//! map to fixed sentences the UI can show verbatim.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::entities::{SpotPrice, Trend, YardPrice};

const GEMINI_MODEL: &str = "gemini-3-flash-preview";
const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Shown when no API key is configured.
pub const ANALYST_UNAVAILABLE: &str =
    "Market analysis is currently unavailable due to missing configuration.";
/// Shown when the request itself fails.
pub const ANALYST_FAILED: &str = "Failed to generate market analysis. Please try again later.";

const PROMPT_SAMPLE_ROWS: usize = 10;

#[derive(Debug, Error)]
pub enum AnalystError {
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Generate the analyst report for the current market state.
pub async fn generate_market_analysis(
    http: &Client,
    prices: &[YardPrice],
    spot_prices: &[SpotPrice],
) -> String {
    let Ok(api_key) = std::env::var(API_KEY_ENV) else {
        tracing::error!("{API_KEY_ENV} is not set, analyst disabled");
        return ANALYST_UNAVAILABLE.to_string();
    };

    let prompt = build_analysis_prompt(prices, spot_prices);
    match call_gemini(http, &api_key, &prompt).await {
        Ok(report) => report,
        Err(error) => {
            tracing::error!("analyst request failed: {error}");
            ANALYST_FAILED.to_string()
        }
    }
}

async fn call_gemini(http: &Client, api_key: &str, prompt: &str) -> Result<String, AnalystError> {
    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/{GEMINI_MODEL}:generateContent?key={api_key}"
    );
    let body = GenerateRequest {
        contents: vec![RequestContent {
            parts: vec![RequestPart { text: prompt }],
        }],
    };

    let response = http
        .post(url)
        .json(&body)
        .timeout(Duration::from_secs(30))
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err(AnalystError::Api(format!("{status}: {text}")));
    }

    let data: GenerateResponse = response.json().await?;
    let report = data
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text)
        .unwrap_or_default();

    if report.is_empty() {
        Ok("No analysis could be generated.".to_string())
    } else {
        Ok(report)
    }
}

/// Build the report prompt from the top of the catalogue plus the spot set.
pub fn build_analysis_prompt(prices: &[YardPrice], spot_prices: &[SpotPrice]) -> String {
    let price_summary = prices
        .iter()
        .take(PROMPT_SAMPLE_ROWS)
        .map(|price| {
            let sign = if price.trend == Trend::Rising { "+" } else { "" };
            format!(
                "- {}: £{}/kg ({sign}{}%)",
                price.material, price.price_per_kg, price.change_percentage
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let spot_summary = spot_prices
        .iter()
        .map(|spot| format!("- {}: £{}/kg (Spot)", spot.metal, spot.price_gbp_per_kg))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a Senior Commodities Analyst specializing in the UK Scrap Metal market.\n\
         Analyze the following current scrap yard prices against the global spot prices.\n\
         \n\
         Current UK Scrap Yard Prices (Sample):\n\
         {price_summary}\n\
         \n\
         Current Global Spot Prices (LME Derived):\n\
         {spot_summary}\n\
         \n\
         Please provide a concise Professional Market Report (max 200 words) covering:\n\
         1. The spread between spot prices and scrap prices (yard margins).\n\
         2. Notable trends (which metals are rising/falling).\n\
         3. A brief recommendation for scrap dealers or sellers (e.g., \"Hold Copper\", \"Sell Lead\").\n\
         \n\
         Format the output with Markdown for headers and bullet points."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn yard(material: &str, price: f64, trend: Trend, change: f64) -> YardPrice {
        YardPrice {
            id: format!("mnc-{}-1", material.to_lowercase().replace(' ', "-")),
            material: material.to_string(),
            location: "Manchester".to_string(),
            price_per_kg: price,
            date: date!(2025 - 06 - 02),
            trend,
            change_percentage: change,
        }
    }

    #[test]
    fn prompt_samples_at_most_ten_yard_rows() {
        let prices: Vec<YardPrice> = (0..15)
            .map(|i| yard(&format!("Grade {i}"), 1.0 + i as f64, Trend::Flat, 0.0))
            .collect();
        let prompt = build_analysis_prompt(&prices, &[]);
        assert!(prompt.contains("- Grade 9:"));
        assert!(!prompt.contains("- Grade 10:"));
    }

    #[test]
    fn rising_rows_carry_a_plus_sign() {
        let prices = vec![
            yard("Dry Bright Wire", 6.1, Trend::Rising, 1.4),
            yard("Lead Scrap", 1.48, Trend::Falling, -0.8),
        ];
        let prompt = build_analysis_prompt(&prices, &[]);
        assert!(prompt.contains("- Dry Bright Wire: £6.1/kg (+1.4%)"));
        assert!(prompt.contains("- Lead Scrap: £1.48/kg (-0.8%)"));
    }

    #[test]
    fn spot_rows_are_marked_as_spot() {
        let spots = crate::infra::metalprice::default_spot_prices();
        let prompt = build_analysis_prompt(&[], &spots);
        assert!(prompt.contains("- Copper: £6.71/kg (Spot)"));
        assert!(prompt.contains("(LME Derived)"));
    }
}
