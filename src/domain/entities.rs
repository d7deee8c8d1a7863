use serde::{Deserialize, Serialize};
use time::Date;

/// Direction of a quote over the last observation interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
    Flat,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Rising => "▲",
            Trend::Falling => "▼",
            Trend::Flat => "—",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trend::Rising => "UP",
            Trend::Falling => "DOWN",
            Trend::Flat => "FLAT",
        }
    }
}

/// A priced offering at one yard for one material grade.
///
/// `price_per_kg * 1000.0` is the £/tonne figure shown in tables; both
/// columns derive from the same value so they can never drift apart.
#[derive(Clone, Debug, PartialEq)]
pub struct YardPrice {
    /// Stable id, unique across the whole catalogue.
    pub id: String,
    /// Human-readable grade name, e.g. "Dry Bright Wire".
    pub material: String,
    /// City the yard quotes from.
    pub location: String,
    /// Non-negative, GBP.
    pub price_per_kg: f64,
    /// Calendar date of the quote.
    pub date: Date,
    pub trend: Trend,
    /// Signed percent; sign agrees with `trend` (zero when flat).
    pub change_percentage: f64,
}

impl YardPrice {
    pub fn price_per_tonne(&self) -> f64 {
        self.price_per_kg * 1000.0
    }
}

/// One global metal quote from the spot feed (or the built-in defaults).
#[derive(Clone, Debug, PartialEq)]
pub struct SpotPrice {
    /// Canonical name: Copper, Aluminium, Zinc, Lead, Nickel, Tin, Lithium, Iron Ore.
    pub metal: String,
    pub price_usd_per_tonne: f64,
    /// Derived as `price_usd_per_tonne * gbp_per_usd / 1000` with the batch FX rate.
    pub price_gbp_per_kg: f64,
    pub last_updated: Date,
}

/// One entry in the operator's load tally. This is also the persisted form:
/// the serde names mirror the on-disk JSON exactly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorLine {
    pub id: String,
    /// References a YardPrice id in the active catalogue. The catalogue is
    /// regenerated on every refresh, so a stale reference is legal and the
    /// line renders as "Unknown" at zero unit price.
    pub material_id: String,
    pub weight_kg: f64,
}

/// The immutable pair owned by the refresh coordinator. Views read it by
/// reference; only the coordinator replaces it, and always as a whole.
#[derive(Clone, Debug, PartialEq)]
pub struct MarketSnapshot {
    pub catalogue: Vec<YardPrice>,
    pub spot_set: Vec<SpotPrice>,
    pub fetched_at: Date,
}
