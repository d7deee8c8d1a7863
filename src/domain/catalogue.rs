//! Regional yard-price catalogue, regenerated on every refresh tick.
//!
//! One row per (region, material) pair: base price × regional multiplier ×
//! a narrow daily jitter. The jitter window keeps the catalogue reading like
//! a plausible quote sheet; the ±0.002 dead-band stops microscopic noise
//! from being badged as a trend.

use std::collections::HashSet;

use rand::Rng;
use time::{Date, OffsetDateTime};

use super::entities::{Trend, YardPrice};

/// Base £/kg for every grade the catalogue carries.
pub const BASE_PRICES: &[(&str, f64)] = &[
    ("Dry Bright Wire", 6.45),
    ("Clean Copper Tube", 5.95),
    ("Heavy Copper", 5.65),
    ("Braziery Copper", 5.10),
    ("Copper Tanks", 5.25),
    ("Mixed Brass", 3.65),
    ("Clean Brass", 3.85),
    ("Brass Cuttings", 3.75),
    ("Gun Metal", 4.25),
    ("Lead Scrap", 1.48),
    ("Lead Acid Batteries", 0.65),
    ("Clean Aluminium Wheels", 1.45),
    ("Old Rolled Aluminium", 1.08),
    ("Clean Aluminium Cuttings", 1.12),
    ("Cast Aluminium", 1.18),
    ("Aluminium Turnings", 0.75),
    ("Aluminium Cans", 0.85),
    ("Stainless Steel 304", 1.30),
    ("Stainless Steel 316", 1.80),
    ("Light Iron", 0.18),
    ("HMS 1/2 Steel", 0.25),
    ("Electric Motors", 0.58),
    ("Household Cable", 1.90),
    ("Low Grade Cable", 0.95),
    ("Armoured Cable", 1.50),
    ("Zinc", 1.15),
    ("Alternators", 0.65),
    ("Starter Motors", 0.60),
    // Average unit price treated as per-kg so it fits the schema.
    ("Catalytic Converters", 45.00),
];

/// Regional variance factors: London pays 2% over base, Belfast 4% under.
pub const REGIONS: &[(&str, f64)] = &[
    ("London", 1.02),
    ("Birmingham", 1.01),
    ("Manchester", 1.00),
    ("Liverpool", 0.99),
    ("Glasgow", 0.98),
    ("Leeds", 1.00),
    ("Sheffield", 1.01),
    ("Bristol", 0.99),
    ("Newcastle", 0.97),
    ("Leicester", 0.99),
    ("Cardiff", 0.98),
    ("Belfast", 0.96),
    ("Nottingham", 0.99),
    ("Southampton", 1.01),
    ("Portsmouth", 1.00),
];

/// Jitter outside ±0.002 of par is reported as a trend; inside it the row
/// stays flat with a zero change.
const TREND_DEAD_BAND: f64 = 0.002;

/// Generate the full catalogue with a fresh RNG, dated around `today`.
pub fn generate_catalogue(today: Date) -> Vec<YardPrice> {
    generate_catalogue_with_rng(&mut rand::thread_rng(), today)
}

/// RNG-parameterised variant so tests can run against a seeded generator.
pub fn generate_catalogue_with_rng<R: Rng>(rng: &mut R, today: Date) -> Vec<YardPrice> {
    let yesterday = today.previous_day().unwrap_or(today);
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut catalogue = Vec::with_capacity(REGIONS.len() * BASE_PRICES.len());

    for &(city, multiplier) in REGIONS {
        for &(material, base_price) in BASE_PRICES {
            let fluctuation: f64 = rng.gen_range(0.99..=1.01);
            let price_per_kg = round2(base_price * multiplier * fluctuation);

            let (trend, change_percentage) = if fluctuation > 1.0 + TREND_DEAD_BAND {
                (Trend::Rising, round1((fluctuation - 1.0) * 100.0))
            } else if fluctuation < 1.0 - TREND_DEAD_BAND {
                (Trend::Falling, -round1((1.0 - fluctuation) * 100.0))
            } else {
                (Trend::Flat, 0.0)
            };

            let date = if rng.gen_bool(0.7) { today } else { yesterday };
            let id = unique_id(rng, &mut seen_ids, city, material);

            catalogue.push(YardPrice {
                id,
                material: material.to_string(),
                location: city.to_string(),
                price_per_kg,
                date,
                trend,
                change_percentage,
            });
        }
    }

    catalogue
}

/// `fir-clean-copper-tube-042` style id; collisions redraw only the numeric
/// suffix until the id is unique across the catalogue.
fn unique_id<R: Rng>(rng: &mut R, seen: &mut HashSet<String>, city: &str, material: &str) -> String {
    let prefix: String = city.to_lowercase().chars().take(3).collect();
    let slug = slug(material);
    loop {
        let candidate = format!("{prefix}-{slug}-{}", rng.gen_range(0..1000));
        if seen.insert(candidate.clone()) {
            return candidate;
        }
    }
}

/// Lowercase, whitespace to hyphens, everything else outside [a-z0-9-] dropped.
fn slug(material: &str) -> String {
    material
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// All distinct cities in catalogue order, for the regional filter dropdown.
pub fn region_names() -> Vec<&'static str> {
    REGIONS.iter().map(|(city, _)| *city).collect()
}

/// Today's UTC calendar date; the generator and the coordinator share this.
pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use time::macros::date;

    fn catalogue(seed: u64) -> Vec<YardPrice> {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_catalogue_with_rng(&mut rng, date!(2025 - 06 - 02))
    }

    #[test]
    fn one_row_per_region_material_pair() {
        let rows = catalogue(7);
        assert_eq!(rows.len(), REGIONS.len() * BASE_PRICES.len());
    }

    #[test]
    fn ids_are_unique_across_the_catalogue() {
        for seed in 0..20 {
            let rows = catalogue(seed);
            let ids: HashSet<_> = rows.iter().map(|r| r.id.as_str()).collect();
            assert_eq!(ids.len(), rows.len(), "duplicate id with seed {seed}");
        }
    }

    #[test]
    fn change_sign_agrees_with_trend() {
        for row in catalogue(11) {
            match row.trend {
                Trend::Rising => assert!(row.change_percentage > 0.0, "{}", row.id),
                Trend::Falling => assert!(row.change_percentage < 0.0, "{}", row.id),
                Trend::Flat => assert_eq!(row.change_percentage, 0.0, "{}", row.id),
            }
        }
    }

    #[test]
    fn prices_stay_inside_the_jitter_window() {
        for row in catalogue(3) {
            let base = BASE_PRICES
                .iter()
                .find(|(name, _)| *name == row.material)
                .map(|(_, price)| *price)
                .unwrap();
            let multiplier = REGIONS
                .iter()
                .find(|(city, _)| *city == row.location)
                .map(|(_, m)| *m)
                .unwrap();
            let lo = base * multiplier * 0.99;
            let hi = base * multiplier * 1.01;
            // round2 can nudge the value just past the raw bounds.
            assert!(row.price_per_kg >= lo - 0.005 && row.price_per_kg <= hi + 0.005);
            assert!(row.price_per_kg >= 0.0);
        }
    }

    #[test]
    fn tonne_price_is_exactly_kg_times_thousand() {
        for row in catalogue(5) {
            assert_eq!(row.price_per_tonne(), row.price_per_kg * 1000.0);
        }
    }

    #[test]
    fn dates_are_today_or_yesterday() {
        let today = date!(2025 - 06 - 02);
        let yesterday = date!(2025 - 06 - 01);
        for row in catalogue(13) {
            assert!(row.date == today || row.date == yesterday);
        }
    }

    #[test]
    fn slug_strips_punctuation_and_joins_with_hyphens() {
        assert_eq!(slug("HMS 1/2 Steel"), "hms-12-steel");
        assert_eq!(slug("Dry Bright Wire"), "dry-bright-wire");
        assert_eq!(slug("Zinc"), "zinc");
    }
}
