//! Load valuation and trader-margin arithmetic for the calculator view.
//!
//! The engine only reads the active catalogue; a line whose material id no
//! longer resolves (the catalogue regenerates every refresh) values at zero
//! but its weight still counts toward the load total.

use rand::Rng;

use super::entities::{CalculatorLine, YardPrice};

/// Margin slider bounds: 0% (break even) to 50%, in 5% steps.
pub const MARGIN_MIN: u32 = 0;
pub const MARGIN_MAX: u32 = 50;
pub const MARGIN_STEP: u32 = 5;
pub const MARGIN_DEFAULT: u32 = 20;

pub fn resolve_material<'a>(catalogue: &'a [YardPrice], material_id: &str) -> Option<&'a YardPrice> {
    catalogue.iter().find(|price| price.id == material_id)
}

pub fn unit_price(catalogue: &[YardPrice], line: &CalculatorLine) -> f64 {
    resolve_material(catalogue, &line.material_id)
        .map(|price| price.price_per_kg)
        .unwrap_or(0.0)
}

pub fn line_total(catalogue: &[YardPrice], line: &CalculatorLine) -> f64 {
    unit_price(catalogue, line) * line.weight_kg
}

/// The most a dealer should pay per kilo after reserving `margin` percent.
pub fn offer_per_kg(unit_price: f64, margin_percent: u32) -> f64 {
    unit_price * (1.0 - margin_percent as f64 / 100.0)
}

/// Van Load mode totals.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LoadSummary {
    pub total_weight_kg: f64,
    pub total_value: f64,
}

pub fn summarise_load(catalogue: &[YardPrice], lines: &[CalculatorLine]) -> LoadSummary {
    let mut summary = LoadSummary::default();
    for line in lines {
        summary.total_weight_kg += line.weight_kg;
        summary.total_value += line_total(catalogue, line);
    }
    summary
}

/// Trader mode figures on top of the load total. By construction
/// `max_buy_price + est_profit == total_value`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraderSummary {
    pub max_buy_price: f64,
    pub est_profit: f64,
}

pub fn trader_summary(total_value: f64, margin_percent: u32) -> TraderSummary {
    let max_buy_price = total_value * (1.0 - margin_percent as f64 / 100.0);
    TraderSummary {
        max_buy_price,
        est_profit: total_value - max_buy_price,
    }
}

/// Append a line. Both a material and a positive weight are required; with
/// either missing the call is a no-op, matching the disabled add button.
pub fn add_line(lines: &mut Vec<CalculatorLine>, material_id: &str, weight_kg: f64) -> bool {
    if material_id.is_empty() || !(weight_kg > 0.0) {
        return false;
    }
    lines.push(CalculatorLine {
        id: new_line_id(&mut rand::thread_rng()),
        material_id: material_id.to_string(),
        weight_kg,
    });
    true
}

pub fn remove_line(lines: &mut Vec<CalculatorLine>, id: &str) {
    lines.retain(|line| line.id != id);
}

/// Nine base-36 characters from a fresh random draw.
pub fn new_line_id<R: Rng>(rng: &mut R) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    (0..9)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Trend;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use time::macros::date;

    fn yard(id: &str, material: &str, price: f64) -> YardPrice {
        YardPrice {
            id: id.to_string(),
            material: material.to_string(),
            location: "Manchester".to_string(),
            price_per_kg: price,
            date: date!(2025 - 06 - 02),
            trend: Trend::Flat,
            change_percentage: 0.0,
        }
    }

    fn line(id: &str, material_id: &str, weight: f64) -> CalculatorLine {
        CalculatorLine {
            id: id.to_string(),
            material_id: material_id.to_string(),
            weight_kg: weight,
        }
    }

    #[test]
    fn trader_mode_worked_example() {
        // Two lines at 20% margin: Copper Tube £5.95 × 10kg, Mixed Brass
        // £3.65 × 20kg.
        let catalogue = vec![
            yard("mnc-clean-copper-tube-1", "Clean Copper Tube", 5.95),
            yard("lon-mixed-brass-2", "Mixed Brass", 3.65),
        ];
        let lines = vec![
            line("a", "mnc-clean-copper-tube-1", 10.0),
            line("b", "lon-mixed-brass-2", 20.0),
        ];

        let load = summarise_load(&catalogue, &lines);
        assert!((load.total_value - 132.50).abs() < 1e-9);
        assert!((load.total_weight_kg - 30.0).abs() < 1e-9);

        let trader = trader_summary(load.total_value, 20);
        assert!((trader.max_buy_price - 106.00).abs() < 1e-9);
        assert!((trader.est_profit - 26.50).abs() < 1e-9);
    }

    #[test]
    fn buy_price_and_profit_always_sum_to_total() {
        for margin in (MARGIN_MIN..=MARGIN_MAX).step_by(MARGIN_STEP as usize) {
            let trader = trader_summary(987.65, margin);
            let sum = trader.max_buy_price + trader.est_profit;
            assert!((sum - 987.65).abs() / 987.65 < 1e-9, "margin {margin}");
        }
    }

    #[test]
    fn unknown_references_value_at_zero_but_still_weigh() {
        let catalogue = vec![yard("lee-lead-scrap-9", "Lead Scrap", 1.48)];
        let lines = vec![
            line("a", "lee-lead-scrap-9", 100.0),
            line("b", "gone-after-refresh", 40.0),
        ];
        let load = summarise_load(&catalogue, &lines);
        assert!((load.total_value - 148.0).abs() < 1e-9);
        assert!((load.total_weight_kg - 140.0).abs() < 1e-9);
        assert_eq!(unit_price(&catalogue, &lines[1]), 0.0);
    }

    #[test]
    fn add_requires_material_and_positive_weight() {
        let mut lines = Vec::new();
        assert!(!add_line(&mut lines, "", 10.0));
        assert!(!add_line(&mut lines, "mnc-zinc-1", 0.0));
        assert!(!add_line(&mut lines, "mnc-zinc-1", -3.0));
        assert!(!add_line(&mut lines, "mnc-zinc-1", f64::NAN));
        assert!(lines.is_empty());

        assert!(add_line(&mut lines, "mnc-zinc-1", 12.5));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].material_id, "mnc-zinc-1");
    }

    #[test]
    fn remove_deletes_only_the_named_line() {
        let mut lines = vec![line("a", "x", 1.0), line("b", "y", 2.0)];
        remove_line(&mut lines, "a");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].id, "b");
        remove_line(&mut lines, "missing");
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn line_ids_are_nine_base36_characters() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let id = new_line_id(&mut rng);
            assert_eq!(id.len(), 9);
            assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn offer_per_kg_applies_the_margin() {
        assert!((offer_per_kg(5.95, 20) - 4.76).abs() < 1e-9);
        assert!((offer_per_kg(5.95, 0) - 5.95).abs() < 1e-9);
    }

    #[test]
    fn per_line_offers_weigh_up_to_the_max_buy_price() {
        // The manifest's Offer Max column must agree with the headline
        // figure: Σ offer_per_kg(unit) × weight == max_buy_price.
        let catalogue = vec![
            yard("mnc-clean-copper-tube-1", "Clean Copper Tube", 5.95),
            yard("lon-mixed-brass-2", "Mixed Brass", 3.65),
        ];
        let lines = vec![
            line("a", "mnc-clean-copper-tube-1", 10.0),
            line("b", "lon-mixed-brass-2", 20.0),
        ];
        let load = summarise_load(&catalogue, &lines);
        for margin in (MARGIN_MIN..=MARGIN_MAX).step_by(MARGIN_STEP as usize) {
            let offered: f64 = lines
                .iter()
                .map(|l| offer_per_kg(unit_price(&catalogue, l), margin) * l.weight_kg)
                .sum();
            let trader = trader_summary(load.total_value, margin);
            assert!((offered - trader.max_buy_price).abs() < 1e-9, "margin {margin}");
        }
    }
}
