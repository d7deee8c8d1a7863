//! Fuzzy mapping from a yard material name to the spot metal that anchors
//! its valuation, plus the "percent of spot" badge shown beside each row.

use super::entities::SpotPrice;

/// First matching rule wins, evaluated on the lowercased material name.
/// Brass is deliberately pegged to Copper: it is a copper-zinc alloy and the
/// copper leg dominates the valuation.
pub fn spot_reference<'a>(material: &str, spot_set: &'a [SpotPrice]) -> Option<&'a SpotPrice> {
    let name = material.to_lowercase();
    let metal = if name.contains("copper") || name.contains("wire") || name.contains("tube") {
        "Copper"
    } else if name.contains("brass") || name.contains("gun") {
        "Copper"
    } else if name.contains("alu") {
        "Aluminium"
    } else if name.contains("lead") || name.contains("batter") {
        "Lead"
    } else if name.contains("stainless") {
        "Nickel"
    } else {
        return None;
    };
    spot_set.iter().find(|spot| spot.metal == metal)
}

/// Rounded percentage the yard pays relative to spot.
pub fn percent_of_spot(yard_price_per_kg: f64, spot_price_per_kg: f64) -> i64 {
    (yard_price_per_kg / spot_price_per_kg * 100.0).round() as i64
}

/// Badge buckets for the vs-spot column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpotBadge {
    Strong,
    Fair,
    Weak,
}

impl SpotBadge {
    pub fn from_percent(percent: i64) -> Self {
        if percent > 80 {
            SpotBadge::Strong
        } else if percent > 60 {
            SpotBadge::Fair
        } else {
            SpotBadge::Weak
        }
    }
}

/// Coarse material buckets for the regional view's category filter.
pub const CATEGORIES: &[&str] = &[
    "Copper",
    "Aluminium",
    "Brass",
    "Lead",
    "Steel",
    "Motors",
    "Other",
];

pub fn material_category(material: &str) -> &'static str {
    let name = material.to_lowercase();
    if name.contains("copper") || name.contains("wire") {
        "Copper"
    } else if name.contains("alu") {
        "Aluminium"
    } else if name.contains("brass") || name.contains("gun") {
        "Brass"
    } else if name.contains("lead") || name.contains("batter") {
        "Lead"
    } else if name.contains("steel") || name.contains("iron") {
        "Steel"
    } else if name.contains("motor") {
        "Motors"
    } else {
        "Other"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::metalprice::default_spot_prices;

    #[test]
    fn matcher_resolves_the_expected_metals() {
        let spots = default_spot_prices();
        let metal = |name: &str| spot_reference(name, &spots).map(|s| s.metal.as_str());

        assert_eq!(metal("Dry Bright Wire"), Some("Copper"));
        assert_eq!(metal("Mixed Brass"), Some("Copper"));
        assert_eq!(metal("Clean Aluminium Wheels"), Some("Aluminium"));
        assert_eq!(metal("Lead Acid Batteries"), Some("Lead"));
        assert_eq!(metal("Stainless Steel 304"), Some("Nickel"));
        assert_eq!(metal("Electric Motors"), None);
    }

    #[test]
    fn copper_rules_fire_before_the_alloy_rules() {
        // "Gun Metal" only matches via the brass/gun rule; copper terms win
        // outright when both could apply.
        let spots = default_spot_prices();
        assert_eq!(
            spot_reference("Gun Metal", &spots).map(|s| s.metal.as_str()),
            Some("Copper")
        );
        assert_eq!(
            spot_reference("Copper Tanks", &spots).map(|s| s.metal.as_str()),
            Some("Copper")
        );
    }

    #[test]
    fn badge_thresholds_are_exact() {
        assert_eq!(SpotBadge::from_percent(81), SpotBadge::Strong);
        assert_eq!(SpotBadge::from_percent(80), SpotBadge::Fair);
        assert_eq!(SpotBadge::from_percent(61), SpotBadge::Fair);
        assert_eq!(SpotBadge::from_percent(60), SpotBadge::Weak);
        assert_eq!(SpotBadge::from_percent(0), SpotBadge::Weak);
    }

    #[test]
    fn percent_of_spot_rounds_to_nearest() {
        assert_eq!(percent_of_spot(5.95, 6.71), 89);
        assert_eq!(percent_of_spot(1.10, 1.74), 63);
        assert_eq!(percent_of_spot(0.65, 1.66), 39);
    }

    #[test]
    fn categories_cover_the_catalogue() {
        assert_eq!(material_category("Household Cable"), "Other");
        assert_eq!(material_category("HMS 1/2 Steel"), "Steel");
        assert_eq!(material_category("Starter Motors"), "Motors");
        assert_eq!(material_category("Aluminium Cans"), "Aluminium");
    }
}
