use dioxus::prelude::*;

use crate::domain::spot_match::SpotBadge;

/// Pill showing how a yard quote compares to the matched spot price.
#[component]
pub fn SpotBadgeView(percent: i64) -> Element {
    let badge = SpotBadge::from_percent(percent);
    let (label, color) = match badge {
        SpotBadge::Strong => (
            "Strong",
            "bg-emerald-100 text-emerald-700 border-emerald-300",
        ),
        SpotBadge::Fair => ("Fair", "bg-amber-100 text-amber-700 border-amber-300"),
        SpotBadge::Weak => ("Weak", "bg-rose-100 text-rose-700 border-rose-300"),
    };

    rsx! {
        span {
            class: "inline-flex items-center rounded-full border px-2 py-0.5 text-xs font-medium {color}",
            "{percent}% {label}"
        }
    }
}
