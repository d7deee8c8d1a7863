use dioxus::prelude::*;

use crate::domain::entities::Trend;
use crate::ui::components::spot_badge::SpotBadgeView;
use crate::ui::theme;

#[derive(Clone, PartialEq)]
pub struct PriceRow {
    pub id: String,
    pub material: String,
    pub location: String,
    pub price_per_kg: f64,
    pub price_per_tonne: f64,
    pub date: String,
    pub trend: Trend,
    pub change_percentage: f64,
    /// Yard price as a percent of the matched spot quote, when one matches.
    pub spot_percent: Option<i64>,
}

#[component]
pub fn PriceTable(rows: Vec<PriceRow>) -> Element {
    if rows.is_empty() {
        return rsx! {
            div { class: "{theme::PANEL_PAD} text-sm {theme::TEXT_MUTED}",
                "No prices match the current filter."
            }
        };
    }

    rsx! {
        div { class: "{theme::TABLE_CONTAINER}",
            table { class: "w-full text-sm",
                thead {
                    tr { class: "{theme::TABLE_HEADER}",
                        th { class: "px-4 py-3 text-left", "Material" }
                        th { class: "px-4 py-3 text-left", "Location" }
                        th { class: "px-4 py-3 text-right", "£/kg" }
                        th { class: "px-4 py-3 text-right", "£/tonne" }
                        th { class: "px-4 py-3 text-left", "Date" }
                        th { class: "px-4 py-3 text-right", "Change" }
                        th { class: "px-4 py-3 text-left", "vs Spot" }
                    }
                }
                tbody { class: "{theme::TABLE_DIVIDER}",
                    for row in rows {
                        tr { key: "{row.id}",
                            td { class: "px-4 py-3 font-medium text-slate-800", "{row.material}" }
                            td { class: "px-4 py-3 {theme::TEXT_MUTED}", "{row.location}" }
                            td { class: "px-4 py-3 text-right font-semibold text-slate-800",
                                "£{row.price_per_kg:.2}"
                            }
                            td { class: "px-4 py-3 text-right {theme::TEXT_MUTED}",
                                "£{row.price_per_tonne:.0}"
                            }
                            td { class: "px-4 py-3 {theme::TEXT_MUTED}", "{row.date}" }
                            td { class: "px-4 py-3 text-right font-medium {theme::trend_text(row.trend)}",
                                "{row.trend.arrow()} {row.change_percentage}%"
                            }
                            td { class: "px-4 py-3",
                                if let Some(percent) = row.spot_percent {
                                    SpotBadgeView { percent }
                                } else {
                                    span { class: "text-xs {theme::TEXT_MUTED}", "-" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
