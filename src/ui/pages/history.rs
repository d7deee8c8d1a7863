use dioxus::prelude::*;

use crate::{
    domain::{app_state::AppState, history::history_series},
    ui::{components::trend_chart::TrendChart, theme},
};

/// Cap the grid so a full 435-row catalogue cannot render hundreds of SVGs.
const MAX_CHARTS: usize = 24;

#[component]
pub fn HistoryPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let mut search = use_signal(String::new);

    let catalogue = state.with(|st| st.catalogue().to_vec());
    let query = search().trim().to_lowercase();

    let matching: Vec<_> = catalogue
        .iter()
        .filter(|price| {
            query.is_empty()
                || price.material.to_lowercase().contains(&query)
                || price.location.to_lowercase().contains(&query)
        })
        .cloned()
        .collect();
    let total = matching.len();
    let shown: Vec<_> = matching.into_iter().take(MAX_CHARTS).collect();
    let shown_count = shown.len();

    rsx! {
        div { class: "space-y-6",
            section { class: "flex flex-wrap items-end justify-between gap-4",
                div { class: "flex-1 min-w-[220px]",
                    label { class: "{theme::LABEL}", "Search" }
                    input {
                        class: "{theme::INPUT}",
                        value: search(),
                        oninput: move |evt| search.set(evt.value()),
                        placeholder: "Filter materials or cities",
                    }
                }
                span { class: "pb-2 text-xs {theme::TEXT_MUTED}",
                    if total > shown_count {
                        "Showing {shown_count} of {total} charts; narrow the search for more."
                    } else {
                        "{shown_count} charts"
                    }
                }
            }

            if shown.is_empty() {
                div { class: "{theme::PANEL_PAD} text-sm {theme::TEXT_MUTED}",
                    "No materials match the current search."
                }
            } else {
                section { class: "grid gap-4 sm:grid-cols-2 lg:grid-cols-3",
                    for price in shown {
                        TrendChart {
                            key: "{price.id}",
                            material: price.material.clone(),
                            location: price.location.clone(),
                            price_per_kg: price.price_per_kg,
                            trend: price.trend,
                            points: history_series(&price),
                        }
                    }
                }
            }
        }
    }
}
