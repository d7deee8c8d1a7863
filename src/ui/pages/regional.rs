use dioxus::prelude::*;

use crate::{
    domain::{
        app_state::AppState,
        catalogue::region_names,
        entities::YardPrice,
        history::history_series,
        spot_match::{material_category, CATEGORIES},
    },
    ui::{components::sparkline::Sparkline, theme},
};

const ALL: &str = "All";

fn row_matches(price: &YardPrice, query: &str, city: &str, category: &str) -> bool {
    (query.is_empty() || price.material.to_lowercase().contains(query))
        && (city == ALL || price.location == city)
        && (category == ALL || material_category(&price.material) == category)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum SortKey {
    Material,
    Location,
    Price,
    Change,
}

#[component]
pub fn RegionalPage() -> Element {
    let state = use_context::<Signal<AppState>>();

    let mut search = use_signal(String::new);
    let mut city_filter = use_signal(|| ALL.to_string());
    let mut category_filter = use_signal(|| ALL.to_string());
    let sort_key = use_signal(|| SortKey::Price);
    let sort_asc = use_signal(|| false);

    let catalogue = state.with(|st| st.catalogue().to_vec());

    let query = search().trim().to_lowercase();
    let city = city_filter();
    let category = category_filter();
    let mut rows: Vec<_> = catalogue
        .iter()
        .filter(|price| row_matches(price, &query, &city, &category))
        .cloned()
        .collect();

    let key = sort_key();
    let asc = sort_asc();
    rows.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Material => a.material.cmp(&b.material),
            SortKey::Location => a.location.cmp(&b.location),
            SortKey::Price => a
                .price_per_kg
                .partial_cmp(&b.price_per_kg)
                .unwrap_or(std::cmp::Ordering::Equal),
            SortKey::Change => a
                .change_percentage
                .partial_cmp(&b.change_percentage)
                .unwrap_or(std::cmp::Ordering::Equal),
        };
        if asc {
            ordering
        } else {
            ordering.reverse()
        }
    });
    let row_count = rows.len();

    let sort_handler = |target: SortKey| {
        let mut sort_key = sort_key.clone();
        let mut sort_asc = sort_asc.clone();
        move |_| {
            if *sort_key.peek() == target {
                sort_asc.with_mut(|asc| *asc = !*asc);
            } else {
                sort_key.set(target);
                sort_asc.set(matches!(target, SortKey::Material | SortKey::Location));
            }
        }
    };

    rsx! {
        div { class: "space-y-6",
            section { class: "flex flex-wrap items-end gap-4",
                div { class: "w-56",
                    label { class: "{theme::LABEL}", "Search" }
                    input {
                        class: "{theme::INPUT}",
                        value: search(),
                        oninput: move |evt| search.set(evt.value()),
                        placeholder: "Search material...",
                    }
                }
                div { class: "w-56",
                    label { class: "{theme::LABEL}", "City" }
                    select {
                        class: "{theme::INPUT}",
                        value: city_filter(),
                        onchange: move |evt| city_filter.set(evt.value()),
                        option { value: ALL, "{ALL}" }
                        for name in region_names() {
                            option { value: "{name}", "{name}" }
                        }
                    }
                }
                div { class: "w-56",
                    label { class: "{theme::LABEL}", "Category" }
                    select {
                        class: "{theme::INPUT}",
                        value: category_filter(),
                        onchange: move |evt| category_filter.set(evt.value()),
                        option { value: ALL, "{ALL}" }
                        for name in CATEGORIES {
                            option { value: "{name}", "{name}" }
                        }
                    }
                }
                span { class: "pb-2 text-xs {theme::TEXT_MUTED}", "{row_count} prices" }
            }

            if rows.is_empty() {
                div { class: "{theme::PANEL_PAD} text-sm {theme::TEXT_MUTED}",
                    "No prices match the current filter."
                }
            } else {
                div { class: "{theme::TABLE_CONTAINER}",
                    table { class: "w-full text-sm",
                        thead {
                            tr { class: "{theme::TABLE_HEADER}",
                                th { class: "px-4 py-3 text-left",
                                    button { class: "{theme::BTN_LINK}", onclick: sort_handler(SortKey::Material), "Material ↕" }
                                }
                                th { class: "px-4 py-3 text-left",
                                    button { class: "{theme::BTN_LINK}", onclick: sort_handler(SortKey::Location), "Location ↕" }
                                }
                                th { class: "px-4 py-3 text-right",
                                    button { class: "{theme::BTN_LINK}", onclick: sort_handler(SortKey::Price), "£/kg ↕" }
                                }
                                th { class: "px-4 py-3 text-right",
                                    button { class: "{theme::BTN_LINK}", onclick: sort_handler(SortKey::Change), "Change ↕" }
                                }
                                th { class: "px-4 py-3 text-left", "7 Days" }
                            }
                        }
                        tbody { class: "{theme::TABLE_DIVIDER}",
                            for price in rows {
                                tr { key: "{price.id}",
                                    td { class: "px-4 py-3 font-medium text-slate-800", "{price.material}" }
                                    td { class: "px-4 py-3 {theme::TEXT_MUTED}", "{price.location}" }
                                    td { class: "px-4 py-3 text-right font-semibold text-slate-800",
                                        "£{price.price_per_kg:.2}"
                                    }
                                    td { class: "px-4 py-3 text-right font-medium {theme::trend_text(price.trend)}",
                                        "{price.trend.arrow()} {price.change_percentage}%"
                                    }
                                    td { class: "px-4 py-3",
                                        Sparkline {
                                            values: history_series(&price)
                                                .iter()
                                                .map(|point| point.price)
                                                .collect::<Vec<f64>>(),
                                            trend: price.trend,
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
