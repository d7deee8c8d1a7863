use dioxus::prelude::*;

use crate::{
    domain::{
        app_state::AppState,
        catalogue::today_utc,
        spot_match::{percent_of_spot, spot_reference},
    },
    ui::{
        components::{
            kpi_card::KpiCard,
            price_table::{PriceRow, PriceTable},
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
    util::export::export_report,
};

#[component]
pub fn DashboardPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let mut search = use_signal(String::new);

    let spot_prices = state.with(|st| st.spot_prices().to_vec());
    let catalogue = state.with(|st| st.catalogue().to_vec());
    let loading = state.with(|st| st.snapshot.is_none());

    let query = search().trim().to_lowercase();
    let rows: Vec<PriceRow> = catalogue
        .iter()
        .filter(|price| {
            query.is_empty()
                || price.material.to_lowercase().contains(&query)
                || price.location.to_lowercase().contains(&query)
        })
        .map(|price| {
            let spot_percent = spot_reference(&price.material, &spot_prices)
                .map(|spot| percent_of_spot(price.price_per_kg, spot.price_gbp_per_kg));
            PriceRow {
                id: price.id.clone(),
                material: price.material.clone(),
                location: price.location.clone(),
                price_per_kg: price.price_per_kg,
                price_per_tonne: price.price_per_tonne(),
                date: price.date.to_string(),
                trend: price.trend,
                change_percentage: price.change_percentage,
                spot_percent,
            }
        })
        .collect();
    let row_count = rows.len();

    let on_export = {
        let state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            let (catalogue, lines) =
                state.with(|st| (st.catalogue().to_vec(), st.calc_lines.clone()));
            match export_report(&catalogue, &lines, today_utc()) {
                Ok(paths) => push_toast(
                    toasts.clone(),
                    ToastKind::Success,
                    format!("Exported {} report file(s).", paths.len()),
                ),
                Err(err) => push_toast(
                    toasts.clone(),
                    ToastKind::Error,
                    format!("Export failed: {err}"),
                ),
            }
        }
    };

    rsx! {
        div { class: "space-y-8",
            section {
                class: "grid gap-4 sm:grid-cols-3 lg:grid-cols-4",
                for spot in spot_prices.iter() {
                    KpiCard {
                        title: format!("{} (Spot)", spot.metal),
                        value: format!("£{:.2}/kg", spot.price_gbp_per_kg),
                        description: Some(format!(
                            "${:.0}/tonne · {}",
                            spot.price_usd_per_tonne, spot.last_updated
                        )),
                    }
                }
            }

            section { class: "space-y-4",
                div { class: "flex flex-wrap items-end justify-between gap-4",
                    div { class: "flex-1 min-w-[220px]",
                        label { class: "{theme::LABEL}", "Search" }
                        input {
                            class: "{theme::INPUT}",
                            value: search(),
                            oninput: move |evt| search.set(evt.value()),
                            placeholder: "e.g. Dry Bright Wire or Sheffield",
                        }
                    }
                    div { class: "flex items-center gap-3",
                        span { class: "text-xs {theme::TEXT_MUTED}", "{row_count} prices" }
                        button {
                            class: "{theme::BTN_PRIMARY}",
                            onclick: on_export,
                            "Export Report"
                        }
                    }
                }

                if loading {
                    div { class: "{theme::PANEL_PAD} text-sm {theme::TEXT_MUTED}",
                        "Loading market data…"
                    }
                } else {
                    PriceTable { rows }
                }
            }
        }
    }
}
