use dioxus::prelude::*;

use crate::{
    app::persist_calc_lines,
    domain::{
        app_state::AppState,
        catalogue::today_utc,
        valuation::{
            self, offer_per_kg, summarise_load, trader_summary, MARGIN_MAX, MARGIN_MIN,
            MARGIN_STEP,
        },
    },
    ui::{
        components::{
            kpi_card::KpiCard,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
    util::export::export_report,
};

#[component]
pub fn CalculatorPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let mut material_select = use_signal(String::new);
    let mut weight_input = use_signal(String::new);
    let mut clear_armed = use_signal(|| false);

    let catalogue = state.with(|st| st.catalogue().to_vec());
    let lines = state.with(|st| st.calc_lines.clone());
    let trader_mode = state.with(|st| st.trader_mode);
    let margin = state.with(|st| st.margin_percent);

    let summary = summarise_load(&catalogue, &lines);
    let trader = trader_summary(summary.total_value, margin);

    // Live preview of the capped offer for the material being added.
    let selected_id = material_select();
    let offer_preview = (!selected_id.is_empty() && trader_mode)
        .then(|| valuation::resolve_material(&catalogue, &selected_id))
        .flatten()
        .map(|price| {
            format!(
                "Max offer for {}: £{:.2}/kg at {margin}% margin",
                price.material,
                offer_per_kg(price.price_per_kg, margin)
            )
        });

    let line_rows: Vec<_> = lines
        .iter()
        .map(|line| {
            let material = valuation::resolve_material(&catalogue, &line.material_id)
                .map(|price| price.material.clone())
                .unwrap_or_else(|| "Unknown".to_string());
            let unit = valuation::unit_price(&catalogue, line);
            (line.id.clone(), material, line.weight_kg, unit, unit * line.weight_kg)
        })
        .collect();

    let on_submit = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let material_id = material_select().trim().to_string();
            let weight = weight_input().trim().parse::<f64>().unwrap_or(0.0);

            let added = state.with_mut(|st| valuation::add_line(&mut st.calc_lines, &material_id, weight));
            if added {
                weight_input.set(String::new());
                persist_calc_lines(&state);
            } else {
                push_toast(
                    toasts.clone(),
                    ToastKind::Warning,
                    "Pick a material and enter a positive weight.",
                );
            }
        }
    };

    let on_remove = {
        let mut state = state.clone();
        move |id: String| {
            state.with_mut(|st| valuation::remove_line(&mut st.calc_lines, &id));
            persist_calc_lines(&state);
        }
    };

    // Two-step clear: the first press arms the button, the second wipes.
    let on_clear = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            if *clear_armed.peek() {
                state.with_mut(|st| st.calc_lines.clear());
                persist_calc_lines(&state);
                clear_armed.set(false);
                push_toast(toasts.clone(), ToastKind::Info, "Calculator cleared.");
            } else {
                clear_armed.set(true);
            }
        }
    };

    let mut on_mode_toggle = {
        let mut state = state.clone();
        move |enabled: bool| {
            state.with_mut(|st| st.trader_mode = enabled);
        }
    };

    let on_margin = {
        let mut state = state.clone();
        move |evt: FormEvent| {
            if let Ok(value) = evt.value().parse::<u32>() {
                state.with_mut(|st| st.margin_percent = value.clamp(MARGIN_MIN, MARGIN_MAX));
            }
        }
    };

    let on_export = {
        let state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            let (catalogue, lines) =
                state.with(|st| (st.catalogue().to_vec(), st.calc_lines.clone()));
            if lines.is_empty() {
                push_toast(toasts.clone(), ToastKind::Warning, "Nothing to export yet.");
                return;
            }
            match export_report(&catalogue, &lines, today_utc()) {
                Ok(_) => push_toast(toasts.clone(), ToastKind::Success, "Receipt exported."),
                Err(err) => push_toast(
                    toasts.clone(),
                    ToastKind::Error,
                    format!("Export failed: {err}"),
                ),
            }
        }
    };

    let clear_label = if clear_armed() { "Really clear?" } else { "Clear All" };

    rsx! {
        div { class: "space-y-8",
            section { class: "grid gap-4 sm:grid-cols-3",
                KpiCard {
                    title: "Total Weight".to_string(),
                    value: format!("{} kg", summary.total_weight_kg),
                    description: Some(format!("{} line(s)", line_rows.len())),
                }
                if trader_mode {
                    KpiCard {
                        title: "Max Buy Price".to_string(),
                        value: format!("£{:.2}", trader.max_buy_price),
                        description: Some(format!("at {margin}% margin")),
                    }
                    KpiCard {
                        title: "Est. Profit".to_string(),
                        value: format!("£{:.2}", trader.est_profit),
                        description: Some(format!("resale value £{:.2}", summary.total_value)),
                    }
                } else {
                    KpiCard {
                        title: "Load Value".to_string(),
                        value: format!("£{:.2}", summary.total_value),
                        description: Some("At current yard prices".to_string()),
                    }
                    KpiCard {
                        title: "Mode".to_string(),
                        value: "Van Load".to_string(),
                        description: Some("Switch to Trader Mode for margin maths".to_string()),
                    }
                }
            }

            section { class: "flex flex-wrap items-center gap-3",
                ModeButton {
                    active: !trader_mode,
                    label: "🚚 Van Load",
                    onclick: {
                        let mut on_mode_toggle = on_mode_toggle.clone();
                        move |_| on_mode_toggle(false)
                    },
                }
                ModeButton {
                    active: trader_mode,
                    label: "💼 Trader Mode",
                    onclick: move |_| on_mode_toggle(true),
                }
                if trader_mode {
                    div { class: "flex items-center gap-3 rounded-xl border border-slate-200 bg-white px-4 py-2",
                        label { class: "text-xs font-semibold uppercase text-slate-500",
                            "Margin {margin}%"
                        }
                        input {
                            r#type: "range",
                            min: "{MARGIN_MIN}",
                            max: "{MARGIN_MAX}",
                            step: "{MARGIN_STEP}",
                            value: "{margin}",
                            oninput: on_margin,
                        }
                    }
                }
            }

            section { class: "space-y-4",
                form {
                    class: "flex flex-wrap items-end gap-4 {theme::PANEL} px-4 py-4",
                    onsubmit: on_submit,
                    div { class: "flex-1 min-w-[260px]",
                        label { class: "{theme::LABEL}", "Material" }
                        select {
                            class: "{theme::INPUT}",
                            value: material_select(),
                            onchange: move |evt| material_select.set(evt.value()),
                            option { value: "", "Select a material…" }
                            for price in catalogue.iter() {
                                option {
                                    value: "{price.id}",
                                    "{price.material} - {price.location} (£{price.price_per_kg:.2}/kg)"
                                }
                            }
                        }
                    }
                    div { class: "w-32",
                        label { class: "{theme::LABEL}", "Weight (kg)" }
                        input {
                            class: "{theme::INPUT}",
                            inputmode: "decimal",
                            value: weight_input(),
                            oninput: move |evt| weight_input.set(evt.value()),
                            placeholder: "25",
                        }
                    }
                    button {
                        class: "{theme::BTN_PRIMARY}",
                        r#type: "submit",
                        "Add to Load"
                    }
                }

                if let Some(preview) = offer_preview {
                    p { class: "text-xs font-medium text-emerald-700", "{preview}" }
                }

                if line_rows.is_empty() {
                    div { class: "{theme::PANEL_PAD} text-sm {theme::TEXT_MUTED}",
                        "No materials added yet."
                    }
                } else {
                    div { class: "{theme::TABLE_CONTAINER}",
                        table { class: "w-full text-sm",
                            thead {
                                tr { class: "{theme::TABLE_HEADER}",
                                    th { class: "px-4 py-3 text-left", "Material" }
                                    th { class: "px-4 py-3 text-right", "Weight (kg)" }
                                    th { class: "px-4 py-3 text-right", "Unit Price" }
                                    if trader_mode {
                                        th { class: "px-4 py-3 text-right", "Offer Max" }
                                    }
                                    th { class: "px-4 py-3 text-right", "Total" }
                                    th { class: "px-4 py-3" }
                                }
                            }
                            tbody { class: "{theme::TABLE_DIVIDER}",
                                for (id, material, weight, unit, total) in line_rows {
                                    tr { key: "{id}",
                                        td { class: "px-4 py-3 font-medium text-slate-800", "{material}" }
                                        td { class: "px-4 py-3 text-right", "{weight}" }
                                        td { class: "px-4 py-3 text-right {theme::TEXT_MUTED}", "£{unit:.2}" }
                                        if trader_mode {
                                            td { class: "px-4 py-3 text-right text-emerald-700",
                                                "£{offer_per_kg(unit, margin):.2}/kg"
                                            }
                                        }
                                        td { class: "px-4 py-3 text-right font-semibold", "£{total:.2}" }
                                        td { class: "px-4 py-3 text-right",
                                            button {
                                                class: "text-xs font-semibold uppercase text-rose-500 hover:text-rose-700",
                                                onclick: {
                                                    let mut on_remove = on_remove.clone();
                                                    let id = id.clone();
                                                    move |_| on_remove(id.clone())
                                                },
                                                "Remove"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                div { class: "flex gap-3",
                    button { class: "{theme::BTN_SECONDARY}", onclick: on_export, "Export Receipt" }
                    button { class: "{theme::BTN_DANGER}", onclick: on_clear, "{clear_label}" }
                }
            }
        }
    }
}

#[component]
fn ModeButton(active: bool, label: &'static str, onclick: EventHandler<()>) -> Element {
    let class = if active {
        "rounded-lg border border-emerald-500/60 bg-emerald-50 px-4 py-2 text-sm font-semibold text-emerald-700"
    } else {
        "rounded-lg border border-slate-300 bg-white px-4 py-2 text-sm text-slate-500 hover:border-emerald-400 hover:text-emerald-700"
    };
    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
