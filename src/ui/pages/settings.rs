use dioxus::prelude::*;

use crate::{
    app::{refresh_interval, RefreshControl},
    domain::app_state::AppState,
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        theme,
    },
    util::version::{version_label, APP_NAME},
};

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let refresh = use_context::<RefreshControl>();

    let mut api_key_input =
        use_signal(|| state.with(|st| st.api_key_override.clone().unwrap_or_default()));

    let override_active = state.with(|st| st.api_key_override.is_some());
    let interval_minutes = refresh_interval().as_secs() / 60;

    let on_apply_key = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        let mut refresh = refresh;
        move |_| {
            let key = api_key_input().trim().to_string();
            state.with_mut(|st| {
                st.api_key_override = if key.is_empty() { None } else { Some(key) };
            });
            refresh.request();
            push_toast(
                toasts.clone(),
                ToastKind::Success,
                "Spot API key updated; refreshing prices.",
            );
        }
    };

    let on_clear_key = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            api_key_input.set(String::new());
            state.with_mut(|st| st.api_key_override = None);
            push_toast(toasts.clone(), ToastKind::Info, "Reverted to the built-in key.");
        }
    };

    rsx! {
        div { class: "space-y-8",
            section { class: "{theme::PANEL} p-6",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500",
                    "Spot Price Feed"
                }
                p { class: "mt-2 text-sm {theme::TEXT_MUTED}",
                    "Quotes come from MetalpriceAPI and convert to £/kg with the batch FX rate. "
                    "Set your own key here if the built-in one hits its quota."
                }
                div { class: "mt-4 flex flex-wrap items-end gap-4",
                    div { class: "flex-1 min-w-[280px]",
                        label { class: "{theme::LABEL}", "API key override" }
                        input {
                            class: "{theme::INPUT}",
                            r#type: "password",
                            value: api_key_input(),
                            oninput: move |evt| api_key_input.set(evt.value()),
                            placeholder: "leave empty for the built-in key",
                        }
                    }
                    button { class: "{theme::BTN_PRIMARY}", onclick: on_apply_key, "Apply" }
                    button { class: "{theme::BTN_SECONDARY}", onclick: on_clear_key, "Use Built-in" }
                }
                if override_active {
                    p { class: "mt-2 text-xs font-medium text-emerald-700", "Custom key active." }
                }
            }

            section { class: "{theme::PANEL} p-6",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500",
                    "Data Sources"
                }
                dl { class: "mt-4 grid gap-3 text-sm sm:grid-cols-2",
                    div {
                        dt { class: "{theme::LABEL}", "Spot prices" }
                        dd { class: "mt-1 text-slate-700", "MetalpriceAPI (USD base, LME derived)" }
                    }
                    div {
                        dt { class: "{theme::LABEL}", "Yard prices" }
                        dd { class: "mt-1 text-slate-700", "Simulated UK yard catalogue" }
                    }
                    div {
                        dt { class: "{theme::LABEL}", "Refresh interval" }
                        dd { class: "mt-1 text-slate-700", "{interval_minutes} minutes" }
                    }
                    div {
                        dt { class: "{theme::LABEL}", "Analyst" }
                        dd { class: "mt-1 text-slate-700", "Gemini (needs GEMINI_API_KEY)" }
                    }
                }
            }

            section { class: "{theme::PANEL} p-6",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500",
                    "About"
                }
                p { class: "mt-2 text-sm {theme::TEXT_MUTED}",
                    "{APP_NAME} {version_label()}. Yard quotes are indicative; always confirm "
                    "prices with the yard before travelling."
                }
            }
        }
    }
}
