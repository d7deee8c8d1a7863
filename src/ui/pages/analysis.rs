use dioxus::prelude::*;
use reqwest::Client;

use crate::{
    domain::app_state::AppState,
    infra::analyst::generate_market_analysis,
    ui::theme,
};

#[component]
pub fn AnalysisPage() -> Element {
    let state = use_context::<Signal<AppState>>();

    let mut report = use_signal(|| None::<String>);
    let mut generating = use_signal(|| false);

    let on_generate = {
        let state = state.clone();
        move |_| {
            if *generating.peek() {
                return;
            }
            let (catalogue, spots) =
                state.with(|st| (st.catalogue().to_vec(), st.spot_prices().to_vec()));
            generating.set(true);
            spawn(async move {
                let http = Client::new();
                let text = generate_market_analysis(&http, &catalogue, &spots).await;
                report.set(Some(text));
                generating.set(false);
            });
        }
    };

    let button_label = if generating() {
        "Generating…"
    } else {
        "Generate Market Report"
    };

    rsx! {
        div { class: "space-y-6",
            section { class: "{theme::PANEL_PAD}",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500",
                    "AI Market Analysis"
                }
                p { class: "mt-2 text-sm {theme::TEXT_MUTED}",
                    "Compares today's yard prices against global spot quotes and suggests a dealer position."
                }
                button {
                    class: "mt-4 {theme::BTN_PRIMARY} disabled:cursor-not-allowed disabled:opacity-50",
                    disabled: generating(),
                    onclick: on_generate,
                    "{button_label}"
                }
            }

            if let Some(text) = report() {
                section { class: "{theme::PANEL_PAD}",
                    h3 { class: "text-sm font-semibold text-slate-800", "Analyst Report" }
                    // Markdown is shown as-is; the report is short enough to read raw.
                    div { class: "mt-3 whitespace-pre-wrap text-sm leading-relaxed text-slate-700",
                        "{text}"
                    }
                }
            }
        }
    }
}
