use dioxus::prelude::*;

use crate::app::{Route, RefreshControl};
use crate::util::version::{APP_NAME, APP_TAGLINE};

#[component]
pub fn Shell(children: Element) -> Element {
    let current_route = use_route::<Route>();
    let nav = use_navigator();
    let refresh = use_context::<RefreshControl>();

    let busy = (refresh.busy)();
    let countdown = (refresh.countdown)();
    let refresh_label = if busy { "Refreshing…" } else { "Refresh Now" };

    rsx! {
        div { class: "min-h-screen bg-slate-100 text-slate-800 font-sans",
            header {
                class: "border-b border-slate-200 bg-white/95 px-6 py-4 shadow-sm",
                div { class: "mx-auto grid max-w-6xl grid-cols-[1fr_auto_1fr] items-center gap-4",
                    div { class: "flex items-center gap-3",
                        span { class: "text-2xl", "♻️" }
                        div {
                            h1 { class: "text-xl font-semibold tracking-tight text-slate-900",
                                "{APP_NAME}"
                            }
                            p { class: "text-xs text-slate-500 italic", "{APP_TAGLINE}" }
                        }
                    }

                    div { class: "flex items-center gap-3 justify-center",
                        span {
                            class: "inline-flex items-center gap-1.5 rounded-full border border-emerald-300 bg-emerald-50 px-3 py-1 text-xs font-semibold text-emerald-700",
                            span { class: "h-2 w-2 rounded-full bg-emerald-500" }
                            "Markets Open"
                        }
                        span { class: "text-xs text-slate-500", "Next update: {countdown}" }
                        button {
                            class: "rounded-lg border border-slate-300 bg-white px-3 py-1.5 text-xs font-semibold text-slate-600 hover:bg-slate-50 disabled:cursor-not-allowed disabled:opacity-50",
                            disabled: busy,
                            onclick: {
                                let mut refresh = refresh;
                                move |_| refresh.request()
                            },
                            "{refresh_label}"
                        }
                    }

                    nav { class: "flex gap-2 text-sm justify-end",
                        NavButton {
                            active: matches!(current_route, Route::Dashboard {}),
                            onclick: move |_| { nav.push(Route::Dashboard {}); },
                            label: "📊 Dashboard",
                        }
                        NavButton {
                            active: matches!(current_route, Route::Regional {}),
                            onclick: move |_| { nav.push(Route::Regional {}); },
                            label: "🗺️ Regional",
                        }
                        NavButton {
                            active: matches!(current_route, Route::History {}),
                            onclick: move |_| { nav.push(Route::History {}); },
                            label: "📈 History",
                        }
                        NavButton {
                            active: matches!(current_route, Route::Calculator {}),
                            onclick: move |_| { nav.push(Route::Calculator {}); },
                            label: "🧮 Calculator",
                        }
                        NavButton {
                            active: matches!(current_route, Route::Analysis {}),
                            onclick: move |_| { nav.push(Route::Analysis {}); },
                            label: "🧠 Analysis",
                        }
                        NavButton {
                            active: matches!(current_route, Route::Settings {}),
                            onclick: move |_| { nav.push(Route::Settings {}); },
                            label: "⚙️",
                        }
                    }
                }
            }
            main { class: "mx-auto max-w-6xl px-6 py-10",
                {children}
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    let class = if active {
        "rounded-lg border border-emerald-500/60 bg-emerald-50 px-4 py-2 font-semibold text-emerald-700"
    } else {
        "rounded-lg border border-transparent px-4 py-2 text-slate-500 transition hover:border-slate-200 hover:bg-white hover:text-slate-800"
    };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
