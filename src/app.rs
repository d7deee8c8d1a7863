use std::time::Duration;

use dioxus::{prelude::*, signals::Signal};
use reqwest::Client;
use time::OffsetDateTime;

use crate::{
    domain::{
        app_state::AppState,
        catalogue::{generate_catalogue, today_utc},
        entities::MarketSnapshot,
    },
    infra::metalprice::{default_spot_prices, fetch_live_spot_prices},
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{
            AnalysisPage, CalculatorPage, DashboardPage, HistoryPage, RegionalPage, SettingsPage,
        },
        shell::Shell,
    },
    util::{
        assets,
        persistence::{load_calculator_lines, save_calculator_lines},
    },
};

/// Both feeds refresh together on this cadence.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(600);

/// Cadence with the `REFRESH_INTERVAL_MS` override applied.
pub fn refresh_interval() -> Duration {
    static INTERVAL: std::sync::OnceLock<Duration> = std::sync::OnceLock::new();
    *INTERVAL.get_or_init(|| {
        std::env::var("REFRESH_INTERVAL_MS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(REFRESH_INTERVAL)
    })
}

/// Simulated latency of the yard feed so the refresh spinner is visible.
const YARD_FEED_LATENCY: Duration = Duration::from_millis(800);

const USER_AGENT: &str = "scrap-engine/1.0.0";

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    #[route("/dashboard")]
    Dashboard {},
    #[route("/regional")]
    Regional {},
    #[route("/history")]
    History {},
    #[route("/calculator")]
    Calculator {},
    #[route("/analysis")]
    Analysis {},
    #[route("/settings")]
    Settings {},
}

/// Signals the shell and pages use to drive and observe refreshes.
#[derive(Clone, Copy)]
pub struct RefreshControl {
    /// Bumping this triggers a fetch; the value doubles as the fetch
    /// generation, so a completed fetch only lands if no newer bump
    /// happened while it ran.
    pub tick: Signal<u64>,
    pub busy: Signal<bool>,
    pub countdown: Signal<String>,
    next_due: Signal<i64>,
}

impl RefreshControl {
    pub fn request(&mut self) {
        if !*self.busy.peek() {
            self.tick.with_mut(|tick| *tick += 1);
        }
    }
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    use_hook({
        let mut state = state.clone();
        move || {
            let lines = load_calculator_lines();
            if !lines.is_empty() {
                state.with_mut(|st| st.calc_lines = lines);
            }
        }
    });
    use_context_provider(|| state.clone());

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts.clone());

    let refresh = RefreshControl {
        tick: use_signal(|| 0u64),
        busy: use_signal(|| false),
        countdown: use_signal(|| "--:--".to_string()),
        next_due: use_signal(|| OffsetDateTime::now_utc().unix_timestamp()),
    };
    use_context_provider(|| refresh);

    let _market = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        move || {
            let generation = (refresh.tick)();
            async move { refresh_market(state.clone(), toasts.clone(), refresh, generation).await }
        }
    });

    // One-second ticker: keeps the countdown label current and bumps the
    // fetch generation when the interval elapses.
    let _scheduler = use_future(move || {
        let mut refresh = refresh;
        async move {
            loop {
                tokio::time::sleep(Duration::from_secs(1)).await;
                let now = OffsetDateTime::now_utc().unix_timestamp();
                let due = *refresh.next_due.peek();
                if *refresh.busy.peek() {
                    refresh.countdown.set("updating".to_string());
                } else if now >= due {
                    refresh.request();
                } else {
                    let remaining = due - now;
                    refresh
                        .countdown
                        .set(format!("{}:{:02}", remaining / 60, remaining % 60));
                }
            }
        }
    });

    rsx! {
        document::Style { "{assets::main_css()}" }
        document::Style { "{assets::tailwind_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

/// Persist the calculator after every mutation; failure is a warning, not
/// an interruption.
pub fn persist_calc_lines(state: &Signal<AppState>) {
    let lines = state.with(|st| st.calc_lines.clone());
    if let Err(err) = save_calculator_lines(&lines) {
        tracing::warn!("failed to persist calculator lines: {err}");
    }
}

async fn refresh_market(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    mut control: RefreshControl,
    generation: u64,
) {
    control.busy.set(true);
    let api_key = state.with(|st| st.api_key_override.clone());

    let spot_task = async {
        match Client::builder().user_agent(USER_AGENT).build() {
            Ok(http) => fetch_live_spot_prices(&http, api_key.as_deref()).await,
            Err(error) => {
                tracing::warn!("failed to build HTTP client: {error}");
                default_spot_prices()
            }
        }
    };
    let yard_task = async {
        tokio::time::sleep(YARD_FEED_LATENCY).await;
        generate_catalogue(today_utc())
    };

    let (spot_set, catalogue) = tokio::join!(spot_task, yard_task);

    // A newer refresh started while this one ran; its result supersedes ours.
    if *control.tick.peek() != generation {
        return;
    }

    let first_load = state.with(|st| st.snapshot.is_none());
    state.with_mut(|st| {
        st.snapshot = Some(MarketSnapshot {
            catalogue,
            spot_set,
            fetched_at: today_utc(),
        });
    });

    control.busy.set(false);
    control.next_due.set(
        OffsetDateTime::now_utc().unix_timestamp() + refresh_interval().as_secs() as i64,
    );

    if !first_load {
        push_toast(toasts.clone(), ToastKind::Info, "Market prices updated.");
    }
}

#[component]
pub fn Dashboard() -> Element {
    rsx! { Shell { DashboardPage {} } }
}

#[component]
pub fn Regional() -> Element {
    rsx! { Shell { RegionalPage {} } }
}

#[component]
pub fn History() -> Element {
    rsx! { Shell { HistoryPage {} } }
}

#[component]
pub fn Calculator() -> Element {
    rsx! { Shell { CalculatorPage {} } }
}

#[component]
pub fn Analysis() -> Element {
    rsx! { Shell { AnalysisPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}
