use dioxus::prelude::*;

use crate::domain::entities::Trend;
use crate::domain::history::{chart_bounds, HistoryPoint};
use crate::ui::components::sparkline::polyline_points;
use crate::ui::theme;

const WIDTH: f64 = 280.0;
const HEIGHT: f64 = 96.0;

/// Seven-day price card for the history view.
#[component]
pub fn TrendChart(
    material: String,
    location: String,
    price_per_kg: f64,
    trend: Trend,
    points: Vec<HistoryPoint>,
) -> Element {
    let (stroke, fill) = match trend {
        Trend::Rising => ("#059669", "rgba(5, 150, 105, 0.12)"),
        Trend::Falling => ("#e11d48", "rgba(225, 29, 72, 0.12)"),
        Trend::Flat => ("#94a3b8", "rgba(148, 163, 184, 0.12)"),
    };

    let (low, high) = chart_bounds(&points);
    let values: Vec<f64> = points.iter().map(|point| point.price).collect();
    let line = polyline_points(&values, WIDTH, HEIGHT);
    // Close the polyline down to the baseline for the area fill.
    let area = if line.is_empty() {
        String::new()
    } else {
        format!("0,{HEIGHT} {line} {WIDTH},{HEIGHT}")
    };

    let first_label = points
        .first()
        .map(|point| point.date.to_string())
        .unwrap_or_default();
    let last_label = points
        .last()
        .map(|point| point.date.to_string())
        .unwrap_or_default();

    rsx! {
        div {
            class: "{theme::PANEL_PAD}",
            div { class: "flex items-baseline justify-between",
                div {
                    h3 { class: "text-sm font-semibold text-slate-800", "{material}" }
                    p { class: "text-xs {theme::TEXT_MUTED}", "{location}" }
                }
                p { class: "text-lg font-semibold {theme::trend_text(trend)}",
                    "£{price_per_kg:.2}"
                }
            }
            svg {
                class: "mt-3 w-full",
                width: "{WIDTH}",
                height: "{HEIGHT}",
                view_box: "0 0 {WIDTH} {HEIGHT}",
                preserve_aspect_ratio: "none",
                if !area.is_empty() {
                    polygon { points: "{area}", fill: "{fill}" }
                    polyline {
                        points: "{line}",
                        fill: "none",
                        stroke: "{stroke}",
                        stroke_width: "2",
                    }
                }
            }
            div { class: "mt-2 flex justify-between text-[10px] {theme::TEXT_MUTED}",
                span { "{first_label}" }
                span { "£{low:.2} - £{high:.2}" }
                span { "{last_label}" }
            }
        }
    }
}
