use dioxus::prelude::*;

use crate::domain::entities::Trend;
use crate::ui::theme;

const WIDTH: f64 = 80.0;
const HEIGHT: f64 = 24.0;

/// Inline 7-day price line for table rows.
#[component]
pub fn Sparkline(values: Vec<f64>, trend: Trend) -> Element {
    let stroke = match trend {
        Trend::Rising => "#059669",
        Trend::Falling => "#e11d48",
        Trend::Flat => "#94a3b8",
    };
    let points = polyline_points(&values, WIDTH, HEIGHT);

    rsx! {
        svg {
            class: "inline-block align-middle",
            width: "{WIDTH}",
            height: "{HEIGHT}",
            view_box: "0 0 {WIDTH} {HEIGHT}",
            if points.is_empty() {
                text {
                    x: "0",
                    y: "{HEIGHT - 8.0}",
                    class: "text-xs {theme::TEXT_MUTED}",
                    "-"
                }
            } else {
                polyline {
                    points: "{points}",
                    fill: "none",
                    stroke: "{stroke}",
                    stroke_width: "1.5",
                }
            }
        }
    }
}

/// Scale a series into an SVG points string, y-flipped with 2px padding.
pub fn polyline_points(values: &[f64], width: f64, height: f64) -> String {
    if values.len() < 2 {
        return String::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if (max - min).abs() < f64::EPSILON {
        1.0
    } else {
        max - min
    };
    let pad = 2.0;
    let usable = height - 2.0 * pad;
    let step = width / (values.len() - 1) as f64;

    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let x = step * i as f64;
            let y = pad + usable * (1.0 - (value - min) / span);
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_few_values_yield_no_points() {
        assert!(polyline_points(&[], 80.0, 24.0).is_empty());
        assert!(polyline_points(&[1.0], 80.0, 24.0).is_empty());
    }

    #[test]
    fn endpoints_span_the_full_width() {
        let points = polyline_points(&[1.0, 2.0, 3.0], 80.0, 24.0);
        let coords: Vec<&str> = points.split(' ').collect();
        assert_eq!(coords.len(), 3);
        assert!(coords[0].starts_with("0.0,"));
        assert!(coords[2].starts_with("80.0,"));
    }

    #[test]
    fn higher_values_sit_higher_on_the_canvas() {
        let points = polyline_points(&[1.0, 3.0], 80.0, 24.0);
        let ys: Vec<f64> = points
            .split(' ')
            .map(|pair| pair.split(',').nth(1).unwrap().parse().unwrap())
            .collect();
        // SVG y grows downward.
        assert!(ys[0] > ys[1]);
    }

    #[test]
    fn flat_series_stays_inside_the_canvas() {
        let points = polyline_points(&[5.0, 5.0, 5.0], 80.0, 24.0);
        for pair in points.split(' ') {
            let y: f64 = pair.split(',').nth(1).unwrap().parse().unwrap();
            assert!(y >= 0.0 && y <= 24.0);
        }
    }
}
