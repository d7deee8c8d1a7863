//! Deterministic 7-day price history, synthesised backwards from the
//! current quote. There is no stored history; the walk is a pure function
//! of `(id, price_per_kg, trend)` so every render of the same row draws the
//! same curve, and the present-day point is always exactly the live price.

use time::Date;

use super::entities::{Trend, YardPrice};

/// Points per series: six synthesised days plus the live quote.
pub const HISTORY_DAYS: usize = 7;

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryPoint {
    pub date: Date,
    pub price: f64,
}

/// `frac(sin(seed++) * 10000)`, a deliberately portable pseudo-uniform on
/// [0, 1). Not a serious PRNG; it only has to be stable for a given id.
struct SeededWalk {
    seed: f64,
}

impl SeededWalk {
    fn from_id(id: &str) -> Self {
        let seed = id.bytes().map(u64::from).sum::<u64>() as f64;
        Self { seed }
    }

    fn next(&mut self) -> f64 {
        let x = self.seed.sin() * 10_000.0;
        self.seed += 1.0;
        x - x.floor()
    }
}

/// Produce the 7-point series for one row, oldest first. The final point is
/// the row's `price_per_kg`, untouched.
pub fn history_series(item: &YardPrice) -> Vec<HistoryPoint> {
    let mut walk = SeededWalk::from_id(&item.id);
    let mut points = Vec::with_capacity(HISTORY_DAYS);
    let mut current = item.price_per_kg;

    points.push(HistoryPoint {
        date: item.date,
        price: current,
    });

    for offset in 1..HISTORY_DAYS {
        // 2-5% daily volatility, biased 1% in the trend's direction. Walking
        // backwards, a rising row must have been cheaper yesterday, so the
        // bias is applied before inverting the step.
        let volatility = 0.02 + walk.next() * 0.03;
        let mut change = (walk.next() - 0.5) * volatility;
        match item.trend {
            Trend::Rising => change += 0.01,
            Trend::Falling => change -= 0.01,
            Trend::Flat => {}
        }

        current *= 1.0 - change;
        let date = back_days(item.date, offset as i64);
        points.push(HistoryPoint {
            date,
            price: current,
        });
    }

    points.reverse();
    points
}

/// Per-series vertical axis: min/max padded by ±1% so a flat line does not
/// hug the frame. A degenerate range is widened to 1.0.
pub fn chart_bounds(points: &[HistoryPoint]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for point in points {
        min = min.min(point.price);
        max = max.max(point.price);
    }
    let min = min * 0.99;
    let max = max * 1.01;
    if max - min <= f64::EPSILON {
        (min, min + 1.0)
    } else {
        (min, max)
    }
}

fn back_days(date: Date, days: i64) -> Date {
    let julian = date.to_julian_day() - days as i32;
    Date::from_julian_day(julian).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn sample(id: &str, price: f64, trend: Trend) -> YardPrice {
        YardPrice {
            id: id.to_string(),
            material: "Clean Copper Tube".to_string(),
            location: "Manchester".to_string(),
            price_per_kg: price,
            date: date!(2025 - 06 - 02),
            trend,
            change_percentage: match trend {
                Trend::Rising => 1.2,
                Trend::Falling => -1.2,
                Trend::Flat => 0.0,
            },
        }
    }

    #[test]
    fn series_has_seven_points_oldest_first() {
        let series = history_series(&sample("mnc-copper-tube-042", 5.80, Trend::Rising));
        assert_eq!(series.len(), HISTORY_DAYS);
        assert_eq!(series[0].date, date!(2025 - 05 - 27));
        assert_eq!(series[6].date, date!(2025 - 06 - 02));
        for pair in series.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn present_day_point_is_exactly_the_live_price() {
        let series = history_series(&sample("mnc-copper-tube-042", 5.80, Trend::Rising));
        assert_eq!(series.last().unwrap().price, 5.80);
    }

    #[test]
    fn series_is_deterministic_for_the_same_inputs() {
        let item = sample("mnc-copper-tube-042", 5.80, Trend::Rising);
        let first = history_series(&item);
        let second = history_series(&item);
        assert_eq!(first, second);
    }

    #[test]
    fn series_depends_on_the_id() {
        let left = history_series(&sample("lon-dry-bright-wire-007", 5.80, Trend::Rising));
        let right = history_series(&sample("mnc-copper-tube-042", 5.80, Trend::Rising));
        assert_ne!(left, right);
    }

    #[test]
    fn walk_stays_inside_the_volatility_envelope() {
        // Per-step change is bounded by half the max volatility plus the 1%
        // trend bias, so six steps can move the price by at most 1.035^6.
        for trend in [Trend::Rising, Trend::Falling, Trend::Flat] {
            let series = history_series(&sample("bir-heavy-copper-100", 5.65, trend));
            let ceiling = 5.65 * 1.035_f64.powi(6);
            let floor = 5.65 * 0.965_f64.powi(6);
            for point in &series {
                assert!(point.price > 0.0);
                assert!(point.price >= floor && point.price <= ceiling);
            }
        }
    }

    #[test]
    fn trend_changes_the_series() {
        let rising = history_series(&sample("bir-heavy-copper-100", 5.65, Trend::Rising));
        let falling = history_series(&sample("bir-heavy-copper-100", 5.65, Trend::Falling));
        assert_ne!(rising, falling);
        assert_eq!(rising[6].price, falling[6].price);
    }

    #[test]
    fn chart_bounds_bracket_a_synthesised_series() {
        let series = history_series(&sample("mnc-copper-tube-042", 5.80, Trend::Rising));
        let (min, max) = chart_bounds(&series);
        for point in &series {
            assert!(min < point.price && point.price < max);
        }
    }

    #[test]
    fn chart_bounds_pad_by_one_percent() {
        let series = vec![
            HistoryPoint {
                date: date!(2025 - 06 - 01),
                price: 2.0,
            },
            HistoryPoint {
                date: date!(2025 - 06 - 02),
                price: 4.0,
            },
        ];
        let (min, max) = chart_bounds(&series);
        assert!((min - 1.98).abs() < 1e-12);
        assert!((max - 4.04).abs() < 1e-12);
    }
}
