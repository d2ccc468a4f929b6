use average::Mean;
use chrono::{DateTime, Local, NaiveDate};
use itertools::{Itertools, MinMaxResult};
use serde::Serialize;

/// Single price point as published upstream.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RawPricePoint {
    /// Period start, `YYYY-MM-DD…`.
    pub start: String,

    pub end: String,

    pub value: f64,
}

impl RawPricePoint {
    fn is_on(&self, date_prefix: &str) -> bool {
        self.start.starts_with(date_prefix)
    }
}

/// Result of one successful refresh.
///
/// All the statistics are derived from [`PriceSnapshot::today`] and are zero when it is empty.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct PriceSnapshot {
    pub today: Vec<f64>,
    pub tomorrow: Vec<f64>,
    pub raw_today: Vec<RawPricePoint>,
    pub raw_tomorrow: Vec<RawPricePoint>,
    pub average: f64,
    pub min: f64,
    pub max: f64,

    /// Daily maximum of [`PriceSnapshot::today`], not the price of the ongoing hour.
    pub current_price: f64,

    pub tomorrow_valid: bool,
    pub fetched_at: DateTime<Local>,
}

impl PriceSnapshot {
    /// Bucket the points into today and tomorrow, relative to `now`, and aggregate today.
    ///
    /// Points on any other date are dropped.
    pub fn new(points: impl IntoIterator<Item = RawPricePoint>, now: DateTime<Local>) -> Self {
        let today_prefix = date_prefix(now.date_naive());
        let tomorrow_prefix = now.date_naive().succ_opt().map(date_prefix);

        let mut raw_today = Vec::new();
        let mut raw_tomorrow = Vec::new();
        for point in points {
            if point.is_on(&today_prefix) {
                raw_today.push(point);
            } else if tomorrow_prefix.as_deref().is_some_and(|prefix| point.is_on(prefix)) {
                raw_tomorrow.push(point);
            }
        }

        let today: Vec<f64> = raw_today.iter().map(|point| point.value).collect();
        let tomorrow: Vec<f64> = raw_tomorrow.iter().map(|point| point.value).collect();
        let average = {
            let estimate: Mean = today.iter().copied().collect();
            if estimate.is_empty() { 0.0 } else { estimate.mean() }
        };
        let (min, max) = match today.iter().copied().minmax() {
            MinMaxResult::NoElements => (0.0, 0.0),
            MinMaxResult::OneElement(value) => (value, value),
            MinMaxResult::MinMax(min, max) => (min, max),
        };

        Self {
            tomorrow_valid: !tomorrow.is_empty(),
            current_price: max,
            today,
            tomorrow,
            raw_today,
            raw_tomorrow,
            average,
            min,
            max,
            fetched_at: now,
        }
    }
}

fn date_prefix(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;

    use super::*;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(year, month, day, hour, 0, 0).single().unwrap()
    }

    fn point(start: &str, value: f64) -> RawPricePoint {
        RawPricePoint { start: start.to_string(), end: format!("{start}+1h"), value }
    }

    #[test]
    fn today_only_ok() {
        let snapshot = PriceSnapshot::new(
            [point("2024-01-01T00:00", 50.0), point("2024-01-01T01:00", 100.0)],
            at(2024, 1, 1, 12),
        );
        assert_eq!(snapshot.today, [50.0, 100.0]);
        assert_abs_diff_eq!(snapshot.average, 75.0);
        assert_abs_diff_eq!(snapshot.min, 50.0);
        assert_abs_diff_eq!(snapshot.max, 100.0);
        assert_abs_diff_eq!(snapshot.current_price, 100.0);
        assert!(snapshot.tomorrow.is_empty());
        assert!(snapshot.raw_tomorrow.is_empty());
        assert!(!snapshot.tomorrow_valid);
        assert_eq!(snapshot.raw_today[1].start, "2024-01-01T01:00");
        assert_eq!(snapshot.raw_today[1].end, "2024-01-01T01:00+1h");
        assert_eq!(snapshot.fetched_at, at(2024, 1, 1, 12));
    }

    #[test]
    fn empty_today_is_all_zeros() {
        let snapshot = PriceSnapshot::new([point("2024-01-02T00:00", 42.0)], at(2024, 1, 1, 23));
        assert!(snapshot.today.is_empty());
        assert_abs_diff_eq!(snapshot.average, 0.0);
        assert_abs_diff_eq!(snapshot.min, 0.0);
        assert_abs_diff_eq!(snapshot.max, 0.0);
        assert_abs_diff_eq!(snapshot.current_price, 0.0);
        assert_eq!(snapshot.tomorrow, [42.0]);
        assert!(snapshot.tomorrow_valid);
    }

    #[test]
    fn buckets_by_date_and_keeps_order() {
        let snapshot = PriceSnapshot::new(
            [
                point("2023-12-31T23:00", 1.0),
                point("2024-01-01T01:00", 30.0),
                point("2024-01-01T00:00", 20.0),
                point("2024-01-02T00:00", 40.0),
                point("2024-01-02T01:00", -5.0),
                point("2024-01-03T00:00", 99.0),
            ],
            at(2024, 1, 1, 8),
        );
        assert_eq!(snapshot.today, [30.0, 20.0]);
        assert_eq!(snapshot.tomorrow, [40.0, -5.0]);
        assert_eq!(snapshot.raw_tomorrow.len(), 2);
        assert!(snapshot.tomorrow_valid);
    }

    #[test]
    fn month_boundary_ok() {
        let snapshot = PriceSnapshot::new(
            [point("2024-02-29T22:00", 10.0), point("2024-03-01T00:00", 11.0)],
            at(2024, 2, 29, 20),
        );
        assert_eq!(snapshot.today, [10.0]);
        assert_eq!(snapshot.tomorrow, [11.0]);
    }

    #[test]
    fn average_is_between_extrema() {
        let series: [&[f64]; 4] = [
            &[42.0],
            &[-12.5, 0.0, 7.25],
            &[100.0, 100.0, 100.0],
            &[0.1, 250.0, -80.0, 33.3, 12.0, 12.0],
        ];
        for values in series {
            let points = values
                .iter()
                .enumerate()
                .map(|(hour, value)| point(&format!("2024-06-15T{hour:02}:00"), *value));
            let snapshot = PriceSnapshot::new(points, at(2024, 6, 15, 0));
            assert!(snapshot.min <= snapshot.average, "{values:?}");
            assert!(snapshot.average <= snapshot.max, "{values:?}");
            assert!(snapshot.today.contains(&snapshot.current_price), "{values:?}");
        }
    }

    #[test]
    fn tomorrow_valid_iff_tomorrow_is_not_empty() {
        for points in [
            vec![],
            vec![point("2024-06-16T00:00", 1.0)],
            vec![point("2024-06-15T00:00", 1.0)],
        ] {
            let snapshot = PriceSnapshot::new(points, at(2024, 6, 15, 0));
            assert_eq!(snapshot.tomorrow_valid, !snapshot.tomorrow.is_empty());
        }
    }
}
