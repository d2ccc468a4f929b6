use serde::Deserialize;

use crate::core::snapshot::RawPricePoint;

#[derive(Deserialize)]
pub struct TimeSeriesResponse {
    #[serde(rename = "timeSeries")]
    pub time_series: Vec<TimeSeriesEntry>,
}

#[derive(Deserialize)]
pub struct TimeSeriesEntry {
    /// Start of the priced hour, for example `2024-01-01T00:00:00+01:00`.
    period: String,

    end: String,

    value: f64,
}

impl From<TimeSeriesEntry> for RawPricePoint {
    fn from(entry: TimeSeriesEntry) -> Self {
        Self { start: entry.period, end: entry.end, value: entry.value }
    }
}
