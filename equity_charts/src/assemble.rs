//! Chart-ready output.
//!
//! [`ChartData`] is the only thing the rendering side sees. Every series is emitted in
//! caller-meaningful order (chronological, Monday..Friday, January..December,
//! bucket-ascending) and values are rounded to two decimals here, and only here.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    distribution::DistributionBucket,
    normalize::NormalizationReport,
    seasonality::{SeasonalAverage, Seasonality},
    window::{WindowPolicy, WindowedSeries},
};

/// One `(date, adjusted close)` point of the price chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    /// Trading day.
    pub x: NaiveDate,
    /// Adjusted close, rounded to cents.
    pub y: f64,
}

/// One bar of a seasonality chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalPoint {
    /// `Monday`..`Friday` or `Jan`..`Dec`.
    pub label: String,
    /// Average percent change, two decimals.
    pub value: f64,
    /// Observations behind `value`; zero means the bucket had no data.
    pub observations: usize,
}

/// One bar of the change histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramPoint {
    /// Bucket center in percent.
    pub x: f64,
    /// Days in the bucket.
    pub y: usize,
}

/// Everything a chart page needs for one symbol and window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// Ticker.
    pub symbol: String,
    /// Requested window in text form (`1461d`, `this_year`, ...).
    pub window: WindowPolicy,
    /// Resolved inclusive start of the window, `null` for `max`.
    pub window_start: Option<NaiveDate>,
    /// Observations that fed the aggregates.
    pub observations: usize,
    /// Raw rows dropped as malformed.
    pub skipped_records: usize,
    /// In-window split days left out of every series.
    pub splits_excluded: usize,
    /// Chronological price series.
    pub price_series: Vec<PricePoint>,
    /// Monday..Friday.
    pub weekday_seasonality: Vec<SeasonalPoint>,
    /// January..December.
    pub month_seasonality: Vec<SeasonalPoint>,
    /// Eleven buckets, -2.5 .. +2.5.
    pub change_distribution: Vec<HistogramPoint>,
}

/// Rounds to two decimals for presentation.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn seasonal_points(averages: &[SeasonalAverage]) -> Vec<SeasonalPoint> {
    averages
        .iter()
        .map(|a| SeasonalPoint {
            label: a.label.to_string(),
            value: round2(a.average),
            observations: a.observations,
        })
        .collect()
}

/// Combines the pipeline stages' outputs. No further computation happens here.
pub fn assemble(
    symbol: &str,
    windowed: &WindowedSeries,
    report: &NormalizationReport,
    seasonality: &Seasonality,
    distribution: &[DistributionBucket],
) -> ChartData {
    ChartData {
        symbol: symbol.to_string(),
        window: windowed.policy,
        window_start: windowed.start,
        observations: windowed.len(),
        skipped_records: report.skipped_count(),
        splits_excluded: windowed.splits_excluded,
        price_series: windowed
            .observations
            .iter()
            .map(|o| PricePoint {
                x: o.date,
                y: round2(o.adjusted_close),
            })
            .collect(),
        weekday_seasonality: seasonal_points(&seasonality.weekday),
        month_seasonality: seasonal_points(&seasonality.month),
        change_distribution: distribution
            .iter()
            .map(|b| HistogramPoint {
                x: b.center,
                y: b.count,
            })
            .collect(),
    }
}
