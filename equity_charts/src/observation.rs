//! Typed daily observations and the ordered series built from them.

use chrono::NaiveDate;
use serde::Serialize;

/// One trading day after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyObservation {
    /// Calendar date (no time of day, no time zone).
    pub date: NaiveDate,
    /// Opening price, always finite and strictly positive.
    pub open: f64,
    /// Closing price, unadjusted.
    pub close: f64,
    /// Closing price adjusted for splits and dividends; equals `close` when the
    /// provider supplied no adjustment.
    pub adjusted_close: f64,
    /// `1.0` on ordinary days.
    pub split_coefficient: f64,
}

impl DailyObservation {
    /// Intraday move in percent: `(close - open) / open * 100`.
    pub fn percent_change(&self) -> f64 {
        (self.close - self.open) / self.open * 100.0
    }

    /// `true` when the day carries a stock split.
    pub fn is_split_day(&self) -> bool {
        self.split_coefficient != 1.0
    }
}

/// Observations for one symbol, strictly ascending by date (no duplicate dates).
///
/// Build one with [`crate::normalize::normalize`] or [`TimeSeries::from_observations`];
/// there is no way to mutate it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    symbol: String,
    observations: Vec<DailyObservation>,
}

impl TimeSeries {
    /// Sorts by date and keeps the first observation for each date.
    pub fn from_observations(
        symbol: impl Into<String>,
        mut observations: Vec<DailyObservation>,
    ) -> Self {
        // stable sort, so dedup keeps the earliest-supplied row per date
        observations.sort_by_key(|o| o.date);
        observations.dedup_by_key(|o| o.date);
        Self {
            symbol: symbol.into(),
            observations,
        }
    }

    pub(crate) fn from_sorted(symbol: String, observations: Vec<DailyObservation>) -> Self {
        debug_assert!(observations.windows(2).all(|w| w[0].date < w[1].date));
        Self {
            symbol,
            observations,
        }
    }

    /// Ticker this series belongs to.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Observations, ascending by date.
    pub fn observations(&self) -> &[DailyObservation] {
        &self.observations
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// `true` when there are no observations.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Earliest date, if any.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    /// Latest date, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }
}
