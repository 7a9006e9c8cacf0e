//! Temporal window filtering.
//!
//! A [`WindowPolicy`] selects the trailing slice of a [`TimeSeries`] that takes part in
//! aggregation. Two families exist:
//! - a rolling lookback of N calendar days ([`WindowPolicy::Lookback`], default 1461,
//!   i.e. four years including one leap day);
//! - named calendar ranges (`this_month`, `this_quarter`, `this_year`, `last_5_years`,
//!   `max`).
//!
//! `today` is always an explicit argument. The filter never reads the clock; use
//! [`crate::clock::today_in`] at the edge to obtain it.
//!
//! Besides the date cut, the filter drops split days (split coefficient other than
//! `1.0`): their open/close pair straddles a price discontinuity and would show up as a
//! huge fake move.

use std::{fmt, num::NonZeroU32, str::FromStr};

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    errors::PipelineError,
    observation::{DailyObservation, TimeSeries},
};

/// Default rolling window in calendar days.
pub const DEFAULT_LOOKBACK_DAYS: NonZeroU32 = match NonZeroU32::new(1461) {
    Some(days) => days,
    None => unreachable!(),
};

/// Rule selecting which observations participate in aggregation.
///
/// Text form (used by the CLI and the config file): `<N>d` for a lookback, or one of
/// `this_month`, `this_quarter`, `this_year`, `last_5_years`, `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WindowPolicy {
    /// Everything from `today - days` (inclusive) up to today.
    Lookback {
        /// Window length in calendar days.
        days: NonZeroU32,
    },
    /// From the first day of the current month.
    ThisMonth,
    /// From the first day of the current calendar quarter.
    ThisQuarter,
    /// From January 1 of the current year.
    ThisYear,
    /// From the same calendar day five years ago.
    Last5Years,
    /// No lower bound.
    Max,
}

impl Default for WindowPolicy {
    fn default() -> Self {
        WindowPolicy::Lookback {
            days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

impl WindowPolicy {
    /// Inclusive lower bound for `today`, or `None` when the window is unbounded.
    ///
    /// `Last5Years` on Feb 29 resolves to Feb 28 five years back. A lookback reaching
    /// before the earliest representable date is treated as unbounded.
    pub fn start_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        match *self {
            WindowPolicy::Lookback { days } => {
                today.checked_sub_days(Days::new(u64::from(days.get())))
            }
            WindowPolicy::ThisMonth => today.with_day(1),
            WindowPolicy::ThisQuarter => {
                let first_month = (today.month0() / 3) * 3 + 1;
                NaiveDate::from_ymd_opt(today.year(), first_month, 1)
            }
            WindowPolicy::ThisYear => NaiveDate::from_ymd_opt(today.year(), 1, 1),
            WindowPolicy::Last5Years => today.checked_sub_months(Months::new(60)),
            WindowPolicy::Max => None,
        }
    }
}

impl fmt::Display for WindowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowPolicy::Lookback { days } => write!(f, "{days}d"),
            WindowPolicy::ThisMonth => f.write_str("this_month"),
            WindowPolicy::ThisQuarter => f.write_str("this_quarter"),
            WindowPolicy::ThisYear => f.write_str("this_year"),
            WindowPolicy::Last5Years => f.write_str("last_5_years"),
            WindowPolicy::Max => f.write_str("max"),
        }
    }
}

/// Error returned when a window policy string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid window {input:?}: expected <days>d, this_month, this_quarter, this_year, last_5_years or max")]
pub struct ParseWindowError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for WindowPolicy {
    type Err = ParseWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        let err = || ParseWindowError {
            input: s.to_string(),
        };
        match norm.as_str() {
            "this_month" => Ok(WindowPolicy::ThisMonth),
            "this_quarter" => Ok(WindowPolicy::ThisQuarter),
            "this_year" => Ok(WindowPolicy::ThisYear),
            "last_5_years" => Ok(WindowPolicy::Last5Years),
            "max" => Ok(WindowPolicy::Max),
            other => {
                let digits = other.strip_suffix('d').unwrap_or(other);
                let days = digits.parse::<u32>().map_err(|_| err())?;
                let days = NonZeroU32::new(days).ok_or_else(err)?;
                Ok(WindowPolicy::Lookback { days })
            }
        }
    }
}

impl TryFrom<String> for WindowPolicy {
    type Error = ParseWindowError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WindowPolicy> for String {
    fn from(value: WindowPolicy) -> Self {
        value.to_string()
    }
}

/// Observations that survived the window and split filters.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedSeries {
    /// Policy that produced this slice.
    pub policy: WindowPolicy,
    /// Resolved inclusive lower bound (`None` for [`WindowPolicy::Max`]).
    pub start: Option<NaiveDate>,
    /// Retained observations, ascending by date.
    pub observations: Vec<DailyObservation>,
    /// In-window observations dropped because they were split days.
    pub splits_excluded: usize,
}

impl WindowedSeries {
    /// Number of retained observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Always `false` for a value returned by [`apply_window`].
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Restricts `series` to `policy` relative to `today` and drops split days.
///
/// Keeps observations with `start <= date <= today`. An empty result is reported as
/// [`PipelineError::EmptyRange`] carrying the requested policy.
pub fn apply_window(
    series: &TimeSeries,
    policy: WindowPolicy,
    today: NaiveDate,
) -> Result<WindowedSeries, PipelineError> {
    let start = policy.start_date(today);

    let mut splits_excluded = 0;
    let observations: Vec<DailyObservation> = series
        .observations()
        .iter()
        .filter(|o| start.is_none_or(|s| o.date >= s) && o.date <= today)
        .filter(|o| {
            let split = o.is_split_day();
            splits_excluded += usize::from(split);
            !split
        })
        .copied()
        .collect();

    debug!(
        symbol = series.symbol(),
        window = %policy,
        start = ?start,
        retained = observations.len(),
        splits_excluded,
        "window applied"
    );

    if observations.is_empty() {
        return Err(PipelineError::EmptyRange {
            symbol: series.symbol().to_string(),
            range: policy,
        });
    }

    Ok(WindowedSeries {
        policy,
        start,
        observations,
        splits_excluded,
    })
}
