//! Day-of-week and month-of-year seasonality.
//!
//! Every retained observation contributes its intraday percent change to one weekday
//! bucket (Monday..Friday; weekend rows are ignored here) and, independently, to one
//! month bucket (January..December, pooled across years). The aggregate is the plain
//! arithmetic mean. An empty bucket reports `0.0`; its `observations` count of zero is
//! what tells "no data" apart from a flat average.

use chrono::{Datelike, Month, Weekday};
use serde::Serialize;

use crate::observation::DailyObservation;

/// Trading weekdays in output order.
pub const WEEKDAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Months in output order.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Returns collected for one label during a single aggregation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalityBucket<L> {
    /// Weekday or month.
    pub label: L,
    /// Percent changes, in the order they were added.
    pub returns: Vec<f64>,
}

impl<L: Copy> SeasonalityBucket<L> {
    fn new(label: L) -> Self {
        Self {
            label,
            returns: Vec::new(),
        }
    }

    /// Arithmetic mean of the returns, `0.0` when empty.
    pub fn average(&self) -> f64 {
        if self.returns.is_empty() {
            return 0.0;
        }
        self.returns.iter().sum::<f64>() / self.returns.len() as f64
    }

    fn summarize(&self, name: &'static str) -> SeasonalAverage {
        SeasonalAverage {
            label: name,
            average: self.average(),
            observations: self.returns.len(),
        }
    }
}

/// Folded result for one label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonalAverage {
    /// `Monday`..`Friday` or `Jan`..`Dec`.
    pub label: &'static str,
    /// Mean percent change (full precision).
    pub average: f64,
    /// Number of observations behind `average`.
    pub observations: usize,
}

/// Both seasonality views over the same observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Seasonality {
    /// Exactly five entries, Monday..Friday.
    pub weekday: Vec<SeasonalAverage>,
    /// Exactly twelve entries, January..December.
    pub month: Vec<SeasonalAverage>,
}

/// Display name used for a weekday bucket.
pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Three-letter display name used for a month bucket.
pub fn month_label(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// Aggregates observations into weekday and month averages.
///
/// Output order is fixed and independent of input order.
pub fn aggregate(observations: &[DailyObservation]) -> Seasonality {
    let mut weekdays = WEEKDAYS.map(SeasonalityBucket::new);
    let mut months = MONTHS.map(SeasonalityBucket::new);

    for obs in observations {
        let change = obs.percent_change();

        // Mon = 0 .. Sun = 6; the weekend falls outside the five buckets
        if let Some(bucket) = weekdays.get_mut(obs.date.weekday().num_days_from_monday() as usize) {
            bucket.returns.push(change);
        }
        months[obs.date.month0() as usize].returns.push(change);
    }

    Seasonality {
        weekday: weekdays
            .iter()
            .map(|b| b.summarize(weekday_label(b.label)))
            .collect(),
        month: months
            .iter()
            .map(|b| b.summarize(month_label(b.label)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use proptest::prelude::*;

    use super::*;

    fn obs(y: i32, m: u32, d: u32, open: f64, close: f64) -> DailyObservation {
        DailyObservation {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            open,
            close,
            adjusted_close: close,
            split_coefficient: 1.0,
        }
    }

    #[test]
    fn empty_input_reports_zero_everywhere() {
        let s = aggregate(&[]);
        assert_eq!(s.weekday.len(), 5);
        assert_eq!(s.month.len(), 12);
        assert!(s.weekday.iter().all(|a| a.average == 0.0 && a.observations == 0));
        assert!(s.month.iter().all(|a| a.average == 0.0 && a.observations == 0));
    }

    #[test]
    fn labels_are_fixed() {
        let s = aggregate(&[]);
        let wd: Vec<_> = s.weekday.iter().map(|a| a.label).collect();
        assert_eq!(wd, vec!["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]);
        let mo: Vec<_> = s.month.iter().map(|a| a.label).collect();
        assert_eq!(
            mo,
            vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
        );
    }

    #[test]
    fn weekend_rows_only_count_towards_months() {
        // 2024-06-01 is a Saturday
        let s = aggregate(&[obs(2024, 6, 1, 100.0, 102.0)]);
        assert!(s.weekday.iter().all(|a| a.observations == 0));
        assert_eq!(s.month[5].observations, 1);
        assert_eq!(s.month[5].average, 2.0);
    }

    #[test]
    fn months_pool_across_years() {
        // 2023-01-03 Tue, 2024-01-03 Wed
        let s = aggregate(&[obs(2023, 1, 3, 100.0, 101.0), obs(2024, 1, 3, 100.0, 103.0)]);
        assert_eq!(s.month[0].observations, 2);
        assert_eq!(s.month[0].average, 2.0);
        assert_eq!(s.weekday[1].average, 1.0);
        assert_eq!(s.weekday[2].average, 3.0);
    }

    fn arb_obs() -> impl Strategy<Value = DailyObservation> {
        (0u32..3650, 1.0f64..500.0, 1.0f64..500.0).prop_map(|(offset, open, close)| {
            let date = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap() + chrono::Days::new(offset.into());
            DailyObservation {
                date,
                open,
                close,
                adjusted_close: close,
                split_coefficient: 1.0,
            }
        })
    }

    proptest! {
        #[test]
        fn shape_and_counts_hold(mut rows in prop::collection::vec(arb_obs(), 0..200)) {
            let forward = aggregate(&rows);
            rows.reverse();
            let backward = aggregate(&rows);

            prop_assert_eq!(forward.weekday.len(), 5);
            prop_assert_eq!(forward.month.len(), 12);

            let month_total: usize = forward.month.iter().map(|a| a.observations).sum();
            prop_assert_eq!(month_total, rows.len());

            let weekdays = rows.iter().filter(|o| o.date.weekday().num_days_from_monday() < 5).count();
            let weekday_total: usize = forward.weekday.iter().map(|a| a.observations).sum();
            prop_assert_eq!(weekday_total, weekdays);

            let pairs = forward
                .weekday
                .iter()
                .zip(&backward.weekday)
                .chain(forward.month.iter().zip(&backward.month));
            for (a, b) in pairs {
                prop_assert_eq!(a.label, b.label);
                prop_assert_eq!(a.observations, b.observations);
                // summation order differs, so allow for rounding relative to the magnitude
                prop_assert!((a.average - b.average).abs() <= 1e-9 * a.average.abs().max(1.0));
            }
        }
    }
}
