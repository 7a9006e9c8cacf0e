//! The full transformation: normalize, window, aggregate, bucketize, assemble.

use chrono::NaiveDate;
use equity_data_ingestor::models::daily_series::RawDailySeries;
use tracing::info;

use crate::{
    assemble::{ChartData, assemble},
    distribution::bucketize,
    errors::PipelineError,
    normalize::normalize,
    seasonality::aggregate,
    window::{WindowPolicy, apply_window},
};

/// Computes chart data from a raw daily series.
///
/// Pure and synchronous: the same `raw`, `policy` and `today` always give the same
/// result, and nothing is retained between calls.
///
/// # Errors
/// - [`PipelineError::MissingData`] when `raw` has no usable rows.
/// - [`PipelineError::EmptyRange`] when the window leaves nothing to aggregate.
pub fn compute_chart_data(
    raw: &RawDailySeries,
    policy: WindowPolicy,
    today: NaiveDate,
) -> Result<ChartData, PipelineError> {
    let normalized = normalize(raw)?;
    let windowed = apply_window(&normalized.series, policy, today)?;

    let seasonality = aggregate(&windowed.observations);
    let distribution = bucketize(&windowed.observations);

    let chart = assemble(
        normalized.series.symbol(),
        &windowed,
        &normalized.report,
        &seasonality,
        &distribution,
    );

    info!(
        symbol = %chart.symbol,
        window = %policy,
        observations = chart.observations,
        skipped = chart.skipped_records,
        "chart data computed"
    );
    Ok(chart)
}

#[cfg(test)]
mod tests {
    use equity_data_ingestor::models::daily_series::RawDailyRecord;
    use indexmap::IndexMap;
    use proptest::prelude::*;

    use super::*;

    fn raw_from(rows: &[(NaiveDate, f64, f64, f64)]) -> RawDailySeries {
        let records: IndexMap<String, RawDailyRecord> = rows
            .iter()
            .map(|(date, open, close, split)| {
                (
                    date.format("%Y-%m-%d").to_string(),
                    RawDailyRecord {
                        open: Some(open.to_string()),
                        close: Some(close.to_string()),
                        adjusted_close: Some(close.to_string()),
                        split_coefficient: Some(split.to_string()),
                    },
                )
            })
            .collect();
        RawDailySeries::new("TEST", records)
    }

    fn arb_rows() -> impl Strategy<Value = Vec<(NaiveDate, f64, f64, f64)>> {
        prop::collection::vec(
            (
                0u64..2000,
                1.0f64..400.0,
                1.0f64..400.0,
                prop_oneof![4 => Just(1.0f64), 1 => Just(2.0f64)],
            ),
            1..120,
        )
        .prop_map(|rows| {
            let base = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
            rows.into_iter()
                .map(|(off, o, c, s)| (base + chrono::Days::new(off), o, c, s))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn invariants_hold_for_any_series(rows in arb_rows()) {
            let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
            let raw = raw_from(&rows);

            match compute_chart_data(&raw, WindowPolicy::Max, today) {
                Ok(chart) => {
                    prop_assert_eq!(chart.weekday_seasonality.len(), 5);
                    prop_assert_eq!(chart.month_seasonality.len(), 12);
                    prop_assert_eq!(chart.change_distribution.len(), 11);
                    let total: usize = chart.change_distribution.iter().map(|p| p.y).sum();
                    prop_assert_eq!(total, chart.observations);
                    prop_assert_eq!(chart.price_series.len(), chart.observations);
                    prop_assert!(chart.price_series.windows(2).all(|w| w[0].x < w[1].x));

                    let again = compute_chart_data(&raw, WindowPolicy::Max, today).unwrap();
                    prop_assert_eq!(
                        serde_json::to_string(&chart).unwrap(),
                        serde_json::to_string(&again).unwrap()
                    );
                }
                // every distinct day was a split day
                Err(PipelineError::EmptyRange { .. }) => {}
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn split_day_is_in_no_aggregate() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
        // 2024-06-03 Mon, 2024-06-04 Tue (split)
        let raw = raw_from(&[(d(3), 100.0, 101.0, 1.0), (d(4), 400.0, 100.0, 4.0)]);
        let chart = compute_chart_data(&raw, WindowPolicy::Max, d(30)).unwrap();

        assert_eq!(chart.observations, 1);
        assert_eq!(chart.splits_excluded, 1);
        assert_eq!(chart.weekday_seasonality[1].observations, 0);
        assert_eq!(chart.change_distribution[0].y, 0);
        assert!(chart.price_series.iter().all(|p| p.x != d(4)));
    }
}
