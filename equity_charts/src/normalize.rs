//! Raw series normalization.
//!
//! Turns a provider-neutral [`RawDailySeries`] (date string -> string fields, provider
//! order) into a [`TimeSeries`] of typed [`DailyObservation`]s, ascending by date.
//!
//! Row rules:
//! - the key must be a `YYYY-MM-DD` date;
//! - `open` and `close` must parse as finite numbers, `open` must be positive and the
//!   resulting percent change must be finite;
//! - a missing `adjusted_close` falls back to `close`;
//! - a missing `split_coefficient` means `1.0`;
//! - any present-but-unparseable field makes the row malformed.
//!
//! Malformed rows are skipped and recorded in the [`NormalizationReport`]. When two keys
//! resolve to the same date the first one in provider order wins.

use std::collections::{BTreeMap, btree_map::Entry};

use chrono::NaiveDate;
use equity_data_ingestor::models::daily_series::{RawDailyRecord, RawDailySeries};
use tracing::{debug, warn};

use crate::{
    errors::{MalformedRecord, MissingReason, PipelineError, RecordField},
    observation::{DailyObservation, TimeSeries},
};

/// Summary of what normalization dropped.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NormalizationReport {
    /// Raw rows examined.
    pub records_seen: usize,
    /// Rows skipped because a field failed to parse or validate.
    pub skipped: Vec<MalformedRecord>,
    /// Rows dropped because an earlier row had the same date.
    pub duplicate_dates: usize,
}

impl NormalizationReport {
    /// Number of malformed rows.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Output of [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// The ordered series.
    pub series: TimeSeries,
    /// What was dropped on the way.
    pub report: NormalizationReport,
}

/// Normalizes a raw series.
///
/// Errors with [`PipelineError::MissingData`] when the payload had no series, the series
/// was empty, or no row survived validation.
pub fn normalize(raw: &RawDailySeries) -> Result<Normalized, PipelineError> {
    let missing = |reason| PipelineError::MissingData {
        symbol: raw.symbol.clone(),
        reason,
    };

    let records = raw.records.as_ref().ok_or_else(|| missing(MissingReason::NoSeries))?;
    if records.is_empty() {
        return Err(missing(MissingReason::EmptySeries));
    }

    let mut report = NormalizationReport {
        records_seen: records.len(),
        ..Default::default()
    };
    let mut by_date: BTreeMap<NaiveDate, DailyObservation> = BTreeMap::new();

    for (date_key, record) in records {
        match parse_record(date_key, record) {
            Ok(obs) => match by_date.entry(obs.date) {
                Entry::Vacant(slot) => {
                    slot.insert(obs);
                }
                Entry::Occupied(_) => report.duplicate_dates += 1,
            },
            Err(bad) => {
                debug!(symbol = %raw.symbol, record = %bad, "skipping malformed record");
                report.skipped.push(bad);
            }
        }
    }

    if report.skipped_count() > 0 {
        warn!(
            symbol = %raw.symbol,
            skipped = report.skipped_count(),
            seen = report.records_seen,
            "skipped malformed daily records"
        );
    }

    if by_date.is_empty() {
        return Err(missing(MissingReason::AllMalformed {
            skipped: report.skipped_count(),
        }));
    }

    let series = TimeSeries::from_sorted(raw.symbol.clone(), by_date.into_values().collect());
    Ok(Normalized { series, report })
}

fn parse_record(date_key: &str, record: &RawDailyRecord) -> Result<DailyObservation, MalformedRecord> {
    let malformed = |field, value: Option<&str>| MalformedRecord {
        date: date_key.to_string(),
        field,
        value: value.map(str::to_string),
    };

    let date = NaiveDate::parse_from_str(date_key.trim(), "%Y-%m-%d")
        .map_err(|_| malformed(RecordField::Date, Some(date_key)))?;

    let open = required(record.open.as_deref())
        .filter(|v| *v > 0.0)
        .ok_or_else(|| malformed(RecordField::Open, record.open.as_deref()))?;
    let close = required(record.close.as_deref())
        // finite inputs can still overflow the percent change
        .filter(|c| ((c - open) / open * 100.0).is_finite())
        .ok_or_else(|| malformed(RecordField::Close, record.close.as_deref()))?;
    let adjusted_close = optional(record.adjusted_close.as_deref(), close)
        .ok_or_else(|| malformed(RecordField::AdjustedClose, record.adjusted_close.as_deref()))?;
    let split_coefficient = optional(record.split_coefficient.as_deref(), 1.0).ok_or_else(|| {
        malformed(
            RecordField::SplitCoefficient,
            record.split_coefficient.as_deref(),
        )
    })?;

    Ok(DailyObservation {
        date,
        open,
        close,
        adjusted_close,
        split_coefficient,
    })
}

/// Finite number, or `None` when absent or unparseable.
fn required(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `fallback` when absent; `None` only when present and unparseable.
fn optional(raw: Option<&str>, fallback: f64) -> Option<f64> {
    match raw {
        None => Some(fallback),
        Some(_) => required(raw),
    }
}
