//! Error types for the chart pipeline.

use std::fmt;

use thiserror::Error;

use crate::window::WindowPolicy;

/// Why a series had nothing to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingReason {
    /// The provider payload did not contain a daily series at all.
    NoSeries,
    /// The series was present but had no rows.
    EmptySeries,
    /// Every row was malformed.
    AllMalformed {
        /// Rows that were skipped.
        skipped: usize,
    },
}

impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingReason::NoSeries => f.write_str("payload has no daily time series"),
            MissingReason::EmptySeries => f.write_str("daily time series is empty"),
            MissingReason::AllMalformed { skipped } => {
                write!(f, "all {skipped} daily records were malformed")
            }
        }
    }
}

/// Errors surfaced by [`crate::pipeline::compute_chart_data`].
///
/// Neither variant is retryable: the same input produces the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// No usable daily data for the symbol.
    #[error("no daily data for {symbol}: {reason}")]
    MissingData {
        /// Symbol from the raw series.
        symbol: String,
        /// What was missing.
        reason: MissingReason,
    },

    /// The window (plus split-day exclusion) removed every observation.
    #[error("no data for {symbol} in range {range}")]
    EmptyRange {
        /// Symbol from the raw series.
        symbol: String,
        /// The requested window.
        range: WindowPolicy,
    },
}

/// The raw field a [`MalformedRecord`] failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    /// The date key.
    Date,
    /// Opening price.
    Open,
    /// Closing price.
    Close,
    /// Adjusted close.
    AdjustedClose,
    /// Split coefficient.
    SplitCoefficient,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordField::Date => "date",
            RecordField::Open => "open",
            RecordField::Close => "close",
            RecordField::AdjustedClose => "adjusted_close",
            RecordField::SplitCoefficient => "split_coefficient",
        })
    }
}

/// A raw row the normalizer skipped.
///
/// These never abort a run; they are collected in
/// [`NormalizationReport`](crate::normalize::NormalizationReport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed record {date}: {field} = {}", .value.as_deref().unwrap_or("<missing>"))]
pub struct MalformedRecord {
    /// The row's date key as received.
    pub date: String,
    /// First field that failed validation.
    pub field: RecordField,
    /// Offending raw value, `None` if the field was absent.
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = PipelineError::EmptyRange {
            symbol: "IBM".into(),
            range: WindowPolicy::ThisMonth,
        };
        assert_eq!(err.to_string(), "no data for IBM in range this_month");

        let err = PipelineError::MissingData {
            symbol: "IBM".into(),
            reason: MissingReason::AllMalformed { skipped: 3 },
        };
        assert_eq!(
            err.to_string(),
            "no daily data for IBM: all 3 daily records were malformed"
        );

        let rec = MalformedRecord {
            date: "2024-01-02".into(),
            field: RecordField::Open,
            value: None,
        };
        assert_eq!(rec.to_string(), "malformed record 2024-01-02: open = <missing>");
    }
}
