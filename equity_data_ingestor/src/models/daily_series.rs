//! Provider-neutral raw daily series.
//!
//! This is what every [`DataProvider`](crate::providers::DataProvider) hands back for a
//! daily-history request. Values are kept exactly as the vendor emitted them (strings);
//! numeric parsing, validation and ordering happen downstream in the normalizer, which
//! is the only place that decides what a malformed row is.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One raw row of a daily series, keyed by its date string in [`RawDailySeries`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDailyRecord {
    /// Opening price.
    pub open: Option<String>,

    /// Closing price, unadjusted.
    pub close: Option<String>,

    /// Closing price adjusted for splits and dividends. Not all endpoints supply this.
    pub adjusted_close: Option<String>,

    /// Split multiplier for the day (`"1.0"` on ordinary days). Not all endpoints supply this.
    pub split_coefficient: Option<String>,
}

impl RawDailyRecord {
    /// Convenience constructor for rows from endpoints without adjustment data.
    pub fn unadjusted(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: Some(open.into()),
            close: Some(close.into()),
            adjusted_close: None,
            split_coefficient: None,
        }
    }
}

/// A complete raw daily series for a single symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDailySeries {
    /// The symbol this data represents (e.g., "AAPL").
    pub symbol: String,

    /// Date string (`YYYY-MM-DD`) -> raw row, in provider order.
    ///
    /// `None` means the payload did not contain a series at all, which is different
    /// from a series that is present but empty.
    pub records: Option<IndexMap<String, RawDailyRecord>>,
}

impl RawDailySeries {
    pub fn new(symbol: impl Into<String>, records: IndexMap<String, RawDailyRecord>) -> Self {
        Self {
            symbol: symbol.into(),
            records: Some(records),
        }
    }

    /// A series whose payload lacked the time-series key.
    pub fn missing(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            records: None,
        }
    }

    /// Number of raw rows, zero when the series is missing.
    pub fn len(&self) -> usize {
        self.records.as_ref().map_or(0, IndexMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_empty_both_report_zero_rows() {
        assert!(RawDailySeries::missing("IBM").is_empty());
        assert!(RawDailySeries::new("IBM", IndexMap::new()).is_empty());
        assert_ne!(
            RawDailySeries::missing("IBM"),
            RawDailySeries::new("IBM", IndexMap::new())
        );
    }

    #[test]
    fn preserves_provider_order() {
        let mut records = IndexMap::new();
        records.insert("2024-01-03".to_string(), RawDailyRecord::unadjusted("1", "2"));
        records.insert("2024-01-02".to_string(), RawDailyRecord::unadjusted("3", "4"));
        let series = RawDailySeries::new("IBM", records);

        let keys: Vec<_> = series.records.as_ref().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["2024-01-03", "2024-01-02"]);
        assert_eq!(series.len(), 2);
    }
}
