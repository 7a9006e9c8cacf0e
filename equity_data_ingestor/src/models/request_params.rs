use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// How much history a daily-series request asks for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSize {
    /// The latest ~100 data points.
    Compact,
    /// The full available history (20+ years for most US equities).
    #[default]
    Full,
}

impl OutputSize {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OutputSize::Compact => "compact",
            OutputSize::Full => "full",
        }
    }
}

impl fmt::Display for OutputSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(OutputSize::Compact),
            "full" => Ok(OutputSize::Full),
            other => Err(format!("unknown output size: {other}")),
        }
    }
}

/// Vendor-agnostic parameters for a daily price-history request.
///
/// This is the standard input for
/// [`DataProvider::fetch_daily_series`](crate::providers::DataProvider::fetch_daily_series).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySeriesRequest {
    /// Ticker to request (e.g., `"AAPL"`). Callers are expected to normalize it first.
    pub symbol: String,

    /// Amount of history to request. Providers without a size knob ignore it.
    #[serde(default)]
    pub output_size: OutputSize,
}

impl DailySeriesRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            output_size: OutputSize::default(),
        }
    }

    pub fn with_output_size(mut self, output_size: OutputSize) -> Self {
        self.output_size = output_size;
        self
    }
}
