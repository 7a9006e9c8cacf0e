//! Query-string construction for the Alpha Vantage `query` endpoint.

use crate::{
    models::request_params::OutputSize,
    providers::{ProviderError, ValidationSnafu},
};

/// The Alpha Vantage functions this adapter calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    /// Daily OHLC with adjusted close and split coefficient.
    TimeSeriesDailyAdjusted,
    /// Daily OHLC without adjustment data.
    TimeSeriesDaily,
    Overview,
    GlobalQuote,
}

impl Function {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Function::TimeSeriesDailyAdjusted => "TIME_SERIES_DAILY_ADJUSTED",
            Function::TimeSeriesDaily => "TIME_SERIES_DAILY",
            Function::Overview => "OVERVIEW",
            Function::GlobalQuote => "GLOBAL_QUOTE",
        }
    }

    pub const fn daily(adjusted: bool) -> Self {
        if adjusted {
            Function::TimeSeriesDailyAdjusted
        } else {
            Function::TimeSeriesDaily
        }
    }
}

const MAX_SYMBOL_LEN: usize = 12;

/// Rejects symbols Alpha Vantage can never resolve before spending a request on them.
///
/// Accepts ASCII letters, digits, `.` and `-` (e.g. `BRK-B`, `SHOP.TRT`).
pub fn validate_symbol(symbol: &str) -> Result<(), ProviderError> {
    if symbol.is_empty() {
        return ValidationSnafu {
            message: "symbol cannot be empty",
        }
        .fail();
    }
    if symbol.len() > MAX_SYMBOL_LEN {
        return ValidationSnafu {
            message: format!("symbol too long (max {MAX_SYMBOL_LEN} chars): {symbol}"),
        }
        .fail();
    }
    if !symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return ValidationSnafu {
            message: format!("symbol contains unsupported characters: {symbol}"),
        }
        .fail();
    }
    Ok(())
}

/// Builds the query pairs for one call, without the API key.
pub fn construct_params(
    function: Function,
    symbol: &str,
    output_size: Option<OutputSize>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("function", function.as_str().to_string()),
        ("symbol", symbol.to_string()),
    ];
    if let Some(size) = output_size {
        params.push(("outputsize", size.as_str().to_string()));
    }
    params
}
