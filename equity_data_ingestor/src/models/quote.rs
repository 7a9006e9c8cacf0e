use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Latest quote for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalQuote {
    pub symbol: String,
    /// Last traded price.
    pub price: f64,
    pub previous_close: Option<f64>,
    /// Day change in percent (1.5 = +1.5%).
    pub change_percent: Option<f64>,
    pub latest_trading_day: Option<NaiveDate>,
}
