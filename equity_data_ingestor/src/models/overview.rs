//! Company fundamentals as returned by an overview endpoint.

use serde::{Deserialize, Serialize};

/// Analyst recommendation counts for a symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalystRatings {
    pub strong_buy: u32,
    pub buy: u32,
    pub hold: u32,
    pub sell: u32,
    pub strong_sell: u32,
}

impl AnalystRatings {
    pub fn total(&self) -> u32 {
        self.strong_buy + self.buy + self.hold + self.sell + self.strong_sell
    }

    /// Weighted mean on a 1..=5 scale (strong buy = 5, strong sell = 1).
    ///
    /// Returns `0.0` when there are no ratings at all.
    pub fn weighted_average(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let weighted = 5 * u64::from(self.strong_buy)
            + 4 * u64::from(self.buy)
            + 3 * u64::from(self.hold)
            + 2 * u64::from(self.sell)
            + u64::from(self.strong_sell);
        weighted as f64 / f64::from(total)
    }
}

/// Vendor-agnostic company overview.
///
/// Numeric fields are `None` whenever the vendor reported a placeholder
/// (`"None"`, `"-"`, empty) instead of a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyOverview {
    pub symbol: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub exchange: Option<String>,
    pub currency: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    /// Headquarters street address as a single line.
    pub address: Option<String>,
    pub country: Option<String>,
    pub market_capitalization: Option<f64>,
    pub ebitda: Option<f64>,
    pub pe_ratio: Option<f64>,
    /// Profit margin as a ratio (0.25 = 25%).
    pub profit_margin: Option<f64>,
    pub analyst_ratings: AnalystRatings,
}

impl CompanyOverview {
    /// Address line suitable for a map lookup, when both address and country are known.
    pub fn headquarters(&self) -> Option<String> {
        match (self.address.as_deref(), self.country.as_deref()) {
            (Some(address), Some(country)) => Some(format!("{address}, {country}")),
            _ => None,
        }
    }
}
