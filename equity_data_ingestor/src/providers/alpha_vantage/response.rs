//! Alpha Vantage wire shapes and their translation into the crate's vendor-agnostic models.
//!
//! Alpha Vantage keys its fields with numbered, human-readable names (`"1. open"`,
//! `"5. adjusted close"`, `"Time Series (Daily)"`) and reports problems inside a `200 OK`
//! body (`"Error Message"`, `"Note"`, `"Information"`). Both quirks stop at this module.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{
    models::{
        daily_series::{RawDailyRecord, RawDailySeries},
        overview::{AnalystRatings, CompanyOverview},
        quote::GlobalQuote,
    },
    providers::{ApiSnafu, InternalSnafu, NotFoundSnafu, ProviderError, RateLimitedSnafu},
};

/// Accepts a JSON string or number and keeps it as text; anything else becomes `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Parses a provider numeric field, treating Alpha Vantage placeholders as absent.
fn parse_number(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim().trim_end_matches('%');
    if raw.is_empty() || raw == "-" || raw.eq_ignore_ascii_case("none") {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_count(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("none"))
}

/// In-band problem reports Alpha Vantage puts in an otherwise successful response.
#[derive(Deserialize, Debug, Default)]
pub struct Notices {
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
}

impl Notices {
    /// Turns an in-band notice into the matching [`ProviderError`].
    pub fn check(&self) -> Result<(), ProviderError> {
        if let Some(message) = &self.error_message {
            return ApiSnafu { message }.fail();
        }
        if let Some(message) = &self.note {
            return RateLimitedSnafu { message }.fail();
        }
        if let Some(message) = &self.information {
            let lower = message.to_ascii_lowercase();
            if lower.contains("rate limit") || lower.contains("requests per") {
                return RateLimitedSnafu { message }.fail();
            }
            return ApiSnafu { message }.fail();
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct AvMetaData {
    #[serde(rename = "2. Symbol", default, deserialize_with = "lenient_string")]
    pub symbol: Option<String>,
    #[serde(rename = "5. Time Zone", default, deserialize_with = "lenient_string")]
    pub time_zone: Option<String>,
}

/// One row of `TIME_SERIES_DAILY_ADJUSTED` (or `TIME_SERIES_DAILY`, which lacks the
/// adjustment fields).
#[derive(Deserialize, Debug, Default)]
pub struct AvDailyBar {
    #[serde(rename = "1. open", default, deserialize_with = "lenient_string")]
    pub open: Option<String>,
    #[serde(rename = "4. close", default, deserialize_with = "lenient_string")]
    pub close: Option<String>,
    #[serde(rename = "5. adjusted close", default, deserialize_with = "lenient_string")]
    pub adjusted_close: Option<String>,
    #[serde(
        rename = "8. split coefficient",
        default,
        deserialize_with = "lenient_string"
    )]
    pub split_coefficient: Option<String>,
}

impl From<AvDailyBar> for RawDailyRecord {
    fn from(bar: AvDailyBar) -> Self {
        RawDailyRecord {
            open: bar.open,
            close: bar.close,
            adjusted_close: bar.adjusted_close,
            split_coefficient: bar.split_coefficient,
        }
    }
}

/// Decodes the daily rows one by one. A row that is not an object (`null`, a bare
/// string, ...) becomes an empty bar, which the normalizer then skips as malformed.
fn lenient_rows<'de, D>(
    deserializer: D,
) -> Result<Option<IndexMap<String, AvDailyBar>>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Option::<IndexMap<String, Value>>::deserialize(deserializer)?;
    Ok(rows.map(|rows| {
        rows.into_iter()
            .map(|(date, row)| {
                let bar = match row {
                    Value::Object(_) => AvDailyBar::deserialize(row).unwrap_or_default(),
                    _ => AvDailyBar::default(),
                };
                (date, bar)
            })
            .collect()
    }))
}

#[derive(Deserialize, Debug)]
pub struct DailyResponse {
    #[serde(rename = "Meta Data", default)]
    pub meta: Option<AvMetaData>,
    #[serde(
        rename = "Time Series (Daily)",
        default,
        deserialize_with = "lenient_rows"
    )]
    pub time_series: Option<IndexMap<String, AvDailyBar>>,
    #[serde(flatten)]
    pub notices: Notices,
}

impl DailyResponse {
    /// Converts into a [`RawDailySeries`], surfacing in-band notices as errors.
    ///
    /// A body without `"Time Series (Daily)"` and without notices becomes
    /// [`RawDailySeries::missing`].
    pub fn into_raw_series(self, requested_symbol: &str) -> Result<RawDailySeries, ProviderError> {
        self.notices.check()?;

        let symbol = self
            .meta
            .and_then(|m| non_blank(m.symbol))
            .unwrap_or_else(|| requested_symbol.to_string());

        Ok(match self.time_series {
            None => RawDailySeries::missing(symbol),
            Some(rows) => RawDailySeries::new(
                symbol,
                rows.into_iter()
                    .map(|(date, bar)| (date, RawDailyRecord::from(bar)))
                    .collect(),
            ),
        })
    }
}

#[derive(Deserialize, Debug)]
pub struct OverviewResponse {
    #[serde(rename = "Symbol", default, deserialize_with = "lenient_string")]
    pub symbol: Option<String>,
    #[serde(rename = "Name", default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(rename = "Description", default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(rename = "Exchange", default, deserialize_with = "lenient_string")]
    pub exchange: Option<String>,
    #[serde(rename = "Currency", default, deserialize_with = "lenient_string")]
    pub currency: Option<String>,
    #[serde(rename = "Country", default, deserialize_with = "lenient_string")]
    pub country: Option<String>,
    #[serde(rename = "Sector", default, deserialize_with = "lenient_string")]
    pub sector: Option<String>,
    #[serde(rename = "Industry", default, deserialize_with = "lenient_string")]
    pub industry: Option<String>,
    #[serde(rename = "Address", default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    #[serde(
        rename = "MarketCapitalization",
        default,
        deserialize_with = "lenient_string"
    )]
    pub market_capitalization: Option<String>,
    #[serde(rename = "EBITDA", default, deserialize_with = "lenient_string")]
    pub ebitda: Option<String>,
    #[serde(rename = "PERatio", default, deserialize_with = "lenient_string")]
    pub pe_ratio: Option<String>,
    #[serde(rename = "ProfitMargin", default, deserialize_with = "lenient_string")]
    pub profit_margin: Option<String>,
    #[serde(
        rename = "AnalystRatingStrongBuy",
        default,
        deserialize_with = "lenient_string"
    )]
    pub rating_strong_buy: Option<String>,
    #[serde(rename = "AnalystRatingBuy", default, deserialize_with = "lenient_string")]
    pub rating_buy: Option<String>,
    #[serde(rename = "AnalystRatingHold", default, deserialize_with = "lenient_string")]
    pub rating_hold: Option<String>,
    #[serde(rename = "AnalystRatingSell", default, deserialize_with = "lenient_string")]
    pub rating_sell: Option<String>,
    #[serde(
        rename = "AnalystRatingStrongSell",
        default,
        deserialize_with = "lenient_string"
    )]
    pub rating_strong_sell: Option<String>,
    #[serde(flatten)]
    pub notices: Notices,
}

impl OverviewResponse {
    /// Alpha Vantage answers an unknown symbol with `{}`; that becomes [`ProviderError::NotFound`].
    pub fn into_overview(self, requested_symbol: &str) -> Result<CompanyOverview, ProviderError> {
        self.notices.check()?;

        let Some(symbol) = non_blank(self.symbol) else {
            return NotFoundSnafu {
                symbol: requested_symbol,
            }
            .fail();
        };

        Ok(CompanyOverview {
            symbol,
            name: non_blank(self.name),
            description: non_blank(self.description),
            exchange: non_blank(self.exchange),
            currency: non_blank(self.currency),
            sector: non_blank(self.sector),
            industry: non_blank(self.industry),
            address: non_blank(self.address),
            country: non_blank(self.country),
            market_capitalization: parse_number(self.market_capitalization.as_deref()),
            ebitda: parse_number(self.ebitda.as_deref()),
            pe_ratio: parse_number(self.pe_ratio.as_deref()),
            profit_margin: parse_number(self.profit_margin.as_deref()),
            analyst_ratings: AnalystRatings {
                strong_buy: parse_count(self.rating_strong_buy.as_deref()),
                buy: parse_count(self.rating_buy.as_deref()),
                hold: parse_count(self.rating_hold.as_deref()),
                sell: parse_count(self.rating_sell.as_deref()),
                strong_sell: parse_count(self.rating_strong_sell.as_deref()),
            },
        })
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct AvQuote {
    #[serde(rename = "01. symbol", default, deserialize_with = "lenient_string")]
    pub symbol: Option<String>,
    #[serde(rename = "05. price", default, deserialize_with = "lenient_string")]
    pub price: Option<String>,
    #[serde(
        rename = "07. latest trading day",
        default,
        deserialize_with = "lenient_string"
    )]
    pub latest_trading_day: Option<String>,
    #[serde(rename = "08. previous close", default, deserialize_with = "lenient_string")]
    pub previous_close: Option<String>,
    #[serde(rename = "10. change percent", default, deserialize_with = "lenient_string")]
    pub change_percent: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote", default)]
    pub quote: Option<AvQuote>,
    #[serde(flatten)]
    pub notices: Notices,
}

impl GlobalQuoteResponse {
    /// An absent or empty `"Global Quote"` object becomes [`ProviderError::NotFound`].
    pub fn into_quote(self, requested_symbol: &str) -> Result<GlobalQuote, ProviderError> {
        self.notices.check()?;

        let quote = self.quote.unwrap_or_default();
        let Some(symbol) = non_blank(quote.symbol) else {
            return NotFoundSnafu {
                symbol: requested_symbol,
            }
            .fail();
        };
        let Some(price) = parse_number(quote.price.as_deref()) else {
            return InternalSnafu {
                message: format!("quote for {symbol} has no usable price"),
            }
            .fail();
        };

        Ok(GlobalQuote {
            symbol,
            price,
            previous_close: parse_number(quote.previous_close.as_deref()),
            change_percent: parse_number(quote.change_percent.as_deref()),
            latest_trading_day: quote
                .latest_trading_day
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok()),
        })
    }
}
