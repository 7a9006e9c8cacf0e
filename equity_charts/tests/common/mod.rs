#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use equity_data_ingestor::{
    models::{
        daily_series::{RawDailyRecord, RawDailySeries},
        overview::{AnalystRatings, CompanyOverview},
        quote::GlobalQuote,
        request_params::DailySeriesRequest,
    },
    providers::{ApiSnafu, DataProvider, NotFoundSnafu, ProviderError},
};
use indexmap::IndexMap;

/// One raw row: (date, open, close, split coefficient).
pub type Row<'a> = (&'a str, f64, f64, f64);

pub fn raw_series(symbol: &str, rows: &[Row<'_>]) -> RawDailySeries {
    let records: IndexMap<String, RawDailyRecord> = rows
        .iter()
        .map(|&(date, open, close, split)| {
            (
                date.to_string(),
                RawDailyRecord {
                    open: Some(format!("{open:.4}")),
                    close: Some(format!("{close:.4}")),
                    adjusted_close: Some(format!("{close:.4}")),
                    split_coefficient: Some(format!("{split:.1}")),
                },
            )
        })
        .collect();
    RawDailySeries::new(symbol, records)
}

/// Five Mondays at +1..+5% and five Tuesdays at -0.5..-2.5%, June/July 2024,
/// newest first like the upstream API.
pub fn mondays_and_tuesdays() -> RawDailySeries {
    raw_series(
        "SEAS",
        &[
            ("2024-07-02", 200.0, 195.0, 1.0),
            ("2024-07-01", 100.0, 105.0, 1.0),
            ("2024-06-25", 200.0, 196.0, 1.0),
            ("2024-06-24", 100.0, 104.0, 1.0),
            ("2024-06-18", 200.0, 197.0, 1.0),
            ("2024-06-17", 100.0, 103.0, 1.0),
            ("2024-06-11", 200.0, 198.0, 1.0),
            ("2024-06-10", 100.0, 102.0, 1.0),
            ("2024-06-04", 200.0, 199.0, 1.0),
            ("2024-06-03", 100.0, 101.0, 1.0),
        ],
    )
}

pub fn overview(symbol: &str) -> CompanyOverview {
    CompanyOverview {
        symbol: symbol.to_string(),
        name: Some(format!("{symbol} Corp")),
        market_capitalization: Some(2_500_000_000.0),
        profit_margin: Some(0.125),
        analyst_ratings: AnalystRatings {
            strong_buy: 3,
            buy: 1,
            hold: 0,
            sell: 0,
            strong_sell: 0,
        },
        ..Default::default()
    }
}

pub fn quote(symbol: &str) -> GlobalQuote {
    GlobalQuote {
        symbol: symbol.to_string(),
        price: 123.456,
        previous_close: Some(120.0),
        change_percent: Some(2.88),
        latest_trading_day: None,
    }
}

/// In-memory provider returning canned data; `None` answers `NotFound`.
#[derive(Default)]
pub struct StaticProvider {
    pub series: Option<RawDailySeries>,
    pub overview: Option<CompanyOverview>,
    pub quote: Option<GlobalQuote>,
    /// When set, the quote endpoint fails with an API error instead.
    pub quote_error: Option<String>,
    pub calls: AtomicUsize,
    pub last_series_request: std::sync::Mutex<Option<DailySeriesRequest>>,
}

impl StaticProvider {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataProvider for StaticProvider {
    async fn fetch_daily_series(
        &self,
        request: &DailySeriesRequest,
    ) -> Result<RawDailySeries, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_series_request.lock().unwrap() = Some(request.clone());
        match &self.series {
            Some(series) => Ok(series.clone()),
            None => NotFoundSnafu {
                symbol: request.symbol.clone(),
            }
            .fail(),
        }
    }

    async fn fetch_company_overview(&self, symbol: &str) -> Result<CompanyOverview, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.overview {
            Some(o) => Ok(o.clone()),
            None => NotFoundSnafu { symbol }.fail(),
        }
    }

    async fn fetch_global_quote(&self, symbol: &str) -> Result<GlobalQuote, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.quote_error {
            return ApiSnafu { message }.fail();
        }
        match &self.quote {
            Some(q) => Ok(q.clone()),
            None => NotFoundSnafu { symbol }.fail(),
        }
    }
}

/// Lets a test keep a handle on the provider after boxing it into a service.
pub struct Shared(pub std::sync::Arc<StaticProvider>);

#[async_trait]
impl DataProvider for Shared {
    async fn fetch_daily_series(
        &self,
        request: &DailySeriesRequest,
    ) -> Result<RawDailySeries, ProviderError> {
        self.0.fetch_daily_series(request).await
    }

    async fn fetch_company_overview(&self, symbol: &str) -> Result<CompanyOverview, ProviderError> {
        self.0.fetch_company_overview(symbol).await
    }

    async fn fetch_global_quote(&self, symbol: &str) -> Result<GlobalQuote, ProviderError> {
        self.0.fetch_global_quote(symbol).await
    }
}
