//! Fetch + compute for one ticker.
//!
//! [`ChartService`] is the async face of the crate: it normalizes the ticker, calls the
//! provider (concurrently when several endpoints are needed) and runs the pure
//! pipeline. A request either fully succeeds or fails; partial results are never
//! returned.

use chrono::NaiveDate;
use chrono_tz::Tz;
use equity_data_ingestor::{
    models::request_params::{DailySeriesRequest, OutputSize},
    providers::{DataProvider, ProviderError},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument};

use crate::{
    assemble::ChartData,
    clock::today_in,
    errors::PipelineError,
    pipeline::compute_chart_data,
    snapshot::CompanySnapshot,
    window::WindowPolicy,
};

/// Errors returned by [`ChartService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The ticker was empty after trimming.
    #[error("ticker must not be empty")]
    InvalidTicker,

    /// The upstream provider failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The data could not be turned into chart data.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Snapshot and chart data for one ticker, fetched together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Fundamentals and quote.
    pub snapshot: CompanySnapshot,
    /// Price history aggregates.
    pub chart: ChartData,
}

/// Trims and uppercases a user-supplied ticker.
pub fn normalize_ticker(ticker: &str) -> Result<String, ServiceError> {
    let ticker = ticker.trim();
    if ticker.is_empty() {
        return Err(ServiceError::InvalidTicker);
    }
    Ok(ticker.to_ascii_uppercase())
}

/// Composes a [`DataProvider`] with the chart pipeline.
pub struct ChartService {
    provider: Box<dyn DataProvider + Send + Sync>,
    default_window: WindowPolicy,
    timezone: Tz,
    output_size: OutputSize,
}

impl ChartService {
    /// A service with the default window (1461 days), UTC dates and full history.
    pub fn new(provider: Box<dyn DataProvider + Send + Sync>) -> Self {
        Self {
            provider,
            default_window: WindowPolicy::default(),
            timezone: Tz::UTC,
            output_size: OutputSize::Full,
        }
    }

    /// Window used when a request passes `None`.
    pub fn with_default_window(mut self, window: WindowPolicy) -> Self {
        self.default_window = window;
        self
    }

    /// Zone whose calendar decides "today".
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// History size requested from the provider.
    pub fn with_output_size(mut self, output_size: OutputSize) -> Self {
        self.output_size = output_size;
        self
    }

    /// Window used when a request passes `None`.
    pub fn default_window(&self) -> WindowPolicy {
        self.default_window
    }

    /// Chart data for `ticker` as of today in the configured zone.
    pub async fn chart(
        &self,
        ticker: &str,
        window: Option<WindowPolicy>,
    ) -> Result<ChartData, ServiceError> {
        self.chart_as_of(ticker, window, today_in(self.timezone))
            .await
    }

    /// Chart data for `ticker` as of `today`.
    #[instrument(skip(self))]
    pub async fn chart_as_of(
        &self,
        ticker: &str,
        window: Option<WindowPolicy>,
        today: NaiveDate,
    ) -> Result<ChartData, ServiceError> {
        let symbol = normalize_ticker(ticker)?;
        let window = window.unwrap_or(self.default_window);

        let raw = self.provider.fetch_daily_series(&self.daily_request(&symbol)).await?;
        Ok(compute_chart_data(&raw, window, today)?)
    }

    /// Overview and quote, fetched concurrently.
    #[instrument(skip(self))]
    pub async fn snapshot(&self, ticker: &str) -> Result<CompanySnapshot, ServiceError> {
        let symbol = normalize_ticker(ticker)?;
        let (overview, quote) = tokio::try_join!(
            self.provider.fetch_company_overview(&symbol),
            self.provider.fetch_global_quote(&symbol),
        )?;
        Ok(CompanySnapshot::new(overview, quote))
    }

    /// Snapshot and chart data as of today.
    pub async fn dashboard(
        &self,
        ticker: &str,
        window: Option<WindowPolicy>,
    ) -> Result<Dashboard, ServiceError> {
        self.dashboard_as_of(ticker, window, today_in(self.timezone))
            .await
    }

    /// Snapshot and chart data as of `today`; all three fetches run concurrently and
    /// any failure fails the whole request.
    #[instrument(skip(self))]
    pub async fn dashboard_as_of(
        &self,
        ticker: &str,
        window: Option<WindowPolicy>,
        today: NaiveDate,
    ) -> Result<Dashboard, ServiceError> {
        let symbol = normalize_ticker(ticker)?;
        let window = window.unwrap_or(self.default_window);
        let request = self.daily_request(&symbol);

        let (quote, overview, raw) = tokio::try_join!(
            self.provider.fetch_global_quote(&symbol),
            self.provider.fetch_company_overview(&symbol),
            self.provider.fetch_daily_series(&request),
        )?;

        let chart = compute_chart_data(&raw, window, today)?;
        info!(symbol = %symbol, "dashboard assembled");
        Ok(Dashboard {
            snapshot: CompanySnapshot::new(overview, quote),
            chart,
        })
    }

    fn daily_request(&self, symbol: &str) -> DailySeriesRequest {
        DailySeriesRequest::new(symbol).with_output_size(self.output_size)
    }
}
