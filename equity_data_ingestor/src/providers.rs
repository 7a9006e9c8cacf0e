//! Provider abstraction for equity data sources.
//!
//! This module defines the [`DataProvider`] trait, which serves as a unified interface
//! for fetching daily price history, company fundamentals and the latest quote from any
//! market data vendor (e.g., Alpha Vantage).
//!
//! Each concrete provider implementation should implement [`DataProvider`] to handle
//! vendor-specific API logic, field names and error bodies, and hand back the
//! vendor-agnostic models from [`crate::models`].
//!
//! The trait is designed for async usage and supports dynamic dispatch (`dyn DataProvider`)
//! for runtime selection of providers.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use equity_data_ingestor::models::{
//!     daily_series::RawDailySeries,
//!     overview::CompanyOverview,
//!     quote::GlobalQuote,
//!     request_params::DailySeriesRequest,
//! };
//! use equity_data_ingestor::providers::{DataProvider, ProviderError};
//!
//! struct MyProvider;
//!
//! #[async_trait]
//! impl DataProvider for MyProvider {
//!     async fn fetch_daily_series(
//!         &self,
//!         request: &DailySeriesRequest,
//!     ) -> Result<RawDailySeries, ProviderError> {
//!         Ok(RawDailySeries::missing(request.symbol.clone()))
//!     }
//!
//!     async fn fetch_company_overview(&self, symbol: &str) -> Result<CompanyOverview, ProviderError> {
//!         Ok(CompanyOverview { symbol: symbol.to_string(), ..Default::default() })
//!     }
//!
//!     async fn fetch_global_quote(&self, symbol: &str) -> Result<GlobalQuote, ProviderError> {
//!         Ok(GlobalQuote {
//!             symbol: symbol.to_string(),
//!             price: 1.0,
//!             previous_close: None,
//!             change_percent: None,
//!             latest_trading_day: None,
//!         })
//!     }
//! }
//! ```

pub mod alpha_vantage;
pub mod retry;

use async_trait::async_trait;
use reqwest::StatusCode;
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

use crate::models::{
    daily_series::RawDailySeries, overview::CompanyOverview, quote::GlobalQuote,
    request_params::DailySeriesRequest,
};

/// Trait for fetching equity data from a market data provider.
///
/// Implement this trait for each concrete data vendor.
/// The trait is designed for async usage and supports dynamic dispatch (`dyn DataProvider`)
/// for runtime selection of providers.
#[async_trait]
pub trait DataProvider {
    /// Fetches the daily price history for one symbol.
    ///
    /// A payload without a time series is *not* an error at this layer: it comes back as
    /// [`RawDailySeries::missing`] and the normalizer decides how to surface it.
    async fn fetch_daily_series(
        &self,
        request: &DailySeriesRequest,
    ) -> Result<RawDailySeries, ProviderError>;

    /// Fetches company fundamentals for one symbol.
    async fn fetch_company_overview(&self, symbol: &str) -> Result<CompanyOverview, ProviderError>;

    /// Fetches the latest quote for one symbol.
    async fn fetch_global_quote(&self, symbol: &str) -> Result<GlobalQuote, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// missed environment variable.
    #[snafu(display("Missing environment variable: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// API key cannot be sent as a query value.
    #[snafu(display("Invalid API key: {reason}"))]
    InvalidApiKey {
        reason: &'static str,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The provider answered with a non-success HTTP status.
    #[snafu(display("HTTP {status}: {body}"))]
    Status {
        status: StatusCode,
        body: String,
        backtrace: Backtrace,
    },

    /// The provider's API returned a specific error message (e.g., invalid API key, unknown symbol).
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The provider throttled the request.
    #[snafu(display("Rate limited by provider: {message}"))]
    RateLimited {
        message: String,
        backtrace: Backtrace,
    },

    /// The provider has no data at all for the symbol.
    #[snafu(display("No data found for symbol {symbol}"))]
    NotFound {
        symbol: String,
        backtrace: Backtrace,
    },

    /// The response body was not the JSON shape we expected.
    #[snafu(display("Failed to decode provider response: {source}"))]
    Decode {
        source: serde_json::Error,
        backtrace: Backtrace,
    },

    /// The request parameters were invalid for this specific provider.
    #[snafu(display("Invalid parameters for provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },

    /// An internal error occurred while processing data within the provider.
    #[snafu(display("Internal provider error: {message}"))]
    Internal {
        message: String,
        backtrace: Backtrace,
    },

    /// An error during provider configuration or initialization.
    #[snafu(context(false), display("Provider initialization error: {source}"))]
    Init {
        #[snafu(backtrace)]
        source: ProviderInitError,
    },
}

impl ProviderError {
    /// Whether repeating the same request later could plausibly succeed.
    ///
    /// Transport failures, 5xx/429 responses and provider throttling are retryable;
    /// anything that describes the request itself (bad symbol, bad key, bad params) is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            // builder and redirect errors describe the request, not the connection
            ProviderError::Reqwest { source, .. } => {
                source.is_timeout()
                    || source.is_connect()
                    || source.is_request()
                    || source.is_body()
                    || source.is_decode()
            }
            ProviderError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            ProviderError::RateLimited { .. } => true,
            _ => false,
        }
    }
}
