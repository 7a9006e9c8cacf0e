use std::{fmt, num::NonZeroU32, time::Duration};

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use shared_utils::env::get_env_var;
use snafu::ResultExt;
use tracing::debug;

use crate::{
    models::{
        daily_series::RawDailySeries, overview::CompanyOverview, quote::GlobalQuote,
        request_params::DailySeriesRequest,
    },
    providers::{
        ClientBuildSnafu, DataProvider, DecodeSnafu, InvalidApiKeySnafu,
        MissingEnvVarSnafu, ProviderError, ProviderInitError, ReqwestSnafu, StatusSnafu,
        alpha_vantage::{
            params::{Function, construct_params, validate_symbol},
            response::{DailyResponse, GlobalQuoteResponse, OverviewResponse},
        },
        retry::RetryPolicy,
    },
};

pub const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Environment variable the API key is read from by [`AlphaVantageProvider::new`].
pub const API_KEY_ENV: &str = "ALPHAVANTAGE_API_KEY";

/// Error bodies longer than this are cut before they end up in a [`ProviderError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Tunables for [`AlphaVantageProvider`].
#[derive(Debug, Clone)]
pub struct AlphaVantageSettings {
    pub base_url: String,
    /// Use `TIME_SERIES_DAILY_ADJUSTED` (adjusted close + split coefficient) instead of
    /// `TIME_SERIES_DAILY`.
    pub adjusted: bool,
    /// Client-side throttle; the free tier allows 5 calls per minute.
    pub requests_per_minute: NonZeroU32,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for AlphaVantageSettings {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            adjusted: true,
            requests_per_minute: nonzero!(5u32),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

pub struct AlphaVantageProvider {
    client: Client,
    api_key: SecretString,
    settings: AlphaVantageSettings,
    limiter: DefaultDirectRateLimiter,
}

impl fmt::Debug for AlphaVantageProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlphaVantageProvider")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl AlphaVantageProvider {
    /// Creates a provider with default settings.
    ///
    /// Reads the API key from the `ALPHAVANTAGE_API_KEY` environment variable.
    pub fn new() -> Result<Self, ProviderInitError> {
        Self::from_env(API_KEY_ENV, AlphaVantageSettings::default())
    }

    /// Creates a provider reading the API key from `var`.
    pub fn from_env(var: &str, settings: AlphaVantageSettings) -> Result<Self, ProviderInitError> {
        let api_key = get_env_var(var).context(MissingEnvVarSnafu)?;
        Self::with_api_key(api_key, settings)
    }

    pub fn with_api_key(
        api_key: impl Into<String>,
        settings: AlphaVantageSettings,
    ) -> Result<Self, ProviderInitError> {
        let api_key: String = api_key.into();
        if api_key.trim().is_empty() {
            return InvalidApiKeySnafu {
                reason: "key is empty",
            }
            .fail();
        }
        if api_key.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return InvalidApiKeySnafu {
                reason: "key contains whitespace or control characters",
            }
            .fail();
        }

        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .context(ClientBuildSnafu)?;
        let limiter = RateLimiter::direct(Quota::per_minute(settings.requests_per_minute));

        Ok(Self {
            client,
            api_key: SecretString::from(api_key),
            settings,
            limiter,
        })
    }

    pub fn settings(&self) -> &AlphaVantageSettings {
        &self.settings
    }

    /// One throttled GET against the query endpoint.
    ///
    /// The key is appended here and nowhere else; transport errors have their URL
    /// stripped so the key never reaches an error message or a log line.
    async fn get_json<T: DeserializeOwned>(
        &self,
        query: &[(&'static str, String)],
    ) -> Result<T, ProviderError> {
        self.limiter.until_ready().await;

        let response = self
            .client
            .get(self.settings.base_url.as_str())
            .query(query)
            .query(&[("apikey", self.api_key.expose_secret())])
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .context(ReqwestSnafu)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context(ReqwestSnafu)?;

        if !status.is_success() {
            let body: String = body.chars().take(MAX_ERROR_BODY).collect();
            return StatusSnafu { status, body }.fail();
        }

        serde_json::from_str(&body).context(DecodeSnafu)
    }
}

#[async_trait]
impl DataProvider for AlphaVantageProvider {
    async fn fetch_daily_series(
        &self,
        request: &DailySeriesRequest,
    ) -> Result<RawDailySeries, ProviderError> {
        validate_symbol(&request.symbol)?;

        let function = Function::daily(self.settings.adjusted);
        let query = construct_params(function, &request.symbol, Some(request.output_size));
        let query = query.as_slice();
        let symbol = request.symbol.as_str();
        debug!(symbol, function = function.as_str(), output_size = %request.output_size, "fetching daily series");

        let series = self
            .settings
            .retry
            .run(function.as_str(), || async move {
                self.get_json::<DailyResponse>(query)
                    .await?
                    .into_raw_series(symbol)
            })
            .await?;

        debug!(symbol, rows = series.len(), "daily series received");
        Ok(series)
    }

    async fn fetch_company_overview(&self, symbol: &str) -> Result<CompanyOverview, ProviderError> {
        validate_symbol(symbol)?;

        let function = Function::Overview;
        let query = construct_params(function, symbol, None);
        let query = query.as_slice();
        debug!(symbol, "fetching company overview");

        self.settings
            .retry
            .run(function.as_str(), || async move {
                self.get_json::<OverviewResponse>(query)
                    .await?
                    .into_overview(symbol)
            })
            .await
    }

    async fn fetch_global_quote(&self, symbol: &str) -> Result<GlobalQuote, ProviderError> {
        validate_symbol(symbol)?;

        let function = Function::GlobalQuote;
        let query = construct_params(function, symbol, None);
        let query = query.as_slice();
        debug!(symbol, "fetching global quote");

        self.settings
            .retry
            .run(function.as_str(), || async move {
                self.get_json::<GlobalQuoteResponse>(query)
                    .await?
                    .into_quote(symbol)
            })
            .await
    }
}
