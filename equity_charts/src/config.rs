//! Application configuration: a TOML file with two sections, both optional.
//!
//! ```toml
//! [provider]
//! kind = "alpha_vantage"
//! base_url = "https://www.alphavantage.co/query"
//! api_key_env = "ALPHAVANTAGE_API_KEY"
//! output_size = "full"
//! adjusted = true
//! requests_per_minute = 5
//! max_attempts = 3
//! base_delay_ms = 1000
//! timeout_secs = 30
//!
//! [window]
//! default = "1461d"
//! timezone = "UTC"
//! ```
//!
//! Secrets never live in this file; `api_key_env` names the environment variable that
//! holds the key.

use std::{num::NonZeroU32, path::Path, time::Duration};

use chrono_tz::Tz;
use equity_data_ingestor::{
    models::request_params::OutputSize,
    providers::{
        alpha_vantage::{API_KEY_ENV, AlphaVantageSettings, BASE_URL},
        retry::RetryPolicy,
    },
};
use nonzero_ext::nonzero;
use serde::{Deserialize, Serialize};
use shared_utils::config::{ConfigError, load_toml};

use crate::{providers::ProviderId, window::WindowPolicy};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    /// Upstream data provider.
    pub provider: ProviderConfig,
    /// Default window and the time zone that defines "today".
    pub window: WindowConfig,
}

/// `[provider]` section.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ProviderConfig {
    /// Which provider implementation to use.
    pub kind: ProviderId,
    /// Query endpoint.
    pub base_url: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// `compact` (~100 days) or `full`.
    pub output_size: OutputSize,
    /// Use the split/dividend-adjusted daily endpoint.
    pub adjusted: bool,
    /// Client-side request budget.
    pub requests_per_minute: NonZeroU32,
    /// Attempts per call, including the first.
    pub max_attempts: NonZeroU32,
    /// Backoff base; doubles on every retry.
    pub base_delay_ms: u64,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderId::default(),
            base_url: BASE_URL.to_string(),
            api_key_env: API_KEY_ENV.to_string(),
            output_size: OutputSize::default(),
            adjusted: true,
            requests_per_minute: nonzero!(5u32),
            max_attempts: nonzero!(3u32),
            base_delay_ms: 1000,
            timeout_secs: 30,
        }
    }
}

impl ProviderConfig {
    /// Provider settings derived from this section.
    pub fn settings(&self) -> AlphaVantageSettings {
        AlphaVantageSettings {
            base_url: self.base_url.clone(),
            adjusted: self.adjusted,
            requests_per_minute: self.requests_per_minute,
            timeout: Duration::from_secs(self.timeout_secs),
            retry: RetryPolicy {
                max_attempts: self.max_attempts,
                base_delay: Duration::from_millis(self.base_delay_ms),
            },
        }
    }
}

/// `[window]` section.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct WindowConfig {
    /// Window used when a request does not name one.
    pub default: WindowPolicy,
    /// IANA zone name (e.g. `America/New_York`).
    pub timezone: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            default: WindowPolicy::default(),
            timezone: "UTC".to_string(),
        }
    }
}

impl WindowConfig {
    /// Parsed [`WindowConfig::timezone`].
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .trim()
            .parse::<Tz>()
            .map_err(|e| ConfigError::Invalid {
                field: "window.timezone",
                message: e.to_string(),
            })
    }
}

impl AppConfig {
    /// Loads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let cfg: AppConfig = load_toml(path)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Checks values serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.provider.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                field: "provider.base_url",
                message: format!("expected an http(s) URL, got {base_url:?}"),
            });
        }
        if self.provider.api_key_env.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "provider.api_key_env",
                message: "must name an environment variable".to_string(),
            });
        }
        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "provider.timeout_secs",
                message: "must be at least 1".to_string(),
            });
        }
        self.window.tz()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_file_gives_defaults() {
        let file = write_config("");
        let cfg = AppConfig::load(file.path()).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.window.tz().unwrap(), Tz::UTC);
        assert_eq!(cfg.provider.settings().retry, RetryPolicy::default());
    }

    #[test]
    fn full_file_round_trips_into_settings() {
        let file = write_config(
            r#"
            [provider]
            kind = "alpha_vantage"
            base_url = "http://localhost:8080/query"
            api_key_env = "MY_AV_KEY"
            output_size = "compact"
            adjusted = false
            requests_per_minute = 75
            max_attempts = 5
            base_delay_ms = 250
            timeout_secs = 10

            [window]
            default = "this_quarter"
            timezone = "America/New_York"
            "#,
        );
        let cfg = AppConfig::load(file.path()).unwrap();
        assert_eq!(cfg.window.default, WindowPolicy::ThisQuarter);
        assert_eq!(cfg.provider.output_size, OutputSize::Compact);

        let settings = cfg.provider.settings();
        assert_eq!(settings.base_url, "http://localhost:8080/query");
        assert!(!settings.adjusted);
        assert_eq!(settings.requests_per_minute.get(), 75);
        assert_eq!(settings.retry.max_attempts.get(), 5);
        assert_eq!(settings.retry.base_delay, Duration::from_millis(250));
        assert_eq!(settings.timeout, Duration::from_secs(10));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config("[provider]\napi_key = \"oops\"\n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn zero_attempts_are_rejected() {
        let file = write_config("[provider]\nmax_attempts = 0\n");
        assert!(matches!(
            AppConfig::load(file.path()).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }

    #[test]
    fn bad_window_and_timezone() {
        let file = write_config("[window]\ndefault = \"fortnight\"\n");
        assert!(matches!(
            AppConfig::load(file.path()).unwrap_err(),
            ConfigError::Parse { .. }
        ));

        let file = write_config("[window]\ntimezone = \"Mars/Olympus\"\n");
        assert!(matches!(
            AppConfig::load(file.path()).unwrap_err(),
            ConfigError::Invalid {
                field: "window.timezone",
                ..
            }
        ));
    }

    #[test]
    fn base_url_must_be_http() {
        let file = write_config("[provider]\nbase_url = \"ftp://example.com\"\n");
        assert!(matches!(
            AppConfig::load(file.path()).unwrap_err(),
            ConfigError::Invalid {
                field: "provider.base_url",
                ..
            }
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(AppConfig::load_or_default(None).is_ok());
    }
}
