//! Provider registry that maps a configured [`ProviderId`] to a concrete provider.

use std::{fmt, str::FromStr};

use equity_data_ingestor::providers::{
    DataProvider, ProviderInitError,
    alpha_vantage::{AlphaVantageProvider, AlphaVantageSettings},
};
use serde::{Deserialize, Serialize};

/// Which upstream to use (serde snake_case).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    /// Alpha Vantage REST API.
    #[default]
    AlphaVantage,
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderId::AlphaVantage => f.write_str("alpha_vantage"),
        }
    }
}

impl FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "alpha_vantage" | "alphavantage" => Ok(ProviderId::AlphaVantage),
            other => Err(format!("unknown provider: {other}")),
        }
    }
}

/// Build and return a boxed data provider corresponding to the supplied ProviderId.
///
/// The API key is read from the environment variable named `api_key_env`.
pub fn build_provider(
    id: ProviderId,
    api_key_env: &str,
    settings: AlphaVantageSettings,
) -> Result<Box<dyn DataProvider + Send + Sync>, ProviderInitError> {
    match id {
        ProviderId::AlphaVantage => {
            let p = AlphaVantageProvider::from_env(api_key_env, settings)?;
            Ok(Box::new(p))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_id_text_forms() {
        assert_eq!("alpha_vantage".parse::<ProviderId>().unwrap(), ProviderId::AlphaVantage);
        assert_eq!("Alpha-Vantage".parse::<ProviderId>().unwrap(), ProviderId::AlphaVantage);
        assert!("alpaca".parse::<ProviderId>().is_err());
        assert_eq!(ProviderId::AlphaVantage.to_string(), "alpha_vantage");
    }

    #[test]
    fn missing_key_fails_to_build() {
        let err = build_provider(
            ProviderId::AlphaVantage,
            "EQUITY_CHARTS_TEST_UNSET_KEY_41B7",
            AlphaVantageSettings::default(),
        )
        .map(|_| ())
        .unwrap_err();
        assert!(matches!(err, ProviderInitError::MissingEnvVar { .. }));
    }
}
