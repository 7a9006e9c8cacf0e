//! Alpha Vantage REST adapter (`https://www.alphavantage.co/query`).

pub mod params;
pub mod provider;
pub mod response;

pub use provider::{API_KEY_ENV, AlphaVantageProvider, AlphaVantageSettings, BASE_URL};
