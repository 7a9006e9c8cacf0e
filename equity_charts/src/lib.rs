//! Chart-ready views of daily equity data.
//!
//! The core is a pure pipeline over a provider-neutral raw series:
//!
//! ```text
//! RawDailySeries -> normalize -> window -> { seasonality, distribution } -> assemble -> ChartData
//! ```
//!
//! [`pipeline::compute_chart_data`] runs it end to end. [`service::ChartService`] adds the
//! async fetch through any [`equity_data_ingestor::providers::DataProvider`], and the
//! `equity-charts` binary exposes both on the command line.

#![warn(missing_docs)]

pub mod assemble;
pub mod clock;
pub mod config;
pub mod distribution;
pub mod errors;
pub mod normalize;
pub mod observation;
pub mod pipeline;
pub mod providers;
pub mod seasonality;
pub mod service;
pub mod snapshot;
pub mod tickers;
pub mod window;
