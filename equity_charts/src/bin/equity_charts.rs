use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use equity_charts::{
    clock::today_in,
    config::AppConfig,
    pipeline::compute_chart_data,
    providers::build_provider,
    service::{ChartService, normalize_ticker},
    tickers::random_ticker,
    window::WindowPolicy,
};
use equity_data_ingestor::providers::alpha_vantage::response::DailyResponse;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Equity seasonality and change-distribution charts")]
struct Cli {
    /// TOML config file; defaults apply when omitted.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Fetch daily history and print chart data as JSON.
    Chart {
        #[command(flatten)]
        target: Target,
        /// `<days>d`, this_month, this_quarter, this_year, last_5_years or max.
        #[arg(long)]
        range: Option<WindowPolicy>,
        #[arg(long)]
        pretty: bool,
    },
    /// Print company fundamentals and the latest quote.
    Overview {
        #[command(flatten)]
        target: Target,
        #[arg(long)]
        json: bool,
    },
    /// Fundamentals, quote and chart data in one JSON document.
    Dashboard {
        #[command(flatten)]
        target: Target,
        #[arg(long)]
        range: Option<WindowPolicy>,
        #[arg(long)]
        pretty: bool,
    },
    /// Run the chart pipeline over a saved TIME_SERIES_DAILY_ADJUSTED response.
    Compute {
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Symbol to report when the payload has no meta data.
        #[arg(long, default_value = "UNKNOWN")]
        symbol: String,
        #[arg(long)]
        range: Option<WindowPolicy>,
        /// Evaluate the window as of this date instead of today.
        #[arg(long, value_name = "YYYY-MM-DD")]
        today: Option<NaiveDate>,
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Args)]
struct Target {
    /// Ticker symbol, e.g. AAPL.
    #[arg(required_unless_present = "random", conflicts_with = "random")]
    ticker: Option<String>,
    /// Pick a random large-cap ticker.
    #[arg(long)]
    random: bool,
}

impl Target {
    fn resolve(&self) -> Result<String> {
        match (&self.ticker, self.random) {
            (_, true) => {
                let ticker = random_ticker();
                info!(ticker, "picked random ticker");
                Ok(ticker.to_string())
            }
            (Some(t), false) => Ok(normalize_ticker(t)?),
            (None, false) => bail!("a ticker or --random is required"),
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

fn build_service(cfg: &AppConfig) -> Result<ChartService> {
    let provider = build_provider(
        cfg.provider.kind,
        &cfg.provider.api_key_env,
        cfg.provider.settings(),
    )
    .with_context(|| format!("failed to initialize provider {}", cfg.provider.kind))?;

    Ok(ChartService::new(provider)
        .with_default_window(cfg.window.default)
        .with_timezone(cfg.window.tz()?)
        .with_output_size(cfg.provider.output_size))
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the JSON; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = AppConfig::load_or_default(cli.config.as_deref()).context("failed to load config")?;

    match cli.cmd {
        Cmd::Chart {
            target,
            range,
            pretty,
        } => {
            let ticker = target.resolve()?;
            let chart = build_service(&cfg)?
                .chart(&ticker, range)
                .await
                .with_context(|| format!("chart for {ticker}"))?;
            print_json(&chart, pretty)?;
        }
        Cmd::Overview { target, json } => {
            let ticker = target.resolve()?;
            let snapshot = build_service(&cfg)?
                .snapshot(&ticker)
                .await
                .with_context(|| format!("overview for {ticker}"))?;
            if json {
                print_json(&snapshot, true)?;
            } else {
                for line in snapshot.to_lines() {
                    println!("{line}");
                }
            }
        }
        Cmd::Dashboard {
            target,
            range,
            pretty,
        } => {
            let ticker = target.resolve()?;
            let dashboard = build_service(&cfg)?
                .dashboard(&ticker, range)
                .await
                .with_context(|| format!("dashboard for {ticker}"))?;
            print_json(&dashboard, pretty)?;
        }
        Cmd::Compute {
            input,
            symbol,
            range,
            today,
            pretty,
        } => {
            let body = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let response: DailyResponse = serde_json::from_str(&body)
                .with_context(|| format!("{} is not a daily series response", input.display()))?;
            let raw = response.into_raw_series(&symbol)?;

            let today = match today {
                Some(d) => d,
                None => today_in(cfg.window.tz()?),
            };
            let chart = compute_chart_data(&raw, range.unwrap_or(cfg.window.default), today)?;
            print_json(&chart, pretty)?;
        }
    }

    Ok(())
}
