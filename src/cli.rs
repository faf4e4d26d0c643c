//! Command-line arguments and configuration resolution

use anyhow::Context;
use clap::{Parser, Subcommand};
use price_forecast::{ForecastConfig, Horizon};
use std::path::PathBuf;

/// Closing-price forecasts from a pre-fit ARIMA model
#[derive(Parser, Debug)]
#[command(name = "stock-forecast", version, about)]
pub struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(long, env = "STOCK_FORECAST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Price history CSV with symbol, date and close columns
    #[arg(long, env = "STOCK_FORECAST_DATA")]
    pub data: Option<PathBuf>,

    /// Pre-fit model artifact (JSON)
    #[arg(long, env = "STOCK_FORECAST_MODEL")]
    pub model: Option<PathBuf>,

    /// Historical points shown next to the forecast
    #[arg(long)]
    pub recent_points: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the tickers present in the price history
    Tickers,
    /// Forecast one ticker and exit
    Forecast {
        /// Ticker to forecast
        #[arg(long)]
        ticker: String,
        /// Horizon in days: 7, 14, 30, 60, 90, 180 or 365
        #[arg(long)]
        days: Option<usize>,
        /// Also write the forecast table as CSV
        #[arg(long)]
        export_csv: Option<PathBuf>,
        /// Also write the chart specification as JSON
        #[arg(long)]
        chart_json: Option<PathBuf>,
    },
}

impl Cli {
    /// Merge the optional config file with explicit flags
    pub fn resolve_config(&self) -> anyhow::Result<ForecastConfig> {
        let mut config = match &self.config {
            Some(path) => ForecastConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config '{}'", path.display()))?,
            None => ForecastConfig::default(),
        };

        if let Some(data) = &self.data {
            config.data_file = data.clone();
        }
        if let Some(model) = &self.model {
            config.model_file = model.clone();
        }
        if let Some(recent_points) = self.recent_points {
            config.recent_points = recent_points;
        }

        Ok(config)
    }
}

/// Parse a horizon prompt answer; empty input picks the default
pub fn parse_horizon(input: &str, default: Horizon) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() {
        return Some(default.days());
    }
    input.parse().ok()
}
