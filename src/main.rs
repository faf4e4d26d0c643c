mod cli;
mod interactive;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command};
use price_forecast::{ForecastRequest, ForecastSession};
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    info!("Starting stock forecast");

    // Failures here stop the tool; per-request failures are handled below
    let session = ForecastSession::open(config).context("Failed to load price data")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Command::Tickers) => {
            for ticker in session.tickers() {
                writeln!(out, "{}", ticker)?;
            }
        }
        Some(Command::Forecast {
            ticker,
            days,
            export_csv,
            chart_json,
        }) => {
            let days = days.unwrap_or(session.config().default_horizon.days());
            let request = ForecastRequest::new(ticker, days)?;
            let output = session.generate(&request)?;
            interactive::render(&mut out, &output)?;

            if let Some(path) = export_csv {
                output.table.save_csv(&path)?;
                info!(path = %path.display(), "Wrote forecast table");
            }
            if let Some(path) = chart_json {
                output.chart.save_json(&path)?;
                info!(path = %path.display(), "Wrote chart specification");
            }
        }
        None => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            interactive::run(&session, &mut input, &mut out)?;
        }
    }

    Ok(())
}
