//! Prompt loop and terminal rendering

use crate::cli::parse_horizon;
use price_forecast::{ForecastOutput, ForecastRequest, ForecastSession, Horizon};
use std::io::{self, BufRead, Write};
use tracing::warn;

/// Print the chart summary and the forecast details table
pub fn render<W: Write>(out: &mut W, output: &ForecastOutput) -> io::Result<()> {
    writeln!(out, "{}", output.chart.title)?;
    for trace in &output.chart.traces {
        writeln!(out, "  {:<40} {:>4} points", trace.name, trace.y.len())?;
    }
    writeln!(out)?;
    writeln!(out, "Forecast Details")?;
    write!(out, "{}", output.table)?;
    Ok(())
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> io::Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask for ticker and horizon until the user quits or input ends
///
/// Request failures are printed and the loop continues.
pub fn run<R: BufRead, W: Write>(
    session: &ForecastSession,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let tickers = session.tickers();
    let default_ticker = tickers.first().map(|t| t.to_string()).unwrap_or_default();
    let default_horizon = session.config().default_horizon;
    let choices = Horizon::ALL
        .iter()
        .map(|h| h.days().to_string())
        .collect::<Vec<_>>()
        .join(", ");

    writeln!(out, "Stock Price Forecasting")?;
    writeln!(out, "Tickers: {}", tickers.join(", "))?;
    writeln!(out, "Enter 'q' to quit.")?;

    loop {
        writeln!(out)?;
        let label = format!("Select Company (Ticker) [{}]: ", default_ticker);
        let ticker = match prompt(input, out, &label)? {
            Some(answer) if answer.eq_ignore_ascii_case("q") => break,
            Some(answer) if answer.is_empty() => default_ticker.clone(),
            Some(answer) => answer,
            None => break,
        };

        let label = format!("Select Forecast Days ({}) [{}]: ", choices, default_horizon.days());
        let days = match prompt(input, out, &label)? {
            Some(answer) if answer.eq_ignore_ascii_case("q") => break,
            Some(answer) => match parse_horizon(&answer, default_horizon) {
                Some(days) => days,
                None => {
                    writeln!(out, "Error: '{}' is not a number of days", answer)?;
                    continue;
                }
            },
            None => break,
        };

        let result = ForecastRequest::new(ticker, days).and_then(|request| session.generate(&request));
        match result {
            Ok(output) => render(out, &output)?,
            Err(e) => {
                warn!(code = e.code(), "Forecast request failed");
                writeln!(out, "Error: {}", e)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use price_forecast::{DataLoader, ForecastConfig};
    use std::io::Cursor;

    const PRICES: &str = "symbol,date,close\n\
        ACME,2024-01-08,100\n\
        ACME,2024-01-09,101\n\
        ACME,2024-01-10,102\n\
        BOLT,2024-01-10,50\n";

    const MODEL: &str = r#"{
        "order": [0, 1, 0],
        "sigma2": 1.0,
        "history": [100.0, 101.0, 102.0]
    }"#;

    fn session(dir: &tempfile::TempDir) -> ForecastSession {
        let model_file = dir.path().join("model.json");
        std::fs::write(&model_file, MODEL).unwrap();

        let config = ForecastConfig {
            model_file,
            ..ForecastConfig::default()
        };
        let prices = DataLoader::from_reader(PRICES.as_bytes()).unwrap();
        ForecastSession::with_prices(config, prices)
    }

    fn run_with(session: &ForecastSession, answers: &str) -> String {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut out = Vec::new();
        run(session, &mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_generates_forecast_then_quits() {
        let dir = tempfile::tempdir().unwrap();
        let output = run_with(&session(&dir), "ACME\n7\nq\n");

        assert!(output.contains("Tickers: ACME, BOLT"));
        assert!(output.contains("ACME Closing Price Forecast for Next 7 Days"));
        assert!(output.contains("2024-01-11"));
        assert!(output.contains("2024-01-17"));
    }

    #[test]
    fn test_request_errors_do_not_end_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let output = run_with(&session(&dir), "NOPE\n7\nACME\n5\n\n\n");

        assert!(output.contains("Error: Not found: No data found for ticker 'NOPE'"));
        assert!(output.contains("Error: Invalid horizon: 5 days"));
        // Empty answers fall back to the first ticker and the default horizon
        assert!(output.contains("ACME Closing Price Forecast for Next 30 Days"));
    }

    #[test]
    fn test_missing_model_is_a_request_error() {
        let dir = tempfile::tempdir().unwrap();
        let session = session(&dir);
        std::fs::remove_file(dir.path().join("model.json")).unwrap();

        let output = run_with(&session, "ACME\n7\n");
        assert!(output.contains("Error: Missing resource: Model file"));
    }

    #[test]
    fn test_demo_inputs() {
        let config = ForecastConfig::from_json_file(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/demos/config.json"
        ))
        .unwrap();
        let session = ForecastSession::open(config).unwrap();

        let output = run_with(&session, "CRUX\n90\nq\n");
        assert!(output.contains("Tickers: ACME, BOLT, CRUX"));
        assert!(output.contains("CRUX Closing Price Forecast for Next 90 Days"));
        assert!(!output.contains("Error:"));
    }
}
