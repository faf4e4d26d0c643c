use price_forecast::{
    ForecastConfig, ForecastError, ForecastRequest, ForecastSession, StepForecast,
    TrainedForecastModel,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PRICES: &str = "symbol,date,open,close\n\
    ACME,2024-01-08,99.5,100.0\n\
    ACME,2024-01-09,100.2,101.0\n\
    ACME,2024-01-10,101.1,102.0\n\
    BOLT,2024-01-09,49.0,50.0\n\
    BOLT,2024-01-10,50.5,51.0\n";

const MODEL: &str = r#"{
    "order": [0, 1, 0],
    "sigma2": 1.0,
    "history": [100.0, 101.0, 102.0]
}"#;

fn write_inputs(dir: &Path) -> ForecastConfig {
    let data_file = dir.join("prices.csv");
    let model_file = dir.join("model.json");
    fs::write(&data_file, PRICES).unwrap();
    fs::write(&model_file, MODEL).unwrap();

    ForecastConfig {
        data_file,
        model_file,
        ..ForecastConfig::default()
    }
}

#[derive(Debug)]
struct ConstantForecaster(f64);

impl TrainedForecastModel for ConstantForecaster {
    fn forecast(&self, horizons: usize) -> price_forecast::Result<Vec<StepForecast>> {
        Ok(vec![StepForecast::new(self.0, self.0 - 1.0, self.0 + 1.0); horizons])
    }

    fn name(&self) -> &str {
        "constant"
    }
}

#[test]
fn test_session_end_to_end() {
    let dir = TempDir::new().unwrap();
    let session = ForecastSession::open(write_inputs(dir.path())).unwrap();
    assert_eq!(session.tickers(), vec!["ACME", "BOLT"]);

    let request = ForecastRequest::new("ACME", 7).unwrap();
    let output = session.generate(&request).unwrap();

    assert_eq!(output.result.horizon(), 7);
    assert_eq!(output.result.mean, vec![102.0; 7]);
    assert_eq!(output.table.rows.len(), 7);
    assert_eq!(output.chart.traces.len(), 3);
    assert_eq!(output.plot.recent_actual.len(), 3);
    assert_eq!(
        output.chart.title,
        "ACME Closing Price Forecast for Next 7 Days"
    );
}

#[test]
fn test_session_serves_many_requests() {
    let dir = TempDir::new().unwrap();
    let session = ForecastSession::open(write_inputs(dir.path())).unwrap();

    // A failed request leaves the session usable
    let missing = ForecastRequest::new("ZZZ", 7).unwrap();
    assert!(matches!(
        session.generate(&missing),
        Err(ForecastError::NotFound(_))
    ));

    let request = ForecastRequest::new("BOLT", 14).unwrap();
    let output = session.generate_with(&request, &ConstantForecaster(51.0)).unwrap();
    assert_eq!(output.result.ticker, "BOLT");
    assert_eq!(output.result.forecast_dates.len(), 14);
    assert_eq!(output.result.lower_bound[0], 50.0);
}

#[test]
fn test_open_fails_without_data_file() {
    let dir = TempDir::new().unwrap();
    let config = ForecastConfig {
        data_file: dir.path().join("missing.csv"),
        ..ForecastConfig::default()
    };

    match ForecastSession::open(config) {
        Err(ForecastError::MissingResource(msg)) => assert!(msg.contains("missing.csv")),
        other => panic!("Expected missing resource, got {:?}", other),
    }
}

#[test]
fn test_open_fails_on_schema_error() {
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("prices.csv");
    fs::write(&data_file, "ticker,date,close\nACME,2024-01-10,100\n").unwrap();

    let config = ForecastConfig {
        data_file,
        ..ForecastConfig::default()
    };
    assert!(matches!(
        ForecastSession::open(config),
        Err(ForecastError::Schema(_))
    ));
}

#[test]
fn test_config_file_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"recent_points": 20, "default_horizon": 90}"#).unwrap();

    let config = ForecastConfig::from_json_file(&path).unwrap();
    assert_eq!(config.recent_points, 20);
    assert_eq!(config.default_horizon.days(), 90);
    assert_eq!(config.data_file, Path::new("Prices_Cleaned.csv"));
    assert_eq!(config.model_file, Path::new("arima_model.json"));

    assert!(matches!(
        ForecastConfig::from_json_file(dir.path().join("nope.json")),
        Err(ForecastError::MissingResource(_))
    ));
}

#[test]
fn test_exports_written_to_disk() {
    let dir = TempDir::new().unwrap();
    let session = ForecastSession::open(write_inputs(dir.path())).unwrap();
    let output = session
        .generate(&ForecastRequest::new("ACME", 7).unwrap())
        .unwrap();

    let csv_path = dir.path().join("forecast.csv");
    output.table.save_csv(&csv_path).unwrap();
    let text = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(text.lines().count(), 8);
    assert!(text.starts_with("Date,Forecasted Price"));

    let chart_path = dir.path().join("chart.json");
    output.chart.save_json(&chart_path).unwrap();
    assert!(chart_path.exists());
}
