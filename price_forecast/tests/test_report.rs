use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use price_forecast::assembler::{assemble, PlotPayload};
use price_forecast::data::{Observation, PriceSeries};
use price_forecast::models::{StepForecast, TrainedForecastModel};
use price_forecast::report::{ChartSpec, ForecastTable};
use price_forecast::Result;

#[derive(Debug)]
struct UnevenForecaster;

impl TrainedForecastModel for UnevenForecaster {
    fn forecast(&self, _horizons: usize) -> Result<Vec<StepForecast>> {
        Ok(vec![
            StepForecast::new(103.456, 101.004, 105.996),
            StepForecast::new(104.0, 102.1, 106.7),
        ])
    }

    fn name(&self) -> &str {
        "uneven"
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn series() -> PriceSeries {
    PriceSeries::new(
        "ACME",
        vec![
            Observation::new(ymd(2024, 1, 9), 101.0),
            Observation::new(ymd(2024, 1, 10), 102.0),
        ],
    )
    .unwrap()
}

#[test]
fn test_table_rounds_to_cents() {
    let result = assemble(&series(), 2, &UnevenForecaster).unwrap();
    let table = ForecastTable::from_result(&result);

    assert_eq!(table.confidence, "95%");
    assert_eq!(
        table.headers(),
        [
            "Date".to_string(),
            "Forecasted Price".to_string(),
            "Lower 95% CI".to_string(),
            "Upper 95% CI".to_string(),
        ]
    );
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].date, ymd(2024, 1, 11));
    assert_eq!(table.rows[0].forecast, 103.46);
    assert_eq!(table.rows[0].lower, 101.0);
    assert_eq!(table.rows[0].upper, 106.0);

    // The unrounded result is left untouched
    assert_eq!(result.mean[0], 103.456);
}

#[test]
fn test_table_csv_export() {
    let result = assemble(&series(), 2, &UnevenForecaster).unwrap();
    let table = ForecastTable::from_result(&result);

    let mut buffer = Vec::new();
    table.write_csv(&mut buffer).unwrap();
    let csv = String::from_utf8(buffer).unwrap();

    assert_eq!(
        csv,
        "Date,Forecasted Price,Lower 95% CI,Upper 95% CI\n\
         2024-01-11,103.46,101.00,106.00\n\
         2024-01-12,104.00,102.10,106.70\n"
    );
}

#[test]
fn test_table_display() {
    let result = assemble(&series(), 2, &UnevenForecaster).unwrap();
    let text = ForecastTable::from_result(&result).to_string();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("Forecasted Price"));
    assert!(lines[1].starts_with("2024-01-11"));
    assert!(lines[1].contains("103.46"));
}

#[test]
fn test_chart_spec_traces() {
    let series = series();
    let result = assemble(&series, 2, &UnevenForecaster).unwrap();
    let payload = PlotPayload::build(&series, &result);
    let chart = ChartSpec::new(&result, &payload, 100);

    assert_eq!(chart.title, "ACME Closing Price Forecast for Next 2 Days");
    assert_eq!(chart.x_axis_title, "Date");
    assert_eq!(chart.y_axis_title, "Price");

    let names: Vec<&str> = chart.traces.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Actual Closing Price (Last 100 Days)",
            "Forecast",
            "95% Confidence Interval",
        ]
    );

    let band = &chart.traces[2];
    assert_eq!(band.fill.as_deref(), Some("toself"));
    assert_eq!(band.y, vec![105.996, 106.7, 102.1, 101.004]);
    assert_eq!(
        band.x,
        vec![ymd(2024, 1, 11), ymd(2024, 1, 12), ymd(2024, 1, 12), ymd(2024, 1, 11)]
    );
    assert_eq!(chart.traces[1].line.dash.as_deref(), Some("dash"));
}

#[test]
fn test_chart_json() {
    let series = series();
    let result = assemble(&series, 2, &UnevenForecaster).unwrap();
    let payload = PlotPayload::build(&series, &result);
    let chart = ChartSpec::new(&result, &payload, 100);

    let json: serde_json::Value = serde_json::from_str(&chart.to_json().unwrap()).unwrap();
    assert_eq!(json["traces"][0]["x"][0], "2024-01-09");
    assert_eq!(json["traces"][2]["fill"], "toself");
    assert!(json["traces"][0].get("fill").is_none());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.json");
    chart.save_json(&path).unwrap();
    let restored: ChartSpec =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(restored, chart);
}
