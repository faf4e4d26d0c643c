//! Display payloads: the forecast details table and the chart specification

use crate::assembler::{ForecastResult, PlotPayload};
use crate::error::Result;
use crate::utils::round_price;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

fn confidence_label(level: f64) -> String {
    format!("{}%", (level * 100.0).round())
}

/// One row of the forecast details table, prices rounded to 2 decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub forecast: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Forecast details table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastTable {
    /// Confidence label used in the bound column headers, e.g. `95%`
    pub confidence: String,
    pub rows: Vec<ForecastRow>,
}

impl ForecastTable {
    /// Build the display table from an assembled forecast
    pub fn from_result(result: &ForecastResult) -> Self {
        let rows = result
            .forecast_dates
            .iter()
            .zip(&result.mean)
            .zip(result.lower_bound.iter().zip(&result.upper_bound))
            .map(|((date, mean), (lower, upper))| ForecastRow {
                date: *date,
                forecast: round_price(*mean),
                lower: round_price(*lower),
                upper: round_price(*upper),
            })
            .collect();

        Self {
            confidence: confidence_label(result.confidence_level),
            rows,
        }
    }

    /// Column headers
    pub fn headers(&self) -> [String; 4] {
        [
            "Date".to_string(),
            "Forecasted Price".to_string(),
            format!("Lower {} CI", self.confidence),
            format!("Upper {} CI", self.confidence),
        ]
    }

    /// Write the table as CSV
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(self.headers())?;

        for row in &self.rows {
            wtr.write_record([
                row.date.to_string(),
                format!("{:.2}", row.forecast),
                format!("{:.2}", row.lower),
                format!("{:.2}", row.upper),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Write the table to a CSV file
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_csv(file)
    }
}

impl fmt::Display for ForecastTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [date, forecast, lower, upper] = self.headers();
        writeln!(f, "{:<12} {:>16} {:>14} {:>14}", date, forecast, lower, upper)?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<12} {:>16.2} {:>14.2} {:>14.2}",
                row.date.to_string(),
                row.forecast,
                row.lower,
                row.upper
            )?;
        }
        Ok(())
    }
}

/// Line styling for a chart trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

/// A single chart trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub name: String,
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
    pub mode: String,
    pub line: LineStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<String>,
}

/// Renderer-agnostic chart: recent actuals, forecast line and confidence band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub height: u32,
    pub traces: Vec<Trace>,
}

impl ChartSpec {
    /// Build the chart for an assembled forecast
    pub fn new(result: &ForecastResult, payload: &PlotPayload, recent_points: usize) -> Self {
        let actual = Trace {
            name: format!("Actual Closing Price (Last {} Days)", recent_points),
            x: payload.recent_actual.iter().map(|obs| obs.date).collect(),
            y: payload.recent_actual.iter().map(|obs| obs.close).collect(),
            mode: "lines".to_string(),
            line: LineStyle {
                color: "blue".to_string(),
                dash: None,
            },
            fill: None,
            fillcolor: None,
            hoverinfo: None,
        };

        let forecast = Trace {
            name: "Forecast".to_string(),
            x: payload.forecast_dates.clone(),
            y: payload.forecast_mean.clone(),
            mode: "lines".to_string(),
            line: LineStyle {
                color: "orange".to_string(),
                dash: Some("dash".to_string()),
            },
            fill: None,
            fillcolor: None,
            hoverinfo: None,
        };

        let band = Trace {
            name: format!(
                "{} Confidence Interval",
                confidence_label(result.confidence_level)
            ),
            x: payload.band_dates.clone(),
            y: payload.band_values.clone(),
            mode: "lines".to_string(),
            line: LineStyle {
                color: "rgba(255,255,255,0)".to_string(),
                dash: None,
            },
            fill: Some("toself".to_string()),
            fillcolor: Some("rgba(128,128,128,0.2)".to_string()),
            hoverinfo: Some("skip".to_string()),
        };

        Self {
            title: format!(
                "{} Closing Price Forecast for Next {} Days",
                result.ticker,
                result.horizon()
            ),
            x_axis_title: "Date".to_string(),
            y_axis_title: "Price".to_string(),
            height: 500,
            traces: vec![actual, forecast, band],
        }
    }

    /// Encode the chart as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the chart JSON to a file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}
