//! Historical price data handling for forecasting

use crate::error::{ForecastError, Result};
use crate::utils::parse_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

const SYMBOL_COLUMN: &str = "symbol";
const DATE_COLUMN: &str = "date";
const CLOSE_COLUMN: &str = "close";

/// A single dated closing price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Trading date
    pub date: NaiveDate,
    /// Closing price
    pub close: f64,
}

impl Observation {
    /// Create a new observation
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Validated, chronologically sorted price history for one ticker
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    ticker: String,
    observations: Vec<Observation>,
}

impl PriceSeries {
    /// Create a price series from observations in any order
    ///
    /// Observations are sorted by date. Rows sharing a date collapse to the
    /// one that came last in the input.
    pub fn new(ticker: impl Into<String>, mut observations: Vec<Observation>) -> Result<Self> {
        let ticker = ticker.into();
        if observations.is_empty() {
            return Err(ForecastError::EmptySeries(format!(
                "No observations for ticker '{}'",
                ticker
            )));
        }

        // Stable sort keeps input order among equal dates
        observations.sort_by_key(|obs| obs.date);

        let before = observations.len();
        let mut deduped: Vec<Observation> = Vec::with_capacity(before);
        for obs in observations {
            match deduped.last_mut() {
                Some(last) if last.date == obs.date => *last = obs,
                _ => deduped.push(obs),
            }
        }

        if deduped.len() != before {
            warn!(
                ticker = %ticker,
                duplicates = before - deduped.len(),
                "Collapsed duplicate dates, keeping the last row for each"
            );
        }

        Ok(Self {
            ticker,
            observations: deduped,
        })
    }

    /// Ticker symbol
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Observations in ascending date order
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Always false for a constructed series
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Date of the most recent observation
    pub fn last_date(&self) -> Result<NaiveDate> {
        self.observations
            .iter()
            .map(|obs| obs.date)
            .max()
            .ok_or_else(|| {
                ForecastError::EmptySeries(format!(
                    "No observations for ticker '{}'",
                    self.ticker
                ))
            })
    }

    /// Closing prices in date order
    pub fn close_prices(&self) -> Vec<f64> {
        self.observations.iter().map(|obs| obs.close).collect()
    }

    /// The most recent `count` observations, or all of them if fewer exist
    pub fn recent(&self, count: usize) -> &[Observation] {
        let start = self.observations.len().saturating_sub(count);
        &self.observations[start..]
    }
}

/// One row of the raw price table
#[derive(Debug, Clone)]
struct PriceRow {
    date: NaiveDate,
    close: Option<f64>,
}

/// Validated price table, grouped by ticker and sorted by date within each group
///
/// Immutable once loaded; share it freely between requests.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    groups: BTreeMap<String, Vec<PriceRow>>,
    has_close: bool,
    row_count: usize,
}

impl PriceTable {
    /// Distinct tickers in ascending order
    pub fn tickers(&self) -> Vec<&str> {
        self.groups.keys().map(String::as_str).collect()
    }

    /// Whether the ticker has any rows
    pub fn contains(&self, ticker: &str) -> bool {
        self.groups.contains_key(ticker)
    }

    /// Whether the source carried a close column
    pub fn has_close_column(&self) -> bool {
        self.has_close
    }

    /// Total number of rows loaded
    pub fn len(&self) -> usize {
        self.row_count
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Extract the chronological price series of one ticker
    pub fn select(&self, ticker: &str) -> Result<PriceSeries> {
        let rows = match self.groups.get(ticker) {
            Some(rows) if !rows.is_empty() => rows,
            _ => {
                return Err(ForecastError::NotFound(format!(
                    "No data found for ticker '{}'",
                    ticker
                )))
            }
        };

        if !self.has_close {
            return Err(ForecastError::Schema("missing close column".to_string()));
        }

        let observations = rows
            .iter()
            .map(|row| {
                row.close
                    .map(|close| Observation::new(row.date, close))
                    .ok_or_else(|| ForecastError::Schema("missing close column".to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(ticker, rows = observations.len(), "Selected price series");
        PriceSeries::new(ticker, observations)
    }
}

/// Data loader for historical price tables
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a price table from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<PriceTable> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ForecastError::MissingResource(format!(
                "Data file '{}' not found",
                path.display()
            )));
        }

        let file = File::open(path)?;
        let table = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            rows = table.len(),
            tickers = table.groups.len(),
            "Loaded price table"
        );
        Ok(table)
    }

    /// Load a price table from any CSV source
    ///
    /// Fails fast on the first structural problem: a missing `symbol` or
    /// `date` column, an unparseable date, or a non-numeric close price.
    /// A missing `close` column is only reported when a ticker is selected.
    pub fn from_reader<R: Read>(reader: R) -> Result<PriceTable> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(name))
        };

        let symbol_idx = column(SYMBOL_COLUMN)
            .ok_or_else(|| ForecastError::Schema("missing symbol column".to_string()))?;
        let date_idx = column(DATE_COLUMN)
            .ok_or_else(|| ForecastError::Schema("missing date column".to_string()))?;
        let close_idx = column(CLOSE_COLUMN);

        let mut groups: BTreeMap<String, Vec<PriceRow>> = BTreeMap::new();
        let mut row_count = 0;

        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            let line = i + 2;

            let symbol = record.get(symbol_idx).unwrap_or_default().to_string();

            let raw_date = record.get(date_idx).unwrap_or_default();
            let date = parse_date(raw_date).ok_or_else(|| {
                ForecastError::Schema(format!("invalid date '{}' at line {}", raw_date, line))
            })?;

            let close = match close_idx {
                Some(idx) => {
                    let raw_close = record.get(idx).unwrap_or_default();
                    let value = raw_close.parse::<f64>().map_err(|_| {
                        ForecastError::Schema(format!(
                            "invalid close value '{}' at line {}",
                            raw_close, line
                        ))
                    })?;
                    Some(value)
                }
                None => None,
            };

            groups
                .entry(symbol)
                .or_default()
                .push(PriceRow { date, close });
            row_count += 1;
        }

        for rows in groups.values_mut() {
            rows.sort_by_key(|row| row.date);
        }

        if close_idx.is_none() {
            warn!("Price table has no close column");
        }

        Ok(PriceTable {
            groups,
            has_close: close_idx.is_some(),
            row_count,
        })
    }
}
