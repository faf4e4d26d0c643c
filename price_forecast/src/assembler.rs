//! Forecast assembly: dated forecast rows and plot-ready series

use crate::data::{Observation, PriceSeries};
use crate::error::{ForecastError, Result};
use crate::models::TrainedForecastModel;
use crate::utils::forecast_dates;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of historical points shown next to the forecast
pub const RECENT_POINTS: usize = 100;

/// Dated forecast with confidence bounds
///
/// All four sequences have the same length, and `forecast_dates` are
/// consecutive calendar days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Ticker the forecast belongs to
    pub ticker: String,
    /// One date per forecast step, starting the day after the last observation
    pub forecast_dates: Vec<NaiveDate>,
    /// Point estimates
    pub mean: Vec<f64>,
    /// Lower confidence bounds
    pub lower_bound: Vec<f64>,
    /// Upper confidence bounds
    pub upper_bound: Vec<f64>,
    /// Confidence level of the bounds
    pub confidence_level: f64,
}

impl ForecastResult {
    /// Number of forecast steps
    pub fn horizon(&self) -> usize {
        self.forecast_dates.len()
    }

    /// Upper bounds forward followed by lower bounds backward
    ///
    /// Traces the top edge of the band and returns along the bottom edge, so
    /// the sequence closes into a polygon.
    pub fn band_polygon(&self) -> Vec<f64> {
        self.upper_bound
            .iter()
            .chain(self.lower_bound.iter().rev())
            .copied()
            .collect()
    }

    /// Dates matching [`ForecastResult::band_polygon`]
    pub fn band_polygon_dates(&self) -> Vec<NaiveDate> {
        self.forecast_dates
            .iter()
            .chain(self.forecast_dates.iter().rev())
            .copied()
            .collect()
    }
}

/// Build a dated forecast for `series` from a pre-fit model
///
/// The model is asked for exactly `horizon_days` steps; step `i` is paired
/// with the `i`-th day after the last observation. A count mismatch or a step
/// whose bounds do not bracket its mean fails the whole call.
pub fn assemble<M>(series: &PriceSeries, horizon_days: usize, model: &M) -> Result<ForecastResult>
where
    M: TrainedForecastModel + ?Sized,
{
    if horizon_days == 0 {
        return Err(ForecastError::InvalidHorizon(horizon_days));
    }

    let last_date = series.last_date()?;
    let dates = forecast_dates(last_date, horizon_days)?;

    let steps = model.forecast(horizon_days)?;
    if steps.len() != horizon_days {
        return Err(ForecastError::Alignment {
            expected: horizon_days,
            actual: steps.len(),
        });
    }

    let mut mean = Vec::with_capacity(horizon_days);
    let mut lower_bound = Vec::with_capacity(horizon_days);
    let mut upper_bound = Vec::with_capacity(horizon_days);

    for (i, step) in steps.iter().enumerate() {
        if !step.is_ordered() {
            return Err(ForecastError::InvalidBand {
                step: i + 1,
                lower: step.lower,
                mean: step.mean,
                upper: step.upper,
            });
        }
        mean.push(step.mean);
        lower_bound.push(step.lower);
        upper_bound.push(step.upper);
    }

    debug!(
        ticker = series.ticker(),
        model = model.name(),
        %last_date,
        horizon_days,
        "Assembled forecast"
    );

    Ok(ForecastResult {
        ticker: series.ticker().to_string(),
        forecast_dates: dates,
        mean,
        lower_bound,
        upper_bound,
        confidence_level: model.confidence_level(),
    })
}

/// Series ready for charting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotPayload {
    /// Most recent historical closes
    pub recent_actual: Vec<Observation>,
    /// Forecast dates
    pub forecast_dates: Vec<NaiveDate>,
    /// Forecast mean line
    pub forecast_mean: Vec<f64>,
    /// Band polygon x values: forecast dates forward, then reversed
    pub band_dates: Vec<NaiveDate>,
    /// Band polygon y values: upper bounds forward, then lower bounds reversed
    pub band_values: Vec<f64>,
}

impl PlotPayload {
    /// Plot payload with the default history window
    pub fn build(series: &PriceSeries, result: &ForecastResult) -> Self {
        Self::with_recent(series, result, RECENT_POINTS)
    }

    /// Plot payload showing at most `recent_points` historical closes
    pub fn with_recent(series: &PriceSeries, result: &ForecastResult, recent_points: usize) -> Self {
        Self {
            recent_actual: series.recent(recent_points).to_vec(),
            forecast_dates: result.forecast_dates.clone(),
            forecast_mean: result.mean.clone(),
            band_dates: result.band_polygon_dates(),
            band_values: result.band_polygon(),
        }
    }
}
