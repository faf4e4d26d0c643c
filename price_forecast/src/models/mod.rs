//! Forecasting capabilities consumed by the assembler

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// One forecast step: point estimate and confidence bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepForecast {
    /// Point estimate
    pub mean: f64,
    /// Lower confidence bound
    pub lower: f64,
    /// Upper confidence bound
    pub upper: f64,
}

impl StepForecast {
    /// Create a new forecast step
    pub fn new(mean: f64, lower: f64, upper: f64) -> Self {
        Self { mean, lower, upper }
    }

    /// Whether the bounds are finite and bracket the mean
    pub fn is_ordered(&self) -> bool {
        self.lower.is_finite()
            && self.mean.is_finite()
            && self.upper.is_finite()
            && self.lower <= self.mean
            && self.mean <= self.upper
    }
}

impl From<(f64, f64, f64)> for StepForecast {
    fn from((mean, lower, upper): (f64, f64, f64)) -> Self {
        Self::new(mean, lower, upper)
    }
}

/// A pre-fit model able to project future values
///
/// Implementations must return exactly `horizons` steps, step 1 first.
/// The assembler checks this and never pads or truncates.
pub trait TrainedForecastModel: Debug {
    /// Generate forecast steps for future periods
    fn forecast(&self, horizons: usize) -> Result<Vec<StepForecast>>;

    /// Name of the model
    fn name(&self) -> &str;

    /// Confidence level of the bounds, fixed when the model was fit
    fn confidence_level(&self) -> f64 {
        0.95
    }
}

pub mod arima;
