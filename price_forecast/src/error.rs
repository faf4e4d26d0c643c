//! Error types for the price_forecast crate

use thiserror::Error;

/// Custom error types for the price_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// An input file or model artifact is absent from its expected location
    #[error("Missing resource: {0}")]
    MissingResource(String),

    /// A required column is absent, or a value fails to parse as its expected type
    #[error("Schema error: {0}")]
    Schema(String),

    /// The requested ticker has no rows
    #[error("Not found: {0}")]
    NotFound(String),

    /// The forecaster returned a different number of steps than requested
    #[error("Alignment error: forecaster returned {actual} steps, expected {expected}")]
    Alignment { expected: usize, actual: usize },

    /// The selected series has no observations to anchor the forecast
    #[error("Empty series: {0}")]
    EmptySeries(String),

    /// Horizon outside the supported set
    #[error("Invalid horizon: {0} days is not one of 7, 14, 30, 60, 90, 180, 365")]
    InvalidHorizon(usize),

    /// A forecast step violates lower <= mean <= upper or is not finite
    #[error("Invalid confidence band at step {step}: lower={lower}, mean={mean}, upper={upper}")]
    InvalidBand {
        step: usize,
        lower: f64,
        mean: f64,
        upper: f64,
    },

    /// The model artifact could not be decoded or is internally inconsistent
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// The forecasting capability failed to produce a forecast
    #[error("Forecaster error: {0}")]
    Forecaster(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV reading or writing
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error from JSON serialization
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ForecastError {
    /// Stable code for the rendering layer
    pub fn code(&self) -> &'static str {
        match self {
            ForecastError::MissingResource(_) => "MISSING_RESOURCE",
            ForecastError::Schema(_) => "SCHEMA",
            ForecastError::NotFound(_) => "NOT_FOUND",
            ForecastError::Alignment { .. } => "ALIGNMENT",
            ForecastError::EmptySeries(_) => "EMPTY_SERIES",
            ForecastError::InvalidHorizon(_) => "INVALID_HORIZON",
            ForecastError::InvalidBand { .. } => "INVALID_BAND",
            ForecastError::InvalidModel(_) => "INVALID_MODEL",
            ForecastError::Forecaster(_) => "FORECASTER",
            ForecastError::IoError(_) => "IO",
            ForecastError::CsvError(_) => "CSV",
            ForecastError::Serialization(_) => "SERIALIZATION",
        }
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::Serialization(err.to_string())
    }
}

impl From<trade_math::MathError> for ForecastError {
    fn from(err: trade_math::MathError) -> Self {
        ForecastError::Forecaster(err.to_string())
    }
}
