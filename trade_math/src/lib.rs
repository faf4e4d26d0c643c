//! # Trade Math
//!
//! Numeric kernels for evaluating fitted time series models.
//! This crate provides the differencing, ARMA recursion and interval
//! arithmetic needed to turn the parameters of a pre-fit ARIMA(p, d, q)
//! model into point forecasts and confidence bounds.

use thiserror::Error;

pub mod forecasting;

pub use forecasting::ArimaOrder;

/// Errors that can occur in forecasting calculations
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for trading math operations
pub type Result<T> = std::result::Result<T, MathError>;
