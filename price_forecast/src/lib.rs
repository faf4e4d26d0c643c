//! # Price Forecast
//!
//! Turns a table of historical closing prices and a pre-fit forecasting model
//! into a dated forecast with confidence bounds, ready for display.
//!
//! ## Features
//!
//! - Price table loading with fail-fast schema validation
//! - Per-ticker chronological price series
//! - A forecasting capability trait with a pre-fit ARIMA implementation
//! - Forecast assembly over contiguous calendar days
//! - Display table, chart specification and confidence-band polygon
//!
//! ## Quick Start
//!
//! ```no_run
//! use price_forecast::{ForecastConfig, ForecastRequest, ForecastSession};
//!
//! let session = ForecastSession::open(ForecastConfig::default())?;
//! let request = ForecastRequest::new("ACME", 30)?;
//! let output = session.generate(&request)?;
//!
//! println!("{}", output.chart.title);
//! println!("{}", output.table);
//! # Ok::<(), price_forecast::ForecastError>(())
//! ```

pub mod assembler;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod report;
pub mod request;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use crate::assembler::{assemble, ForecastResult, PlotPayload};
pub use crate::config::ForecastConfig;
pub use crate::data::{DataLoader, Observation, PriceSeries, PriceTable};
pub use crate::error::{ForecastError, Result};
pub use crate::models::arima::FittedArima;
pub use crate::models::{StepForecast, TrainedForecastModel};
pub use crate::report::{ChartSpec, ForecastTable};
pub use crate::request::{ForecastRequest, Horizon};
pub use crate::session::{ForecastOutput, ForecastSession};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
