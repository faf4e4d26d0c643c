//! Locations of the input artifacts and display defaults

use crate::assembler::RECENT_POINTS;
use crate::error::{ForecastError, Result};
use crate::request::Horizon;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default price history file name
pub const DATA_FILE: &str = "Prices_Cleaned.csv";
/// Default model artifact file name
pub const MODEL_FILE: &str = "arima_model.json";

/// Forecast tool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Price history CSV
    pub data_file: PathBuf,
    /// Pre-fit model artifact
    pub model_file: PathBuf,
    /// Historical points shown next to the forecast
    pub recent_points: usize,
    /// Horizon offered when the user does not pick one
    pub default_horizon: Horizon,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DATA_FILE),
            model_file: PathBuf::from(MODEL_FILE),
            recent_points: RECENT_POINTS,
            default_horizon: Horizon::default(),
        }
    }
}

impl ForecastConfig {
    /// Load a configuration from a JSON file; omitted fields keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ForecastError::MissingResource(format!(
                "Config file '{}' not found",
                path.display()
            )));
        }

        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
