//! User-selected forecast parameters

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported forecast horizons, in calendar days
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "usize", into = "usize")]
pub enum Horizon {
    OneWeek,
    TwoWeeks,
    #[default]
    OneMonth,
    TwoMonths,
    Quarter,
    HalfYear,
    Year,
}

impl Horizon {
    /// Every supported horizon, shortest first
    pub const ALL: [Horizon; 7] = [
        Horizon::OneWeek,
        Horizon::TwoWeeks,
        Horizon::OneMonth,
        Horizon::TwoMonths,
        Horizon::Quarter,
        Horizon::HalfYear,
        Horizon::Year,
    ];

    /// Number of days covered
    pub fn days(&self) -> usize {
        match self {
            Horizon::OneWeek => 7,
            Horizon::TwoWeeks => 14,
            Horizon::OneMonth => 30,
            Horizon::TwoMonths => 60,
            Horizon::Quarter => 90,
            Horizon::HalfYear => 180,
            Horizon::Year => 365,
        }
    }
}

impl TryFrom<usize> for Horizon {
    type Error = ForecastError;

    fn try_from(days: usize) -> Result<Self> {
        Horizon::ALL
            .into_iter()
            .find(|horizon| horizon.days() == days)
            .ok_or(ForecastError::InvalidHorizon(days))
    }
}

impl From<Horizon> for usize {
    fn from(horizon: Horizon) -> Self {
        horizon.days()
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} days", self.days())
    }
}

/// A validated forecast request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRequest {
    /// Ticker to forecast
    pub ticker: String,
    /// Forecast horizon
    pub horizon: Horizon,
}

impl ForecastRequest {
    /// Create a request from raw user input
    pub fn new(ticker: impl Into<String>, horizon_days: usize) -> Result<Self> {
        let ticker = ticker.into().trim().to_string();
        if ticker.is_empty() {
            return Err(ForecastError::NotFound("No ticker selected".to_string()));
        }

        Ok(Self {
            ticker,
            horizon: Horizon::try_from(horizon_days)?,
        })
    }

    /// Number of days to forecast
    pub fn horizon_days(&self) -> usize {
        self.horizon.days()
    }
}
