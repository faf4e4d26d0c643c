//! Pre-fit ARIMA models loaded from serialized artifacts

use crate::error::{ForecastError, Result};
use crate::models::{StepForecast, TrainedForecastModel};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use trade_math::forecasting::{
    arma_forecast, difference, integrate, interval_half_widths, psi_weights, two_sided_z,
};
use trade_math::ArimaOrder;

fn default_alpha() -> f64 {
    0.05
}

/// Fitted ARIMA model (AutoRegressive Integrated Moving Average)
///
/// Holds parameters estimated elsewhere together with enough of the training
/// tail to continue the recursion. Estimation itself is out of scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedArima {
    /// Model order (p, d, q)
    order: ArimaOrder,
    /// Intercept on the differenced scale
    #[serde(default)]
    constant: f64,
    /// AR coefficients, lag 1 first
    #[serde(default)]
    ar: Vec<f64>,
    /// MA coefficients, lag 1 first
    #[serde(default)]
    ma: Vec<f64>,
    /// Innovation variance
    sigma2: f64,
    /// Training series tail on the original scale
    history: Vec<f64>,
    /// In-sample innovations aligned with the end of `history`
    #[serde(default)]
    residuals: Vec<f64>,
    /// Significance level of the reported interval
    #[serde(default = "default_alpha")]
    alpha: f64,
    /// Display name
    #[serde(skip)]
    name: String,
}

impl FittedArima {
    /// Build a fitted model from its parameters
    pub fn new(
        order: ArimaOrder,
        constant: f64,
        ar: Vec<f64>,
        ma: Vec<f64>,
        sigma2: f64,
        history: Vec<f64>,
        residuals: Vec<f64>,
    ) -> Result<Self> {
        let model = Self {
            order,
            constant,
            ar,
            ma,
            sigma2,
            history,
            residuals,
            alpha: default_alpha(),
            name: order.to_string(),
        };
        model.validate()?;
        Ok(model)
    }

    /// Change the significance level of the reported interval
    pub fn with_alpha(mut self, alpha: f64) -> Result<Self> {
        self.alpha = alpha;
        self.validate()?;
        Ok(self)
    }

    /// Load a fitted model from a JSON artifact
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ForecastError::MissingResource(format!(
                "Model file '{}' not found",
                path.display()
            )));
        }

        let text = fs::read_to_string(path)?;
        let model = Self::from_json(&text)?;
        info!(path = %path.display(), model = %model.name, "Loaded model artifact");
        Ok(model)
    }

    /// Decode a fitted model from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        let mut model: Self = serde_json::from_str(text)
            .map_err(|e| ForecastError::InvalidModel(format!("Cannot decode artifact: {}", e)))?;
        model.name = model.order.to_string();
        model.validate()?;
        Ok(model)
    }

    /// Encode the model as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Model order
    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    fn validate(&self) -> Result<()> {
        let ArimaOrder { p, d, q } = self.order;

        if self.ar.len() != p {
            return Err(ForecastError::InvalidModel(format!(
                "{} expects {} AR coefficients, found {}",
                self.order,
                p,
                self.ar.len()
            )));
        }
        if self.ma.len() != q {
            return Err(ForecastError::InvalidModel(format!(
                "{} expects {} MA coefficients, found {}",
                self.order,
                q,
                self.ma.len()
            )));
        }
        if self.history.len() < p + d + 1 {
            return Err(ForecastError::InvalidModel(format!(
                "{} needs at least {} history values, found {}",
                self.order,
                p + d + 1,
                self.history.len()
            )));
        }
        if self.residuals.len() < q {
            return Err(ForecastError::InvalidModel(format!(
                "{} needs at least {} residuals, found {}",
                self.order,
                q,
                self.residuals.len()
            )));
        }
        if !self.sigma2.is_finite() || self.sigma2 < 0.0 {
            return Err(ForecastError::InvalidModel(format!(
                "Innovation variance must be finite and non-negative, got {}",
                self.sigma2
            )));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ForecastError::InvalidModel(format!(
                "Significance level must be between 0 and 1, got {}",
                self.alpha
            )));
        }

        let mut parameters = self
            .ar
            .iter()
            .chain(&self.ma)
            .chain(&self.history)
            .chain(&self.residuals)
            .chain(std::iter::once(&self.constant));
        if parameters.any(|value| !value.is_finite()) {
            return Err(ForecastError::InvalidModel(
                "Artifact contains non-finite values".to_string(),
            ));
        }

        Ok(())
    }
}

impl TrainedForecastModel for FittedArima {
    fn forecast(&self, horizons: usize) -> Result<Vec<StepForecast>> {
        let d = self.order.d;

        let differenced = difference(&self.history, d)?;
        let path = arma_forecast(
            &differenced,
            self.constant,
            &self.ar,
            &self.ma,
            &self.residuals,
            horizons,
        )?;
        let means = integrate(&path, &self.history, d)?;

        let psi = psi_weights(&self.ar, &self.ma, d, horizons);
        let z = two_sided_z(self.alpha)?;
        let half_widths = interval_half_widths(self.sigma2, &psi, z)?;

        debug!(model = %self.name, horizons, "Evaluated ARIMA forecast");

        Ok(means
            .into_iter()
            .zip(half_widths)
            .map(|(mean, half)| StepForecast::new(mean, mean - half, mean + half))
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn confidence_level(&self) -> f64 {
        1.0 - self.alpha
    }
}
