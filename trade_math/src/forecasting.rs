//! Forecasting kernels for pre-fit ARIMA models
//!
//! Contains the pieces needed to evaluate an ARIMA(p, d, q) model whose
//! coefficients were estimated elsewhere:
//! - Differencing and re-integration
//! - ARMA point-forecast recursion
//! - Psi-weights and normal-theory interval half-widths

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Order of an ARIMA model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[usize; 3]", into = "[usize; 3]")]
pub struct ArimaOrder {
    /// Autoregressive order
    pub p: usize,
    /// Differencing order
    pub d: usize,
    /// Moving-average order
    pub q: usize,
}

impl ArimaOrder {
    /// Create a new ARIMA order
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }
}

impl From<[usize; 3]> for ArimaOrder {
    fn from([p, d, q]: [usize; 3]) -> Self {
        Self { p, d, q }
    }
}

impl From<ArimaOrder> for [usize; 3] {
    fn from(order: ArimaOrder) -> Self {
        [order.p, order.d, order.q]
    }
}

impl std::fmt::Display for ArimaOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ARIMA({},{},{})", self.p, self.d, self.q)
    }
}

/// Apply `d` rounds of first differencing to a series
pub fn difference(values: &[f64], d: usize) -> Result<Vec<f64>> {
    if values.len() <= d {
        return Err(MathError::InsufficientData(format!(
            "Need more than {} values to difference {} times, got {}",
            d,
            d,
            values.len()
        )));
    }

    let mut current = values.to_vec();
    for _ in 0..d {
        current = current.windows(2).map(|w| w[1] - w[0]).collect();
    }

    Ok(current)
}

/// Undo `d` rounds of differencing for a forecast path
///
/// `forecast` lives on the d-times differenced scale and continues directly
/// after the last element of `history`, which is on the original scale.
pub fn integrate(forecast: &[f64], history: &[f64], d: usize) -> Result<Vec<f64>> {
    if d == 0 {
        return Ok(forecast.to_vec());
    }

    // Last observed value at each differencing level 0..d
    let mut anchors = Vec::with_capacity(d);
    for level in 0..d {
        let differenced = difference(history, level)?;
        match differenced.last() {
            Some(last) => anchors.push(*last),
            None => {
                return Err(MathError::InsufficientData(
                    "History is empty".to_string(),
                ))
            }
        }
    }

    let mut current = forecast.to_vec();
    for anchor in anchors.into_iter().rev() {
        let mut running = anchor;
        current = current
            .iter()
            .map(|step| {
                running += step;
                running
            })
            .collect();
    }

    Ok(current)
}

/// Point forecasts from an ARMA recursion
///
/// Future innovations are taken as zero; `residuals` must hold at least the
/// last `ma.len()` in-sample innovations, aligned with the end of `series`.
pub fn arma_forecast(
    series: &[f64],
    constant: f64,
    ar: &[f64],
    ma: &[f64],
    residuals: &[f64],
    steps: usize,
) -> Result<Vec<f64>> {
    if series.len() < ar.len() {
        return Err(MathError::InsufficientData(format!(
            "AR({}) recursion needs at least {} observations, got {}",
            ar.len(),
            ar.len(),
            series.len()
        )));
    }
    if residuals.len() < ma.len() {
        return Err(MathError::InsufficientData(format!(
            "MA({}) recursion needs at least {} residuals, got {}",
            ma.len(),
            ma.len(),
            residuals.len()
        )));
    }

    let mut history = series.to_vec();
    let mut innovations = residuals.to_vec();
    let mut forecasts = Vec::with_capacity(steps);

    for _ in 0..steps {
        let n = history.len();
        let m = innovations.len();

        let mut next = constant;
        for (i, phi) in ar.iter().enumerate() {
            next += phi * history[n - 1 - i];
        }
        for (j, theta) in ma.iter().enumerate() {
            next += theta * innovations[m - 1 - j];
        }

        history.push(next);
        innovations.push(0.0);
        forecasts.push(next);
    }

    Ok(forecasts)
}

/// Psi-weights (MA(inf) representation) of an ARIMA model
///
/// The AR polynomial is expanded with the `(1 - B)^d` factor first, so the
/// weights describe the integrated process.
pub fn psi_weights(ar: &[f64], ma: &[f64], d: usize, count: usize) -> Vec<f64> {
    // Lag polynomial 1 - phi_1 B - ... - phi_p B^p
    let mut poly = Vec::with_capacity(ar.len() + d + 1);
    poly.push(1.0);
    poly.extend(ar.iter().map(|phi| -phi));

    for _ in 0..d {
        let mut next = vec![0.0; poly.len() + 1];
        for (i, c) in poly.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= c;
        }
        poly = next;
    }

    let phi_star: Vec<f64> = poly.iter().skip(1).map(|c| -c).collect();

    let mut psi = Vec::with_capacity(count);
    for j in 0..count {
        if j == 0 {
            psi.push(1.0);
            continue;
        }

        let mut value = if j <= ma.len() { ma[j - 1] } else { 0.0 };
        for i in 1..=j.min(phi_star.len()) {
            value += phi_star[i - 1] * psi[j - i];
        }
        psi.push(value);
    }

    psi
}

/// Two-sided standard normal critical value for significance `alpha`
pub fn two_sided_z(alpha: f64) -> Result<f64> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(MathError::InvalidInput(format!(
            "Significance level must be between 0 and 1, got {}",
            alpha
        )));
    }

    let normal =
        Normal::new(0.0, 1.0).map_err(|e| MathError::CalculationError(e.to_string()))?;
    Ok(normal.inverse_cdf(1.0 - alpha / 2.0))
}

/// Interval half-widths for each forecast step
pub fn interval_half_widths(sigma2: f64, psi: &[f64], z: f64) -> Result<Vec<f64>> {
    if !sigma2.is_finite() || sigma2 < 0.0 {
        return Err(MathError::InvalidInput(format!(
            "Innovation variance must be finite and non-negative, got {}",
            sigma2
        )));
    }

    let mut cumulative = 0.0;
    Ok(psi
        .iter()
        .map(|weight| {
            cumulative += weight * weight;
            z * (sigma2 * cumulative).sqrt()
        })
        .collect())
}
