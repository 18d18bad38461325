//! # Portfolio Performance
//!
//! $$
//! R = \mathbf{w}^\top\mu,\qquad \sigma = \sqrt{\mathbf{w}^\top\Sigma\mathbf{w}},\qquad
//! S = \frac{R - r_f}{\sigma}
//! $$
//!
//! Pure evaluation of a weight vector against annualized moments.

use ndarray::Array1;
use ndarray::Array2;

use super::types::PortfolioSample;
use crate::error::FrontierError;

/// Default annual risk-free rate.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

/// Volatility below this is treated as exactly zero.
const VOL_FLOOR: f64 = 1e-12;

pub(crate) fn check_shapes(
  weights: &Array1<f64>,
  mean: &Array1<f64>,
  covariance: &Array2<f64>,
) -> Result<(), FrontierError> {
  let n = weights.len();
  if n == 0 {
    return Err(FrontierError::invalid_input("empty weight vector"));
  }
  if mean.len() != n {
    return Err(FrontierError::invalid_input(format!(
      "mean vector has {} entries for {} weight(s)",
      mean.len(),
      n
    )));
  }
  if covariance.nrows() != n || covariance.ncols() != n {
    return Err(FrontierError::invalid_input(format!(
      "covariance is {}x{}, expected {}x{}",
      covariance.nrows(),
      covariance.ncols(),
      n,
      n
    )));
  }
  Ok(())
}

/// Evaluate `(R, σ, S)` for one weight vector.
///
/// Fails with [`FrontierError::ZeroVolatility`] when the variance collapses
/// to zero; the caller decides whether that kills the run (optimizer) or just
/// the candidate (sampler).
pub fn portfolio_performance(
  weights: &Array1<f64>,
  mean: &Array1<f64>,
  covariance: &Array2<f64>,
  risk_free: f64,
) -> Result<PortfolioSample, FrontierError> {
  check_shapes(weights, mean, covariance)?;

  let expected_return = weights.dot(mean);
  let variance = weights.dot(&covariance.dot(weights));
  let volatility = variance.max(0.0).sqrt();
  if volatility < VOL_FLOOR {
    return Err(FrontierError::ZeroVolatility);
  }

  Ok(PortfolioSample {
    expected_return,
    volatility,
    sharpe: (expected_return - risk_free) / volatility,
  })
}
