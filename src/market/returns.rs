//! # Returns Engine
//!
//! $$
//! \mu = 252\,\bar r, \qquad \Sigma = 252\,\widehat{\mathrm{Cov}}(r)
//! $$
//!
//! Converts a price table into periodic returns and annualized first/second
//! moments. Pure transforms, no hidden state.

use ndarray::Array1;
use ndarray::Array2;
use ndarray::Axis;

use super::prices::PriceTable;
use crate::error::FrontierError;

/// Default annualization multiplier for daily observations.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Annualized return moments estimated from a return series.
#[derive(Clone, Debug)]
pub struct Moments {
  /// Annualized per-instrument mean return.
  pub mean: Array1<f64>,
  /// Annualized sample covariance matrix (ddof = 1).
  pub covariance: Array2<f64>,
  /// Number of return observations the estimate is based on.
  pub observations: usize,
}

/// Period-over-period fractional changes between consecutive price rows.
///
/// No filling: a gap makes the affected return non-finite, and any return row
/// containing a non-finite value is dropped wholesale.
pub fn simple_returns(table: &PriceTable) -> Result<Array2<f64>, FrontierError> {
  let n_rows = table.n_rows();
  if n_rows < 2 {
    return Err(FrontierError::InsufficientData { rows: n_rows });
  }

  let n_assets = table.n_instruments();
  let prices = table.prices();

  let mut flat = Vec::with_capacity((n_rows - 1) * n_assets);
  let mut kept = 0;
  for t in 1..n_rows {
    let row: Vec<f64> = (0..n_assets)
      .map(|j| prices[[t, j]] / prices[[t - 1, j]] - 1.0)
      .collect();
    if row.iter().all(|v| v.is_finite()) {
      flat.extend_from_slice(&row);
      kept += 1;
    }
  }

  Array2::from_shape_vec((kept, n_assets), flat)
    .map_err(|e| FrontierError::invalid_input(format!("return matrix assembly: {e}")))
}

/// Annualized mean vector and sample covariance of a return series.
///
/// With fewer than two observations the covariance cannot be estimated and is
/// returned as all zeros; callers gate on [`Moments::observations`].
pub fn moments(returns: &Array2<f64>, periods_per_year: f64) -> Moments {
  let n_obs = returns.nrows();
  let n_assets = returns.ncols();

  let mean_per_period = returns
    .mean_axis(Axis(0))
    .unwrap_or_else(|| Array1::zeros(n_assets));

  let mut covariance = Array2::zeros((n_assets, n_assets));
  if n_obs >= 2 {
    for i in 0..n_assets {
      for j in i..n_assets {
        let mut acc = 0.0;
        for t in 0..n_obs {
          acc += (returns[[t, i]] - mean_per_period[i]) * (returns[[t, j]] - mean_per_period[j]);
        }
        let c = acc / (n_obs - 1) as f64 * periods_per_year;
        covariance[[i, j]] = c;
        covariance[[j, i]] = c;
      }
    }
  }

  Moments {
    mean: mean_per_period * periods_per_year,
    covariance,
    observations: n_obs,
  }
}

/// Returns-then-moments convenience used by the engine.
pub fn annualized_moments(
  table: &PriceTable,
  periods_per_year: f64,
) -> Result<Moments, FrontierError> {
  let returns = simple_returns(table)?;
  Ok(moments(&returns, periods_per_year))
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;
  use chrono::NaiveDate;
  use ndarray::array;

  use super::*;

  fn table(prices: Array2<f64>) -> PriceTable {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let dates: Vec<NaiveDate> = (0..prices.nrows())
      .map(|i| start + chrono::Duration::days(i as i64))
      .collect();
    let symbols: Vec<String> = (0..prices.ncols()).map(|j| format!("A{j}")).collect();
    PriceTable::new(symbols, dates, prices).unwrap()
  }

  #[test]
  fn single_row_is_insufficient() {
    let err = simple_returns(&table(array![[10.0, 20.0]])).unwrap_err();
    assert!(matches!(err, FrontierError::InsufficientData { rows: 1 }));
  }

  #[test]
  fn computes_fractional_changes() {
    let returns = simple_returns(&table(array![[100.0, 50.0], [110.0, 45.0], [99.0, 54.0]])).unwrap();

    assert_eq!(returns.nrows(), 2);
    assert_relative_eq!(returns[[0, 0]], 0.10, max_relative = 1e-12);
    assert_relative_eq!(returns[[0, 1]], -0.10, max_relative = 1e-12);
    assert_relative_eq!(returns[[1, 0]], -0.10, max_relative = 1e-12);
    assert_relative_eq!(returns[[1, 1]], 0.20, max_relative = 1e-12);
  }

  #[test]
  fn gap_drops_both_adjacent_return_rows() {
    // A NaN price at row 1 poisons the returns for rows 1 and 2.
    let returns =
      simple_returns(&table(array![[100.0, 50.0], [110.0, f64::NAN], [99.0, 54.0], [100.0, 55.0]]))
        .unwrap();

    assert_eq!(returns.nrows(), 1);
    assert_relative_eq!(returns[[0, 0]], 100.0 / 99.0 - 1.0, max_relative = 1e-12);
  }

  #[test]
  fn two_rows_yield_one_observation_and_zero_covariance() {
    let m = annualized_moments(&table(array![[100.0], [110.0]]), TRADING_DAYS_PER_YEAR).unwrap();

    assert_eq!(m.observations, 1);
    assert_relative_eq!(m.mean[0], 0.10 * 252.0, max_relative = 1e-12);
    assert_eq!(m.covariance[[0, 0]], 0.0);
  }

  #[test]
  fn moments_match_hand_computation() {
    let returns = array![[0.01, 0.02], [0.03, -0.02], [-0.01, 0.03]];
    let m = moments(&returns, 252.0);

    assert_relative_eq!(m.mean[0], 0.01 * 252.0, max_relative = 1e-12);
    assert_relative_eq!(m.mean[1], 0.01 * 252.0, max_relative = 1e-12);

    // Sample covariance with ddof = 1.
    let var0 = ((0.0f64).powi(2) + (0.02f64).powi(2) + (-0.02f64).powi(2)) / 2.0;
    let cov01 = (0.0 * 0.01 + 0.02 * (-0.03) + (-0.02) * 0.02) / 2.0;
    assert_relative_eq!(m.covariance[[0, 0]], var0 * 252.0, max_relative = 1e-9);
    assert_relative_eq!(m.covariance[[0, 1]], cov01 * 252.0, max_relative = 1e-9);
    assert_relative_eq!(m.covariance[[0, 1]], m.covariance[[1, 0]], max_relative = 1e-15);
  }

  #[test]
  fn moments_are_idempotent() {
    let t = table(array![[100.0, 50.0], [110.0, 45.0], [99.0, 54.0], [102.0, 53.0]]);
    let a = annualized_moments(&t, TRADING_DAYS_PER_YEAR).unwrap();
    let b = annualized_moments(&t, TRADING_DAYS_PER_YEAR).unwrap();

    assert_eq!(a.mean, b.mean);
    assert_eq!(a.covariance, b.covariance);
  }
}
