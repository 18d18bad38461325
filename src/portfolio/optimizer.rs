//! # Constrained Optimizer
//!
//! $$
//! \max_{\mathbf{w}}\ \frac{\mathbf{w}^\top\mu - r_f}{\sqrt{\mathbf{w}^\top\Sigma\mathbf{w}}}
//! \quad\text{s.t.}\quad \sum_i w_i = 1,\ 0 \le w_i \le 1
//! $$
//!
//! The simplex constraints are enforced through a softmax chart, so every
//! point the solver visits is feasible by construction; the search itself is
//! an unconstrained Nelder-Mead run on the chart coordinates. The origin of
//! the chart maps to the equal-weight portfolio, which doubles as the
//! initial guess.

use argmin::core::CostFunction;
use argmin::core::Executor;
use argmin::core::TerminationReason;
use argmin::core::TerminationStatus;
use argmin::solver::neldermead::NelderMead;
use ndarray::Array1;
use ndarray::Array2;

use super::performance::check_shapes;
use super::performance::portfolio_performance;
use super::types::OptimalPortfolio;
use crate::error::FrontierError;

/// Allowed deviation of the weight sum from 1 and of entries from [0, 1].
pub const SIMPLEX_TOLERANCE: f64 = 1e-6;

/// Objective value returned for zero-variance points so the search steers
/// away from them.
const INFEASIBLE_COST: f64 = 1e10;

/// Solver iteration budget and stopping tolerance.
#[derive(Clone, Copy, Debug)]
pub struct SolverOptions {
  pub max_iters: u64,
  pub sd_tolerance: f64,
}

impl Default for SolverOptions {
  fn default() -> Self {
    Self {
      max_iters: 5000,
      sd_tolerance: 1e-8,
    }
  }
}

fn softmax(x: &[f64]) -> Array1<f64> {
  let max_x = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
  let exps: Vec<f64> = x.iter().map(|&v| (v - max_x).exp()).collect();
  let sum: f64 = exps.iter().sum();

  if sum < 1e-15 {
    Array1::from_elem(x.len(), 1.0 / x.len() as f64)
  } else {
    Array1::from_iter(exps.iter().map(|&e| e / sum))
  }
}

struct NegativeSharpe {
  mean: Array1<f64>,
  covariance: Array2<f64>,
  risk_free: f64,
}

impl CostFunction for NegativeSharpe {
  type Param = Vec<f64>;
  type Output = f64;

  fn cost(&self, x: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
    let w = softmax(x);
    let variance = w.dot(&self.covariance.dot(&w));
    if variance <= f64::EPSILON {
      return Ok(INFEASIBLE_COST);
    }

    let expected_return = w.dot(&self.mean);
    Ok(-((expected_return - self.risk_free) / variance.sqrt()))
  }
}

fn validate_simplex(weights: &Array1<f64>) -> Result<(), FrontierError> {
  let sum: f64 = weights.sum();
  if (sum - 1.0).abs() > SIMPLEX_TOLERANCE {
    return Err(FrontierError::OptimizationFailed {
      reason: format!("weights sum to {sum}, outside the simplex tolerance"),
    });
  }
  if weights
    .iter()
    .any(|&w| !(-SIMPLEX_TOLERANCE..=1.0 + SIMPLEX_TOLERANCE).contains(&w))
  {
    return Err(FrontierError::OptimizationFailed {
      reason: "a weight left the [0, 1] bounds".to_string(),
    });
  }
  Ok(())
}

/// Find the Sharpe-optimal long-only, fully-invested allocation.
///
/// Surfaces non-convergence as [`FrontierError::OptimizationFailed`] instead
/// of silently accepting the last iterate.
pub fn maximize_sharpe(
  mean: &Array1<f64>,
  covariance: &Array2<f64>,
  risk_free: f64,
  options: &SolverOptions,
) -> Result<OptimalPortfolio, FrontierError> {
  let n = mean.len();
  if n == 0 {
    return Err(FrontierError::invalid_input("empty mean vector"));
  }
  check_shapes(&Array1::from_elem(n, 1.0 / n as f64), mean, covariance)?;

  let cost = NegativeSharpe {
    mean: mean.clone(),
    covariance: covariance.clone(),
    risk_free,
  };

  // Chart origin = equal weights; unit steps along each coordinate span the
  // initial simplex.
  let x0 = vec![0.0; n];
  let mut simplex = Vec::with_capacity(n + 1);
  simplex.push(x0.clone());
  for i in 0..n {
    let mut point = x0.clone();
    point[i] = 1.0;
    simplex.push(point);
  }

  let solver = NelderMead::new(simplex)
    .with_sd_tolerance(options.sd_tolerance)
    .map_err(|e| FrontierError::OptimizationFailed {
      reason: e.to_string(),
    })?;

  let res = Executor::new(cost, solver)
    .configure(|state| state.max_iters(options.max_iters))
    .run()
    .map_err(|e| FrontierError::OptimizationFailed {
      reason: e.to_string(),
    })?;

  let converged = matches!(
    res.state.termination_status,
    TerminationStatus::Terminated(
      TerminationReason::SolverConverged | TerminationReason::TargetCostReached
    )
  );
  if !converged {
    return Err(FrontierError::OptimizationFailed {
      reason: format!(
        "no convergence after {} iteration(s), best objective {}",
        res.state.iter, res.state.best_cost
      ),
    });
  }

  let best_x = res
    .state
    .best_param
    .ok_or_else(|| FrontierError::OptimizationFailed {
      reason: "solver returned no parameters".to_string(),
    })?;
  let weights = softmax(&best_x);
  validate_simplex(&weights)?;

  tracing::debug!(
    iterations = res.state.iter,
    best_cost = res.state.best_cost,
    "sharpe maximization converged"
  );

  let perf = portfolio_performance(&weights, mean, covariance, risk_free)?;
  Ok(OptimalPortfolio {
    weights,
    expected_return: perf.expected_return,
    volatility: perf.volatility,
    sharpe: perf.sharpe,
    converged,
    iterations: res.state.iter,
  })
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;
  use ndarray::array;

  use super::*;

  #[test]
  fn softmax_of_origin_is_equal_weighting() {
    let w = softmax(&[0.0, 0.0, 0.0, 0.0]);
    for &wi in w.iter() {
      assert_relative_eq!(wi, 0.25, max_relative = 1e-15);
    }
  }

  #[test]
  fn optimum_favors_better_risk_adjusted_asset() {
    // Uncorrelated pair where asset 0 offers more excess return per unit of
    // variance: (0.10 - 0.02) / 0.04 = 2.0 vs (0.12 - 0.02) / 0.09 ≈ 1.11.
    // Analytic tangency weights are [9/14, 5/14].
    let mean = array![0.10, 0.12];
    let cov = array![[0.04, 0.0], [0.0, 0.09]];

    let result = maximize_sharpe(&mean, &cov, 0.02, &SolverOptions::default()).unwrap();

    assert!(result.converged);
    assert!(result.weights[0] > result.weights[1] + 0.1);
    assert_relative_eq!(result.weights.sum(), 1.0, max_relative = 1e-9);
    assert!(result.weights.iter().all(|&w| (0.0..=1.0).contains(&w)));
    assert_relative_eq!(result.weights[0], 9.0 / 14.0, max_relative = 1e-2);
  }

  #[test]
  fn equal_risk_adjusted_assets_split_evenly() {
    // Both assets offer the same excess return per unit of variance
    // ((0.10 - 0.02) / 0.04 = (0.20 - 0.02) / 0.09 = 2.0), so the analytic
    // tangency portfolio is exactly [0.5, 0.5].
    let mean = array![0.10, 0.20];
    let cov = array![[0.04, 0.0], [0.0, 0.09]];

    let result = maximize_sharpe(&mean, &cov, 0.02, &SolverOptions::default()).unwrap();

    assert!(result.converged);
    assert_relative_eq!(result.weights[0], 0.5, max_relative = 1e-2);
    assert_relative_eq!(result.weights[1], 0.5, max_relative = 1e-2);
  }

  #[test]
  fn five_asset_optimum_stays_on_the_simplex() {
    let mean = array![0.10, 0.12, 0.07, 0.15, 0.09];
    let cov = array![
      [0.040, 0.006, 0.000, 0.004, 0.002],
      [0.006, 0.090, 0.010, 0.000, 0.003],
      [0.000, 0.010, 0.030, 0.002, 0.001],
      [0.004, 0.000, 0.002, 0.160, 0.005],
      [0.002, 0.003, 0.001, 0.005, 0.050]
    ];

    let result = maximize_sharpe(&mean, &cov, 0.02, &SolverOptions::default()).unwrap();

    assert!(result.converged);
    assert_relative_eq!(result.weights.sum(), 1.0, max_relative = 1e-9);
    assert!(result.weights.iter().all(|&w| (0.0..=1.0).contains(&w)));
  }

  #[test]
  fn reported_metrics_come_from_the_final_weights() {
    let mean = array![0.10, 0.12];
    let cov = array![[0.04, 0.0], [0.0, 0.09]];

    let result = maximize_sharpe(&mean, &cov, 0.02, &SolverOptions::default()).unwrap();
    let check = portfolio_performance(&result.weights, &mean, &cov, 0.02).unwrap();

    assert_eq!(result.expected_return, check.expected_return);
    assert_eq!(result.volatility, check.volatility);
    assert_eq!(result.sharpe, check.sharpe);
  }

  #[test]
  fn zero_covariance_surfaces_as_error() {
    let mean = array![0.10, 0.12];
    let cov = array![[0.0, 0.0], [0.0, 0.0]];

    let err = maximize_sharpe(&mean, &cov, 0.02, &SolverOptions::default()).unwrap_err();
    assert!(matches!(
      err,
      FrontierError::ZeroVolatility | FrontierError::OptimizationFailed { .. }
    ));
  }

  #[test]
  fn empty_inputs_are_rejected() {
    let err = maximize_sharpe(
      &Array1::zeros(0),
      &Array2::zeros((0, 0)),
      0.02,
      &SolverOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, FrontierError::InvalidInput { .. }));
  }
}
