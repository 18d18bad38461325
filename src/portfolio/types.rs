//! # Portfolio Types
//!
//! $$
//! S = \frac{\mathbb E[R_p] - r_f}{\sigma_p}
//! $$
//!
//! Shared result containers for the optimizer and the frontier sampler.

use ndarray::Array1;

/// One weight vector evaluated against the market moments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PortfolioSample {
  /// Annualized expected portfolio return `w · μ`.
  pub expected_return: f64,
  /// Annualized portfolio volatility `sqrt(wᵀ Σ w)`.
  pub volatility: f64,
  /// Sharpe ratio `(R − r_f) / σ`.
  pub sharpe: f64,
}

/// Parallel, draw-ordered series destined for scatter-plot rendering.
#[derive(Clone, Debug, Default)]
pub struct FrontierSamples {
  pub returns: Vec<f64>,
  pub volatilities: Vec<f64>,
  pub sharpes: Vec<f64>,
}

impl FrontierSamples {
  pub fn with_capacity(n: usize) -> Self {
    Self {
      returns: Vec::with_capacity(n),
      volatilities: Vec::with_capacity(n),
      sharpes: Vec::with_capacity(n),
    }
  }

  pub fn push(&mut self, sample: PortfolioSample) {
    self.returns.push(sample.expected_return);
    self.volatilities.push(sample.volatility);
    self.sharpes.push(sample.sharpe);
  }

  pub fn len(&self) -> usize {
    self.returns.len()
  }

  pub fn is_empty(&self) -> bool {
    self.returns.is_empty()
  }
}

/// Sharpe-optimal allocation plus solver diagnostics.
#[derive(Clone, Debug)]
pub struct OptimalPortfolio {
  /// Final weights on the simplex.
  pub weights: Array1<f64>,
  pub expected_return: f64,
  pub volatility: f64,
  pub sharpe: f64,
  /// Whether the solver terminated on its own tolerance.
  pub converged: bool,
  /// Iterations the solver spent.
  pub iterations: u64,
}
