//! # Monte Carlo Frontier Sampler
//!
//! $$
//! \mathbf{w} \sim \mathrm{Dir}(\mathbf{1}),\qquad
//! (R_k, \sigma_k, S_k) = f(\mathbf{w}_k, \mu, \Sigma)
//! $$
//!
//! Random feasible portfolios for visualizing the attainable region. The
//! symmetric Dirichlet draw lands on the simplex exactly, so every candidate
//! satisfies the weight constraints by construction.

use ndarray::Array1;
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::Dirichlet;
use rand_distr::Distribution;

use super::performance::portfolio_performance;
use super::types::FrontierSamples;
use crate::error::FrontierError;

/// Default number of random portfolios.
pub const DEFAULT_SAMPLE_COUNT: usize = 10_000;

/// Uniform draws from the weight simplex.
pub(crate) struct WeightSampler {
  dirichlet: Option<Dirichlet<f64>>,
  n_assets: usize,
}

impl WeightSampler {
  pub(crate) fn new(n_assets: usize) -> Result<Self, FrontierError> {
    if n_assets == 0 {
      return Err(FrontierError::invalid_input("no instruments to sample"));
    }
    // Dirichlet needs at least two dimensions; one asset has a single
    // feasible point anyway.
    let dirichlet = if n_assets >= 2 {
      Some(
        Dirichlet::new_with_size(1.0, n_assets)
          .map_err(|e| FrontierError::invalid_input(format!("dirichlet setup: {e}")))?,
      )
    } else {
      None
    };

    Ok(Self { dirichlet, n_assets })
  }

  pub(crate) fn draw(&self, rng: &mut StdRng) -> Array1<f64> {
    match &self.dirichlet {
      Some(d) => Array1::from_vec(d.sample(rng)),
      None => Array1::from_elem(self.n_assets, 1.0),
    }
  }
}

/// Evaluate `n_samples` random feasible portfolios against the moments.
///
/// Draws whose volatility collapses to zero are excluded rather than reported
/// as undefined. A seed makes the run reproducible; `None` seeds from OS
/// entropy.
pub fn sample_frontier(
  mean: &Array1<f64>,
  covariance: &Array2<f64>,
  risk_free: f64,
  n_samples: usize,
  seed: Option<u64>,
) -> Result<FrontierSamples, FrontierError> {
  let sampler = WeightSampler::new(mean.len())?;
  if n_samples == 0 {
    return Ok(FrontierSamples::default());
  }

  let mut rng = match seed {
    Some(s) => StdRng::seed_from_u64(s),
    None => StdRng::from_entropy(),
  };

  let mut samples = FrontierSamples::with_capacity(n_samples);
  for _ in 0..n_samples {
    let weights = sampler.draw(&mut rng);
    match portfolio_performance(&weights, mean, covariance, risk_free) {
      Ok(sample) => samples.push(sample),
      Err(FrontierError::ZeroVolatility) => {
        tracing::debug!("dropping zero-volatility draw");
      }
      Err(e) => return Err(e),
    }
  }

  tracing::debug!(kept = samples.len(), requested = n_samples, "frontier sampling done");
  Ok(samples)
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;
  use ndarray::array;

  use super::*;

  #[test]
  fn draws_land_on_the_simplex() {
    let sampler = WeightSampler::new(4).unwrap();
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..200 {
      let w = sampler.draw(&mut rng);
      assert_relative_eq!(w.sum(), 1.0, max_relative = 1e-9);
      assert!(w.iter().all(|&wi| (0.0..=1.0).contains(&wi)));
    }
  }

  #[test]
  fn single_asset_draw_is_fully_invested() {
    let sampler = WeightSampler::new(1).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    assert_eq!(sampler.draw(&mut rng), array![1.0]);
  }

  #[test]
  fn seeded_runs_are_identical() {
    let mean = array![0.10, 0.12, 0.07];
    let cov = array![
      [0.04, 0.01, 0.00],
      [0.01, 0.09, 0.02],
      [0.00, 0.02, 0.16]
    ];

    let a = sample_frontier(&mean, &cov, 0.02, 500, Some(42)).unwrap();
    let b = sample_frontier(&mean, &cov, 0.02, 500, Some(42)).unwrap();

    assert_eq!(a.returns, b.returns);
    assert_eq!(a.volatilities, b.volatilities);
    assert_eq!(a.sharpes, b.sharpes);
  }

  #[test]
  fn sampled_metrics_stay_inside_convex_bounds() {
    // Convex combinations of the asset returns; diagonal covariance keeps
    // portfolio volatility below the largest single-asset volatility.
    let mean = array![0.10, 0.20];
    let cov = array![[0.04, 0.0], [0.0, 0.09]];

    let samples = sample_frontier(&mean, &cov, 0.02, 1000, Some(7)).unwrap();
    assert_eq!(samples.len(), 1000);
    for (&r, &v) in samples.returns.iter().zip(&samples.volatilities) {
      assert!((0.10 - 1e-9..=0.20 + 1e-9).contains(&r));
      assert!(v > 0.0 && v <= 0.30 + 1e-9);
    }
  }

  #[test]
  fn zero_samples_yield_empty_series() {
    let mean = array![0.10, 0.12];
    let cov = array![[0.04, 0.0], [0.0, 0.09]];

    let samples = sample_frontier(&mean, &cov, 0.02, 0, Some(1)).unwrap();
    assert!(samples.is_empty());
  }
}
