//! # Frontier Engine
//!
//! $$
//! \text{prices} \to (\mu, \Sigma) \to (\mathbf{w}^\*, \{(R_k,\sigma_k,S_k)\})
//! $$
//!
//! High-level orchestration: one call from price table to report.

use prettytable::Table;
use prettytable::row;

use super::optimizer::SolverOptions;
use super::optimizer::maximize_sharpe;
use super::sampler::DEFAULT_SAMPLE_COUNT;
use super::sampler::sample_frontier;
use super::types::FrontierSamples;
use super::types::OptimalPortfolio;
use crate::error::FrontierError;
use crate::market::Moments;
use crate::market::PriceTable;
use crate::market::TRADING_DAYS_PER_YEAR;
use crate::market::annualized_moments;
use crate::portfolio::performance::DEFAULT_RISK_FREE_RATE;

/// Runtime configuration for [`FrontierEngine`].
#[derive(Clone, Debug)]
pub struct FrontierEngineConfig {
  /// Annual risk-free rate used in every Sharpe computation.
  pub risk_free: f64,
  /// Annualization multiplier for the return moments.
  pub periods_per_year: f64,
  /// Number of Monte Carlo portfolios for the frontier cloud.
  pub n_samples: usize,
  /// Seed for the sampler; `None` is non-reproducible.
  pub seed: Option<u64>,
  /// Solver budget and tolerance.
  pub solver: SolverOptions,
}

impl Default for FrontierEngineConfig {
  fn default() -> Self {
    Self {
      risk_free: DEFAULT_RISK_FREE_RATE,
      periods_per_year: TRADING_DAYS_PER_YEAR,
      n_samples: DEFAULT_SAMPLE_COUNT,
      seed: None,
      solver: SolverOptions::default(),
    }
  }
}

/// Everything the presentation layer needs from one analysis run.
#[derive(Clone, Debug)]
pub struct FrontierReport {
  /// Instrument symbols in weight order.
  pub symbols: Vec<String>,
  /// Annualized moments the run was based on.
  pub moments: Moments,
  /// Sharpe-optimal allocation.
  pub optimal: OptimalPortfolio,
  /// Monte Carlo cloud for the scatter plot.
  pub samples: FrontierSamples,
}

impl FrontierReport {
  /// Symbol-to-weight table for terminal display.
  pub fn weights_table(&self) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Symbol", "Optimal Weight"]);
    for (symbol, weight) in self.symbols.iter().zip(self.optimal.weights.iter()) {
      table.add_row(row![symbol, format!("{weight:.4}")]);
    }
    table
  }
}

/// Single entry point from a price table to an efficient-frontier report.
#[derive(Clone, Debug)]
pub struct FrontierEngine {
  config: FrontierEngineConfig,
}

impl FrontierEngine {
  pub fn new(config: FrontierEngineConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &FrontierEngineConfig {
    &self.config
  }

  /// Run returns → moments → optimize + sample.
  ///
  /// A covariance estimated from fewer than two return observations is
  /// refused rather than optimized.
  pub fn analyze(&self, table: &PriceTable) -> Result<FrontierReport, FrontierError> {
    tracing::info!(
      rows = table.n_rows(),
      instruments = table.n_instruments(),
      "computing annualized moments"
    );
    let moments = annualized_moments(table, self.config.periods_per_year)?;
    if moments.observations < 2 {
      return Err(FrontierError::DegenerateCovariance {
        observations: moments.observations,
      });
    }

    let optimal = maximize_sharpe(
      &moments.mean,
      &moments.covariance,
      self.config.risk_free,
      &self.config.solver,
    )?;
    tracing::info!(
      sharpe = optimal.sharpe,
      volatility = optimal.volatility,
      "sharpe-optimal allocation found"
    );

    let samples = sample_frontier(
      &moments.mean,
      &moments.covariance,
      self.config.risk_free,
      self.config.n_samples,
      self.config.seed,
    )?;

    Ok(FrontierReport {
      symbols: table.symbols().to_vec(),
      moments,
      optimal,
      samples,
    })
  }
}
