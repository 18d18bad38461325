//! # Errors
//!
//! $$
//! \text{stage failures: data} \to \text{moments} \to \text{optimize/sample}
//! $$
//!
//! Error taxonomy for the analysis pipeline. Fatal variants abort the run;
//! [`FrontierError::ZeroVolatility`] is recoverable inside the sampler, where
//! the offending draw is dropped.

use thiserror::Error;

/// Errors produced across the analysis pipeline.
#[derive(Debug, Error)]
pub enum FrontierError {
  /// Price history too short to compute a single return observation.
  #[error("insufficient price history: {rows} row(s), need at least 2")]
  InsufficientData { rows: usize },

  /// Portfolio variance evaluated to zero, so the Sharpe ratio is undefined.
  #[error("portfolio volatility is zero, Sharpe ratio undefined")]
  ZeroVolatility,

  /// The solver did not converge or left the weight simplex.
  #[error("optimization failed: {reason}")]
  OptimizationFailed { reason: String },

  /// Too few return observations to estimate a usable covariance matrix.
  #[error("covariance estimated from {observations} observation(s) is rank-deficient")]
  DegenerateCovariance { observations: usize },

  /// The market-data provider kept failing after the retry budget ran out.
  #[error("price download failed after {attempts} attempt(s): {message}")]
  DataFetch { attempts: usize, message: String },

  /// Malformed caller input, e.g. mismatched dimensions or unsorted dates.
  #[error("invalid input: {context}")]
  InvalidInput { context: String },
}

impl FrontierError {
  pub(crate) fn invalid_input(context: impl Into<String>) -> Self {
    FrontierError::InvalidInput {
      context: context.into(),
    }
  }
}
