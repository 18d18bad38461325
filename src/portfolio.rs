//! # Portfolio
//!
//! $$
//! \sigma_p^2 = \mathbf{w}^\top \Sigma \mathbf{w}
//! $$
//!
//! Sharpe-ratio maximization over the long-only simplex and Monte Carlo
//! sampling of the attainable region.

pub mod engine;
pub mod optimizer;
pub mod performance;
pub mod sampler;
pub mod types;

pub use engine::FrontierEngine;
pub use engine::FrontierEngineConfig;
pub use engine::FrontierReport;
pub use optimizer::SolverOptions;
pub use optimizer::maximize_sharpe;
pub use performance::DEFAULT_RISK_FREE_RATE;
pub use performance::portfolio_performance;
pub use sampler::DEFAULT_SAMPLE_COUNT;
pub use sampler::sample_frontier;
pub use types::FrontierSamples;
pub use types::OptimalPortfolio;
pub use types::PortfolioSample;
