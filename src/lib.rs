//! # frontier-rs
//!
//! $$
//! \mathbf{w}^\* = \arg\max_{\mathbf{w}\in\Delta^{n-1}}
//! \frac{\mathbf{w}^\top\mu - r_f}{\sqrt{\mathbf{w}^\top\Sigma\mathbf{w}}}
//! $$
//!
//! Mean-variance portfolio optimization over the long-only simplex, plus
//! Monte Carlo sampling of the attainable region for efficient-frontier
//! visualization.

pub mod error;
pub mod market;
pub mod portfolio;
pub mod visualization;

pub use error::FrontierError;
