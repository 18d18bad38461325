//! # Market Data
//!
//! $$
//! r_t = \frac{P_t}{P_{t-1}} - 1
//! $$
//!
//! Price table container and the returns/moments engine.

pub mod prices;
pub mod returns;
#[cfg(feature = "yahoo")]
pub mod yahoo;

pub use prices::PriceTable;
pub use returns::Moments;
pub use returns::TRADING_DAYS_PER_YEAR;
pub use returns::annualized_moments;
pub use returns::moments;
pub use returns::simple_returns;
