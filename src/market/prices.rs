//! # Price Table
//!
//! Adjusted close prices on a shared date grid.

use chrono::NaiveDate;
use ndarray::Array2;

use crate::error::FrontierError;

/// Adjusted close prices, rows following `dates` and columns following
/// `symbols`. Missing quotes are `NaN`; they are never filled, a row with a
/// gap simply drops out of the derived return series.
#[derive(Clone, Debug)]
pub struct PriceTable {
  symbols: Vec<String>,
  dates: Vec<NaiveDate>,
  prices: Array2<f64>,
}

impl PriceTable {
  /// Build a table, validating the shape and the date ordering.
  pub fn new(
    symbols: Vec<String>,
    dates: Vec<NaiveDate>,
    prices: Array2<f64>,
  ) -> Result<Self, FrontierError> {
    if prices.nrows() != dates.len() {
      return Err(FrontierError::invalid_input(format!(
        "price matrix has {} row(s) for {} date(s)",
        prices.nrows(),
        dates.len()
      )));
    }
    if prices.ncols() != symbols.len() {
      return Err(FrontierError::invalid_input(format!(
        "price matrix has {} column(s) for {} symbol(s)",
        prices.ncols(),
        symbols.len()
      )));
    }
    if dates.windows(2).any(|w| w[0] >= w[1]) {
      return Err(FrontierError::invalid_input(
        "dates must be strictly increasing",
      ));
    }

    Ok(Self {
      symbols,
      dates,
      prices,
    })
  }

  pub fn symbols(&self) -> &[String] {
    &self.symbols
  }

  pub fn dates(&self) -> &[NaiveDate] {
    &self.dates
  }

  pub fn prices(&self) -> &Array2<f64> {
    &self.prices
  }

  /// Number of dated price rows.
  pub fn n_rows(&self) -> usize {
    self.dates.len()
  }

  /// Number of instrument columns.
  pub fn n_instruments(&self) -> usize {
    self.symbols.len()
  }
}
