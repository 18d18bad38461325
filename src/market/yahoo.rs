//! # Yahoo Finance Retrieval
//!
//! $$
//! \text{symbols} \times [t_0, t_1] \to \text{PriceTable}
//! $$
//!
//! Daily adjusted closes from Yahoo Finance, behind a bounded retry policy.
//! Exhausted retries are a hard [`FrontierError::DataFetch`]; the analysis
//! never proceeds on a stale or partial table.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::time::Duration;

use chrono::DateTime;
use chrono::NaiveDate;
use ndarray::Array2;
use time::OffsetDateTime;
use yahoo_finance_api::YahooConnector;

use super::prices::PriceTable;
use crate::error::FrontierError;

/// Bounded-attempt recovery for transient provider failures.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
  pub max_attempts: usize,
  pub delay: Duration,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      max_attempts: 3,
      delay: Duration::from_secs(5),
    }
  }
}

fn with_retry<T, E, F>(policy: &RetryPolicy, label: &str, mut op: F) -> Result<T, FrontierError>
where
  E: Display,
  F: FnMut() -> Result<T, E>,
{
  let attempts = policy.max_attempts.max(1);
  let mut last: Option<E> = None;
  for attempt in 1..=attempts {
    match op() {
      Ok(value) => return Ok(value),
      Err(e) => {
        tracing::warn!(label, attempt, error = %e, "download attempt failed");
        last = Some(e);
        if attempt < attempts {
          std::thread::sleep(policy.delay);
        }
      }
    }
  }

  Err(FrontierError::DataFetch {
    attempts,
    message: last
      .map(|e| e.to_string())
      .unwrap_or_else(|| "unknown provider failure".to_string()),
  })
}

fn day_start(date: NaiveDate) -> Result<OffsetDateTime, FrontierError> {
  let ts = date
    .and_hms_opt(0, 0, 0)
    .ok_or_else(|| FrontierError::invalid_input("invalid date"))?
    .and_utc()
    .timestamp();
  OffsetDateTime::from_unix_timestamp(ts)
    .map_err(|e| FrontierError::invalid_input(format!("date out of range: {e}")))
}

/// Download adjusted closes for `symbols` over the half-open range
/// `[start, end)` and assemble them on a shared date grid. Dates a symbol is
/// missing become `NaN` and drop out later in the returns engine.
pub fn fetch_price_table(
  symbols: &[&str],
  start: NaiveDate,
  end: NaiveDate,
  policy: &RetryPolicy,
) -> Result<PriceTable, FrontierError> {
  if symbols.is_empty() {
    return Err(FrontierError::invalid_input("no symbols requested"));
  }
  if start >= end {
    return Err(FrontierError::invalid_input("empty date range"));
  }

  let provider = YahooConnector::new().map_err(|e| FrontierError::DataFetch {
    attempts: 0,
    message: format!("provider setup: {e}"),
  })?;
  let start_odt = day_start(start)?;
  let end_odt = day_start(end)?;

  let mut per_symbol: Vec<BTreeMap<NaiveDate, f64>> = Vec::with_capacity(symbols.len());
  for &symbol in symbols {
    let response = with_retry(policy, symbol, || {
      provider.get_quote_history(symbol, start_odt, end_odt)
    })?;
    let quotes = response.quotes().map_err(|e| FrontierError::DataFetch {
      attempts: policy.max_attempts,
      message: format!("{symbol}: {e}"),
    })?;

    let mut closes = BTreeMap::new();
    for quote in quotes {
      let date = DateTime::from_timestamp(quote.timestamp as i64, 0)
        .ok_or_else(|| {
          FrontierError::invalid_input(format!(
            "{symbol}: invalid quote timestamp {}",
            quote.timestamp
          ))
        })?
        .date_naive();
      closes.insert(date, quote.adjclose);
    }
    tracing::debug!(symbol, quotes = closes.len(), "downloaded history");
    per_symbol.push(closes);
  }

  let dates: BTreeSet<NaiveDate> = per_symbol
    .iter()
    .flat_map(|closes| closes.keys().copied())
    .collect();
  let dates: Vec<NaiveDate> = dates.into_iter().collect();

  let mut prices = Array2::from_elem((dates.len(), symbols.len()), f64::NAN);
  for (j, closes) in per_symbol.iter().enumerate() {
    for (i, date) in dates.iter().enumerate() {
      if let Some(&price) = closes.get(date) {
        prices[[i, j]] = price;
      }
    }
  }

  PriceTable::new(symbols.iter().map(|s| s.to_string()).collect(), dates, prices)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn instant_policy(max_attempts: usize) -> RetryPolicy {
    RetryPolicy {
      max_attempts,
      delay: Duration::ZERO,
    }
  }

  #[test]
  fn retry_recovers_from_transient_failures() {
    let mut calls = 0;
    let result: Result<u32, FrontierError> = with_retry(&instant_policy(3), "X", || {
      calls += 1;
      if calls < 3 { Err("temporarily down") } else { Ok(7) }
    });

    assert_eq!(result.unwrap(), 7);
    assert_eq!(calls, 3);
  }

  #[test]
  fn exhausted_retries_are_a_hard_error() {
    let mut calls = 0;
    let result: Result<u32, FrontierError> = with_retry(&instant_policy(3), "X", || {
      calls += 1;
      Err::<u32, _>("still down")
    });

    assert_eq!(calls, 3);
    match result.unwrap_err() {
      FrontierError::DataFetch { attempts, message } => {
        assert_eq!(attempts, 3);
        assert_eq!(message, "still down");
      }
      other => panic!("unexpected error: {other}"),
    }
  }
}
