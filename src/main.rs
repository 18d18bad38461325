use anyhow::Context;
use anyhow::Result;
use frontier_rs::market::PriceTable;
use frontier_rs::portfolio::FrontierEngine;
use frontier_rs::portfolio::FrontierEngineConfig;
use frontier_rs::visualization::efficient_frontier_plot;

fn main() -> Result<()> {
  let table = load_prices()?;
  let engine = FrontierEngine::new(FrontierEngineConfig::default());
  let report = engine.analyze(&table)?;

  println!("\nOptimal Portfolio Weights:");
  report.weights_table().printstd();
  println!(
    "Expected return: {:.4}  Volatility: {:.4}  Sharpe: {:.4}",
    report.optimal.expected_return, report.optimal.volatility, report.optimal.sharpe
  );

  let plot = efficient_frontier_plot(&report.samples, &report.optimal);
  plot.write_html("efficient_frontier.html");
  println!("Wrote efficient_frontier.html");

  Ok(())
}

/// Four years of daily closes for the demo basket.
#[cfg(feature = "yahoo")]
fn load_prices() -> Result<PriceTable> {
  use chrono::NaiveDate;
  use frontier_rs::market::yahoo::RetryPolicy;
  use frontier_rs::market::yahoo::fetch_price_table;

  let symbols = ["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA"];
  let start = NaiveDate::from_ymd_opt(2020, 1, 1).context("invalid start date")?;
  let end = NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid end date")?;

  Ok(fetch_price_table(
    &symbols,
    start,
    end,
    &RetryPolicy::default(),
  )?)
}

/// Offline stand-in for the download: a deterministic five-asset table with
/// per-asset drift and oscillation.
#[cfg(not(feature = "yahoo"))]
fn load_prices() -> Result<PriceTable> {
  use chrono::NaiveDate;
  use ndarray::Array2;

  let symbols = ["AAPL", "MSFT", "GOOGL", "AMZN", "TSLA"];
  let drifts: [f64; 5] = [0.0012, 0.0010, 0.0008, 0.0009, 0.0015];
  let wobble: [f64; 5] = [0.010, 0.008, 0.012, 0.011, 0.025];
  let phases: [f64; 5] = [0.7, 1.1, 1.7, 2.3, 3.1];

  let rows = 504;
  let start = NaiveDate::from_ymd_opt(2020, 1, 1).context("invalid start date")?;
  let dates: Vec<NaiveDate> = (0..rows)
    .map(|i| start + chrono::Duration::days(i as i64))
    .collect();

  let mut prices = Array2::zeros((rows, symbols.len()));
  for t in 0..rows {
    let x = t as f64;
    for j in 0..symbols.len() {
      prices[[t, j]] =
        100.0 * (1.0 + drifts[j]).powf(x) * (1.0 + wobble[j] * (x * phases[j]).sin());
    }
  }

  Ok(PriceTable::new(
    symbols.iter().map(|s| s.to_string()).collect(),
    dates,
    prices,
  )?)
}
