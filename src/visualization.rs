//! # Visualization
//!
//! $$
//! \{(\sigma_k, R_k, S_k)\} \mapsto \text{efficient-frontier scatter}
//! $$
//!
//! Builds the frontier chart: the Monte Carlo cloud colored by Sharpe ratio
//! with the optimal portfolio starred on top.

use plotly::Layout;
use plotly::Plot;
use plotly::Scatter;
use plotly::common::Marker;
use plotly::common::MarkerSymbol;
use plotly::common::Mode;
use plotly::common::color::Rgb;
use plotly::layout::Axis;

use crate::portfolio::FrontierSamples;
use crate::portfolio::OptimalPortfolio;

// Viridis-like three-stop ramp: indigo, teal, yellow.
const RAMP: [(u8, u8, u8); 3] = [(68, 1, 84), (33, 145, 140), (253, 231, 37)];

fn lerp(a: u8, b: u8, t: f64) -> u8 {
  (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8
}

/// Position of one Sharpe value inside the cloud's range, in [0, 1].
fn ramp_position(sharpe: f64, lo: f64, hi: f64) -> f64 {
  let span = hi - lo;
  if span > 1e-12 {
    ((sharpe - lo) / span).clamp(0.0, 1.0)
  } else {
    0.5
  }
}

/// Map one Sharpe value onto the ramp, given the cloud's range.
fn sharpe_color(sharpe: f64, lo: f64, hi: f64) -> Rgb {
  let t = ramp_position(sharpe, lo, hi);

  let (seg, local) = if t < 0.5 {
    (0, t * 2.0)
  } else {
    (1, (t - 0.5) * 2.0)
  };
  let (r0, g0, b0) = RAMP[seg];
  let (r1, g1, b1) = RAMP[seg + 1];
  Rgb::new(
    lerp(r0, r1, local),
    lerp(g0, g1, local),
    lerp(b0, b1, local),
  )
}

/// Assemble the efficient-frontier chart: volatility on x, expected return on
/// y, Sharpe ratio as marker color, optimum as a red star.
pub fn efficient_frontier_plot(samples: &FrontierSamples, optimal: &OptimalPortfolio) -> Plot {
  let lo = samples.sharpes.iter().cloned().fold(f64::INFINITY, f64::min);
  let hi = samples
    .sharpes
    .iter()
    .cloned()
    .fold(f64::NEG_INFINITY, f64::max);
  let colors: Vec<Rgb> = samples
    .sharpes
    .iter()
    .map(|&s| sharpe_color(s, lo, hi))
    .collect();

  let cloud = Scatter::new(samples.volatilities.clone(), samples.returns.clone())
    .name("Random portfolios")
    .mode(Mode::Markers)
    .marker(Marker::new().size(5).opacity(0.4).color_array(colors));

  let star = Scatter::new(vec![optimal.volatility], vec![optimal.expected_return])
    .name("Optimal portfolio")
    .mode(Mode::Markers)
    .marker(
      Marker::new()
        .symbol(MarkerSymbol::Star)
        .size(14)
        .color(Rgb::new(214, 39, 40)),
    );

  let mut plot = Plot::new();
  plot.add_trace(cloud);
  plot.add_trace(star);
  plot.set_layout(
    Layout::new()
      .title("Efficient Frontier of Portfolios")
      .x_axis(Axis::new().title("Volatility"))
      .y_axis(Axis::new().title("Expected Return")),
  );
  plot
}
