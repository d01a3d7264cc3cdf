//! Indicator implementations for the directional-trend and slope/momentum stages.
//!
//! Indicators are pure functions: candle history in, numeric series out, one
//! value per candle. Warm-up indices are `f64::NAN` inside these series; the
//! engine turns them into `None` when it assembles `IndicatorRecord`s.
//!
//! # Look-ahead guard
//! No indicator value at index t may depend on candles after t. Swing
//! detection is the only stage that looks ahead, and it lives in `swing`.

pub mod adx;
pub mod gog;
pub mod slope;
pub mod sma;
pub mod wilder;

pub use adx::Adx;
pub use gog::{growth_of_gradient, Gog};
pub use slope::{regression_slope, SmoothedSlope};
pub use sma::rolling_mean;
pub use wilder::{true_range, wilder_smooth};

use crate::domain::Candle;
use crate::params::IndicatorParams;

/// Trait for indicators.
///
/// Indicators take a full candle series and produce an output series of the
/// same length. The first `lookback()` values are `f64::NAN` (warm-up).
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "adx_14", "slope_14_5").
    fn name(&self) -> &str;

    /// Number of leading candles without a valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire candle series.
    fn compute(&self, candles: &[Candle]) -> Vec<f64>;
}

/// The indicators a parameter set drives, in stage order.
pub fn indicators_for(params: &IndicatorParams) -> Vec<Box<dyn Indicator>> {
    vec![
        Box::new(Adx::new(params.adx_period)),
        Box::new(SmoothedSlope::new(params.slope_window, params.slope_smooth)),
        Box::new(Gog::new(
            params.slope_window,
            params.slope_smooth,
            params.gog_span,
        )),
    ]
}

/// Create synthetic candles from close prices for testing.
///
/// open = prev_close (or close for the first candle),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000,
/// timestamps 5 minutes apart.
#[cfg(test)]
pub fn make_candles(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Candle::new(
                test_timestamp(i),
                open,
                open.max(close) + 1.0,
                open.min(close) - 1.0,
                close,
                1000.0,
            )
        })
        .collect()
}

/// Create candles from explicit (open, high, low, close) tuples for testing.
#[cfg(test)]
pub fn make_ohlc_candles(data: &[(f64, f64, f64, f64)]) -> Vec<Candle> {
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| {
            Candle::new(test_timestamp(i), open, high, low, close, 1000.0)
        })
        .collect()
}

#[cfg(test)]
fn test_timestamp(i: usize) -> i64 {
    1_704_067_200_000 + i as i64 * 300_000
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
