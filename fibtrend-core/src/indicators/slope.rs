//! Trend slope: rolling least-squares regression of close on position.
//!
//! slope[t] = Σ (x - x̄)(y - ȳ) / Σ (x - x̄)² over the trailing `window`
//! closes, x = 0..window. The raw slope is then smoothed with a trailing SMA
//! of width `smooth`.
//! Lookback: window - 1 + smooth - 1.

use crate::domain::Candle;
use crate::indicators::sma::rolling_mean;
use crate::indicators::Indicator;

/// Raw rolling regression slope of `values` over `window` points.
///
/// NaN for the first `window - 1` indices and for any window containing NaN.
pub fn regression_slope(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if window < 2 || n < window {
        return result;
    }

    let w = window as f64;
    let x_mean = (w - 1.0) / 2.0;
    // Σ (x - x̄)² for x = 0..w
    let denom = w * (w * w - 1.0) / 12.0;

    for i in (window - 1)..n {
        let slice = &values[i + 1 - window..=i];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        // Σ (x - x̄) is zero, so shifting y by the first value leaves the slope
        // unchanged and makes a constant window exactly 0.
        let base = slice[0];
        let num: f64 = slice
            .iter()
            .enumerate()
            .map(|(j, &y)| (j as f64 - x_mean) * (y - base))
            .sum();
        result[i] = num / denom;
    }

    result
}

/// Smoothed regression slope of close prices.
#[derive(Debug, Clone)]
pub struct SmoothedSlope {
    window: usize,
    smooth: usize,
    name: String,
}

impl SmoothedSlope {
    pub fn new(window: usize, smooth: usize) -> Self {
        assert!(window >= 2, "slope window must be >= 2");
        assert!(smooth >= 1, "slope smoothing must be >= 1");
        Self {
            window,
            smooth,
            name: format!("slope_{window}_{smooth}"),
        }
    }

    /// Smoothed slope of an arbitrary series.
    pub fn compute_series(&self, values: &[f64]) -> Vec<f64> {
        rolling_mean(&regression_slope(values, self.window), self.smooth)
    }
}

impl Indicator for SmoothedSlope {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        (self.window - 1) + (self.smooth - 1)
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        self.compute_series(&closes)
    }
}
