//! GOG: growth of gradient.
//!
//! GOG[t] = slope[t] - slope[t-span] on the smoothed regression slope.
//! Positive GOG means the slope is increasing, whatever its sign.
//! Lookback: slope lookback + span.

use crate::domain::Candle;
use crate::indicators::slope::SmoothedSlope;
use crate::indicators::Indicator;

/// Discrete difference of `series` over `span` indices.
pub fn growth_of_gradient(series: &[f64], span: usize) -> Vec<f64> {
    let n = series.len();
    let mut result = vec![f64::NAN; n];

    if span == 0 {
        return result;
    }

    for i in span..n {
        let curr = series[i];
        let prev = series[i - span];
        if !curr.is_nan() && !prev.is_nan() {
            result[i] = curr - prev;
        }
    }

    result
}

#[derive(Debug, Clone)]
pub struct Gog {
    slope: SmoothedSlope,
    span: usize,
    name: String,
}

impl Gog {
    pub fn new(window: usize, smooth: usize, span: usize) -> Self {
        assert!(span >= 1, "GOG span must be >= 1");
        Self {
            slope: SmoothedSlope::new(window, smooth),
            span,
            name: format!("gog_{window}_{smooth}_{span}"),
        }
    }
}

impl Indicator for Gog {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.slope.lookback() + self.span
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        growth_of_gradient(&self.slope.compute(candles), self.span)
    }
}
