//! Indicator precomputation.
//!
//! All indicator series are computed once, up front, over the whole candle
//! history and then merged into per-candle `IndicatorRecord`s.

use log::debug;

use crate::domain::{Candle, IndicatorRecord};
use crate::indicators::{growth_of_gradient, Adx, Indicator, SmoothedSlope};
use crate::params::IndicatorParams;

/// Raw indicator series, index-aligned with the candles. NaN marks warm-up.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub adx: Vec<f64>,
    pub slope: Vec<f64>,
    pub gog: Vec<f64>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.adx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adx.is_empty()
    }

    /// Merge the three series into per-candle records.
    pub fn records(&self) -> Vec<IndicatorRecord> {
        self.adx
            .iter()
            .zip(&self.slope)
            .zip(&self.gog)
            .map(|((&adx, &slope), &gog)| IndicatorRecord::from_raw(adx, slope, gog))
            .collect()
    }
}

/// Compute ADX, smoothed slope and GOG for a candle series.
///
/// GOG is derived from the slope series already computed here rather than
/// recomputing the regression.
pub fn precompute_indicators(candles: &[Candle], params: &IndicatorParams) -> IndicatorSeries {
    let adx_indicator = Adx::new(params.adx_period);
    let adx = adx_indicator.compute(candles);
    debug!(
        "{}: {} values, {} defined",
        adx_indicator.name(),
        adx.len(),
        count_defined(&adx)
    );

    let slope_indicator = SmoothedSlope::new(params.slope_window, params.slope_smooth);
    let slope = slope_indicator.compute(candles);
    debug!(
        "{}: {} values, {} defined",
        slope_indicator.name(),
        slope.len(),
        count_defined(&slope)
    );

    let gog = growth_of_gradient(&slope, params.gog_span);
    debug!("gog_{}: {} defined", params.gog_span, count_defined(&gog));

    debug_assert_eq!(adx.len(), candles.len());
    debug_assert_eq!(slope.len(), candles.len());
    debug_assert_eq!(gog.len(), candles.len());

    IndicatorSeries { adx, slope, gog }
}

fn count_defined(series: &[f64]) -> usize {
    series.iter().filter(|v| !v.is_nan()).count()
}

/// Compute the warmup length from a set of indicators.
///
/// The warmup is the maximum lookback across all indicators. No signal can
/// fire during the warmup period.
pub fn compute_warmup(indicators: &[Box<dyn Indicator>]) -> usize {
    indicators.iter().map(|i| i.lookback()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{indicators_for, make_candles, Gog};

    fn wavy(n: usize) -> Vec<Candle> {
        let closes: Vec<f64> = (0..n)
            .map(|i| 100.0 + (i as f64 * 0.4).sin() * 4.0 + i as f64 * 0.1)
            .collect();
        make_candles(&closes)
    }

    #[test]
    fn series_are_index_aligned() {
        let candles = wavy(40);
        let series = precompute_indicators(&candles, &IndicatorParams::default());
        assert_eq!(series.len(), 40);
        assert_eq!(series.slope.len(), 40);
        assert_eq!(series.gog.len(), 40);
        assert_eq!(series.records().len(), 40);
    }

    #[test]
    fn gog_matches_standalone_indicator() {
        let candles = wavy(60);
        let params = IndicatorParams::default();
        let series = precompute_indicators(&candles, &params);
        let standalone =
            Gog::new(params.slope_window, params.slope_smooth, params.gog_span).compute(&candles);
        for (a, b) in series.gog.iter().zip(&standalone) {
            assert!((a.is_nan() && b.is_nan()) || a == b);
        }
    }

    #[test]
    fn records_are_complete_after_warmup() {
        let candles = wavy(60);
        let params = IndicatorParams::default();
        let warmup = compute_warmup(&indicators_for(&params));
        let records = precompute_indicators(&candles, &params).records();
        assert!(!records[warmup - 1].is_complete());
        assert!(records[warmup..].iter().all(|r| r.is_complete()));
    }

    #[test]
    fn warmup_is_max_lookback() {
        let params = IndicatorParams::default();
        // adx 14, slope 13 + 4, gog 17 + 5
        assert_eq!(compute_warmup(&indicators_for(&params)), 22);
    }

    #[test]
    fn warmup_follows_adx_when_it_dominates() {
        let params = IndicatorParams {
            adx_period: 40,
            ..Default::default()
        };
        assert_eq!(compute_warmup(&indicators_for(&params)), 40);
    }

    #[test]
    fn warmup_empty() {
        assert_eq!(compute_warmup(&[]), 0);
    }

    #[test]
    fn empty_input() {
        let series = precompute_indicators(&[], &IndicatorParams::default());
        assert!(series.is_empty());
        assert!(series.records().is_empty());
    }
}
