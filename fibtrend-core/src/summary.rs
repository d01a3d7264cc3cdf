//! Indicator histories for a visible window of candles, and min-max scaling
//! for plotting them on a shared axis.

use serde::{Deserialize, Serialize};

use crate::engine::Analysis;

/// ADX, slope and GOG over an index window, aligned with `timestamps`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorHistory {
    pub timestamps: Vec<i64>,
    pub adx: Vec<Option<f64>>,
    pub slope: Vec<Option<f64>>,
    pub gog: Vec<Option<f64>>,
}

impl IndicatorHistory {
    /// Histories for indices `start..=end`, clamped to the analysis.
    ///
    /// An empty analysis or `start > end` gives an empty history.
    pub fn from_window(analysis: &Analysis, start: usize, end: usize) -> Self {
        let Some(last) = analysis.len().checked_sub(1) else {
            return Self::default();
        };
        let end = end.min(last);
        if start > end {
            return Self::default();
        }

        let window = &analysis.candles[start..=end];
        Self {
            timestamps: window.iter().map(|c| c.timestamp()).collect(),
            adx: window.iter().map(|c| c.indicators.adx).collect(),
            slope: window.iter().map(|c| c.indicators.slope).collect(),
            gog: window.iter().map(|c| c.indicators.gog).collect(),
        }
    }

    /// The whole series.
    pub fn full(analysis: &Analysis) -> Self {
        Self::from_window(analysis, 0, usize::MAX)
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Every series scaled to [0, 1] independently.
    pub fn normalized(&self) -> Self {
        Self {
            timestamps: self.timestamps.clone(),
            adx: normalize(&self.adx),
            slope: normalize(&self.slope),
            gog: normalize(&self.gog),
        }
    }
}

/// Min-max scale the defined values of `series` to [0, 1].
///
/// With fewer than two defined values every entry maps to 0.5, undefined ones
/// included. Otherwise undefined entries stay undefined, and a constant series
/// maps its defined entries to 0.5.
pub fn normalize(series: &[Option<f64>]) -> Vec<Option<f64>> {
    let defined: Vec<f64> = series.iter().flatten().copied().collect();
    if defined.len() < 2 {
        return vec![Some(0.5); series.len()];
    }

    let min = defined.iter().copied().fold(f64::INFINITY, f64::min);
    let max = defined.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    series
        .iter()
        .map(|v| {
            v.map(|x| if span > 0.0 { (x - min) / span } else { 0.5 })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::analyze;
    use crate::indicators::{assert_approx, make_candles, DEFAULT_EPSILON};
    use crate::params::EngineConfig;

    fn sample_analysis() -> Analysis {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64 * 0.5).collect();
        analyze(&make_candles(&closes), &EngineConfig::default()).unwrap()
    }

    #[test]
    fn window_is_inclusive_and_clamped() {
        let analysis = sample_analysis();
        let history = IndicatorHistory::from_window(&analysis, 10, 19);
        assert_eq!(history.len(), 10);
        assert_eq!(history.timestamps[0], analysis.candles[10].timestamp());

        let clamped = IndicatorHistory::from_window(&analysis, 30, 500);
        assert_eq!(clamped.len(), 10);
        assert_eq!(IndicatorHistory::full(&analysis).len(), 40);
    }

    #[test]
    fn inverted_or_empty_window() {
        let analysis = sample_analysis();
        assert!(IndicatorHistory::from_window(&analysis, 20, 5).is_empty());
        assert!(IndicatorHistory::from_window(&analysis, 45, 50).is_empty());
        assert!(IndicatorHistory::from_window(&Analysis::default(), 0, 10).is_empty());
    }

    #[test]
    fn window_keeps_warmup_undefined() {
        let analysis = sample_analysis();
        let history = IndicatorHistory::from_window(&analysis, 0, 20);
        assert!(history.adx[..14].iter().all(Option::is_none));
        assert!(history.adx[14].is_some());
    }

    #[test]
    fn normalize_scales_defined_values() {
        let result = normalize(&[None, Some(2.0), Some(4.0), Some(3.0)]);
        assert_eq!(result[0], None);
        assert_approx(result[1].unwrap(), 0.0, DEFAULT_EPSILON);
        assert_approx(result[2].unwrap(), 1.0, DEFAULT_EPSILON);
        assert_approx(result[3].unwrap(), 0.5, DEFAULT_EPSILON);
    }

    #[test]
    fn normalize_degenerate_series() {
        assert_eq!(normalize(&[None, None, Some(7.0)]), vec![Some(0.5); 3]);
        assert_eq!(normalize(&[None, None]), vec![Some(0.5); 2]);
        // two defined values: undefined entries stay undefined
        assert_eq!(normalize(&[None, Some(3.0), Some(3.0)]), vec![None, Some(0.5), Some(0.5)]);
        assert_eq!(normalize(&[Some(3.0), Some(3.0)]), vec![Some(0.5), Some(0.5)]);
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn normalized_history_stays_in_unit_range() {
        let history = IndicatorHistory::full(&sample_analysis()).normalized();
        for v in history.adx.iter().chain(&history.slope).chain(&history.gog).flatten() {
            assert!((0.0..=1.0).contains(v));
        }
    }
}
