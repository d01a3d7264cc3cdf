//! Per-candle engine output: indicator values and swing flags.

use serde::{Deserialize, Serialize};

use super::candle::Candle;

/// Indicator values for one candle.
///
/// `None` marks a warm-up index where the window has not filled yet. It is
/// never replaced by zero: a zero slope or GOG is a real reading.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorRecord {
    pub adx: Option<f64>,
    pub slope: Option<f64>,
    pub gog: Option<f64>,
}

impl IndicatorRecord {
    /// Build a record from raw indicator outputs, where NaN marks warm-up.
    pub fn from_raw(adx: f64, slope: f64, gog: f64) -> Self {
        Self {
            adx: defined(adx),
            slope: defined(slope),
            gog: defined(gog),
        }
    }

    /// True once every indicator has a value.
    pub fn is_complete(&self) -> bool {
        self.adx.is_some() && self.slope.is_some() && self.gog.is_some()
    }
}

/// Convert the NaN warm-up sentinel used inside indicator series into `None`.
pub fn defined(value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

/// A candle together with its indicator record and swing flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedCandle {
    #[serde(flatten)]
    pub candle: Candle,
    #[serde(flatten)]
    pub indicators: IndicatorRecord,
    pub is_swing_high: bool,
    pub is_swing_low: bool,
}

impl AnnotatedCandle {
    pub fn timestamp(&self) -> i64 {
        self.candle.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_becomes_none() {
        let rec = IndicatorRecord::from_raw(f64::NAN, 0.0, -0.5);
        assert_eq!(rec.adx, None);
        assert_eq!(rec.slope, Some(0.0));
        assert_eq!(rec.gog, Some(-0.5));
        assert!(!rec.is_complete());
    }

    #[test]
    fn complete_record() {
        let rec = IndicatorRecord::from_raw(25.0, 0.1, 0.01);
        assert!(rec.is_complete());
    }

    #[test]
    fn annotated_candle_flattens_fields() {
        let annotated = AnnotatedCandle {
            candle: Candle::new(1_000, 1.0, 2.0, 0.5, 1.5, 10.0),
            indicators: IndicatorRecord::from_raw(f64::NAN, 0.25, f64::NAN),
            is_swing_high: true,
            is_swing_low: false,
        };
        let value = serde_json::to_value(annotated).unwrap();
        assert_eq!(value["timestamp"], 1_000);
        assert_eq!(value["slope"], 0.25);
        assert!(value["adx"].is_null());
        assert_eq!(value["is_swing_high"], true);
    }
}
