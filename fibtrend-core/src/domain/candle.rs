//! Candle: the fundamental market data unit.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// OHLCV candle for a single symbol and interval.
///
/// `timestamp` is the candle open time in milliseconds since the Unix epoch.
/// A series handed to the engine must have strictly increasing timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns true if every OHLC price is finite.
    pub fn has_finite_prices(&self) -> bool {
        self.open.is_finite() && self.high.is_finite() && self.low.is_finite() && self.close.is_finite()
    }

    /// Reason this candle is malformed, if it is.
    fn defect(&self) -> Option<String> {
        for (field, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ] {
            if !value.is_finite() {
                return Some(format!("{field} price is not finite ({value})"));
            }
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Some(format!(
                "volume must be finite and >= 0 (got {})",
                self.volume
            ));
        }
        None
    }
}

/// Check a candle series before any computation.
///
/// Rejects non-finite prices, negative or non-finite volume, and timestamps
/// that are not strictly increasing. The first defect found is reported.
pub fn validate_series(candles: &[Candle]) -> Result<(), EngineError> {
    let mut previous: Option<i64> = None;
    for (index, candle) in candles.iter().enumerate() {
        if let Some(reason) = candle.defect() {
            return Err(EngineError::InvalidCandle { index, reason });
        }
        if let Some(prev) = previous {
            if candle.timestamp <= prev {
                return Err(EngineError::NonMonotonicTimestamp {
                    index,
                    previous: prev,
                    current: candle.timestamp,
                });
            }
        }
        previous = Some(candle.timestamp);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_candle(timestamp: i64) -> Candle {
        Candle::new(timestamp, 100.0, 105.0, 98.0, 103.0, 50_000.0)
    }

    #[test]
    fn valid_series_passes() {
        let candles = vec![sample_candle(1_000), sample_candle(2_000), sample_candle(3_000)];
        assert!(validate_series(&candles).is_ok());
    }

    #[test]
    fn empty_series_passes() {
        assert!(validate_series(&[]).is_ok());
    }

    #[test]
    fn rejects_nan_close() {
        let mut candles = vec![sample_candle(1_000), sample_candle(2_000)];
        candles[1].close = f64::NAN;
        let err = validate_series(&candles).unwrap_err();
        match err {
            EngineError::InvalidCandle { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("close"), "reason was: {reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_infinite_high() {
        let mut candles = vec![sample_candle(1_000)];
        candles[0].high = f64::INFINITY;
        assert!(matches!(
            validate_series(&candles),
            Err(EngineError::InvalidCandle { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_negative_volume() {
        let mut candles = vec![sample_candle(1_000)];
        candles[0].volume = -1.0;
        assert!(matches!(
            validate_series(&candles),
            Err(EngineError::InvalidCandle { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_timestamp() {
        let candles = vec![sample_candle(1_000), sample_candle(1_000)];
        assert_eq!(
            validate_series(&candles),
            Err(EngineError::NonMonotonicTimestamp {
                index: 1,
                previous: 1_000,
                current: 1_000,
            })
        );
    }

    #[test]
    fn rejects_decreasing_timestamp() {
        let candles = vec![sample_candle(2_000), sample_candle(3_000), sample_candle(2_500)];
        assert!(matches!(
            validate_series(&candles),
            Err(EngineError::NonMonotonicTimestamp { index: 2, .. })
        ));
    }

    #[test]
    fn candle_serialization_roundtrip() {
        let candle = sample_candle(1_700_000_000_000);
        let json = serde_json::to_string(&candle).unwrap();
        let deser: Candle = serde_json::from_str(&json).unwrap();
        assert_eq!(candle, deser);
    }
}
