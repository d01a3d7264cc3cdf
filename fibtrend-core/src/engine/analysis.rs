//! The result of one `analyze` call.

use serde::{Deserialize, Serialize};

use crate::domain::{AnnotatedCandle, IndicatorRecord, Signal};
use crate::fibonacci::FiboZone;

/// Annotated candles, the signals fired on them and the Fibonacci zone in
/// effect at every index.
///
/// `candles` and `zones` are index-aligned with the input series. `signals`
/// are in the order they occurred.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Analysis {
    pub candles: Vec<AnnotatedCandle>,
    pub signals: Vec<Signal>,
    pub zones: Vec<Option<FiboZone>>,
    /// Leading candles before every indicator is defined.
    pub warmup: usize,
}

impl Analysis {
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Indicator values of the most recent candle.
    pub fn latest(&self) -> Option<IndicatorRecord> {
        self.candles.last().map(|c| c.indicators)
    }

    /// Zone in effect at the most recent candle.
    pub fn latest_zone(&self) -> Option<&FiboZone> {
        self.zones.last().and_then(Option::as_ref)
    }

    /// Signals sorted by timestamp, most recent first.
    pub fn signals_newest_first(&self) -> Vec<Signal> {
        let mut signals = self.signals.clone();
        signals.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        signals
    }

    /// Index of the candle with the given timestamp.
    pub fn index_of(&self, timestamp: i64) -> Option<usize> {
        self.candles
            .binary_search_by_key(&timestamp, AnnotatedCandle::timestamp)
            .ok()
    }

    /// Swing high and swing low counts.
    pub fn swing_counts(&self) -> (usize, usize) {
        self.candles.iter().fold((0, 0), |(h, l), c| {
            (h + c.is_swing_high as usize, l + c.is_swing_low as usize)
        })
    }
}
