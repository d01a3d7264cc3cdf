//! Fibonacci retracement zones between the latest confirmed swing high and low.
//!
//! At each index the zone is built from the most recent swing high and the
//! most recent swing low that are already confirmed at that index, i.e. whose
//! look-ahead window ends at or before it. A swing is never used before the
//! candles that confirm it exist.
//!
//! Up-leg (swing high after swing low):
//!   levels = high - range * retr_low, high - range * retr_high
//! Down-leg (swing low after swing high):
//!   levels = low + range * retr_low, low + range * retr_high

use serde::{Deserialize, Serialize};

use crate::domain::Candle;
use crate::params::IndicatorParams;
use crate::swing::{SwingFlags, SwingPoint};

/// Direction of the most recent swing-to-swing move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Leg {
    Up,
    Down,
}

/// Retracement zone of one leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiboZone {
    pub leg: Leg,
    pub swing_high: SwingPoint,
    pub swing_low: SwingPoint,
    /// Level at `fibo_retr_low`, nearest the leg's end.
    pub shallow: f64,
    /// Level at `fibo_retr_high`, deeper into the leg.
    pub deep: f64,
}

impl FiboZone {
    /// Build the zone for a swing pair. `None` when the pair spans no price range.
    pub fn from_swings(
        swing_high: SwingPoint,
        swing_low: SwingPoint,
        retr_low: f64,
        retr_high: f64,
    ) -> Option<Self> {
        let range = (swing_high.price - swing_low.price).abs();
        if !(range.is_finite() && range > 0.0) {
            return None;
        }

        let (leg, shallow, deep) = if swing_high.index > swing_low.index {
            (
                Leg::Up,
                swing_high.price - range * retr_low,
                swing_high.price - range * retr_high,
            )
        } else {
            (
                Leg::Down,
                swing_low.price + range * retr_low,
                swing_low.price + range * retr_high,
            )
        };

        Some(Self {
            leg,
            swing_high,
            swing_low,
            shallow,
            deep,
        })
    }

    pub fn range(&self) -> f64 {
        (self.swing_high.price - self.swing_low.price).abs()
    }

    /// Lower and upper bound of the zone.
    pub fn bounds(&self) -> (f64, f64) {
        (self.shallow.min(self.deep), self.shallow.max(self.deep))
    }

    /// True when `price` lies inside the zone, bounds included.
    pub fn contains(&self, price: f64) -> bool {
        let (lo, hi) = self.bounds();
        price >= lo && price <= hi
    }

    /// Swing point the stop-loss is placed beyond.
    pub fn anchor(&self) -> SwingPoint {
        match self.leg {
            Leg::Up => self.swing_low,
            Leg::Down => self.swing_high,
        }
    }
}

/// Zone in effect at every index, given swing flags over the whole series.
pub fn zones_by_index(
    candles: &[Candle],
    flags: &SwingFlags,
    params: &IndicatorParams,
) -> Vec<Option<FiboZone>> {
    let n = candles.len();
    let mut zones = Vec::with_capacity(n);
    let mut last_high: Option<SwingPoint> = None;
    let mut last_low: Option<SwingPoint> = None;

    for i in 0..n {
        // A swing at j is confirmed once index j + right is reached.
        if let Some(j) = i.checked_sub(flags.right) {
            if flags.highs[j] {
                last_high = Some(SwingPoint {
                    index: j,
                    price: candles[j].high,
                });
            }
            if flags.lows[j] {
                last_low = Some(SwingPoint {
                    index: j,
                    price: candles[j].low,
                });
            }
        }

        let zone = match (last_high, last_low) {
            (Some(high), Some(low)) => {
                FiboZone::from_swings(high, low, params.fibo_retr_low, params.fibo_retr_high)
            }
            _ => None,
        };
        zones.push(zone);
    }

    zones
}
