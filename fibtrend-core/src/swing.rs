//! Swing detection: local extrema confirmed by symmetric windows.
//!
//! Candle i is a swing high when its high is strictly above every high in
//! `[i - left, i - 1]` and `[i + 1, i + right]`; swing lows mirror this on
//! lows. Both windows must exist, so the first `left` and last `right`
//! candles are never flagged. Equal extremes do not qualify.
//!
//! Confirmation needs `right` future candles: the flags describe the series as
//! seen from its last candle. A swing at i becomes known at index `i + right`
//! (see [`SwingFlags::confirmed_at`]).

use serde::{Deserialize, Serialize};

use crate::domain::Candle;

/// Swing-high and swing-low flags, index-aligned with the candles.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SwingFlags {
    pub highs: Vec<bool>,
    pub lows: Vec<bool>,
    /// Candles of look-ahead needed to confirm a swing.
    pub right: usize,
}

impl SwingFlags {
    pub fn len(&self) -> usize {
        self.highs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highs.is_empty()
    }

    /// Index at which a swing at `index` is confirmed.
    pub fn confirmed_at(&self, index: usize) -> usize {
        index + self.right
    }

    pub fn high_indices(&self) -> Vec<usize> {
        flagged(&self.highs)
    }

    pub fn low_indices(&self) -> Vec<usize> {
        flagged(&self.lows)
    }
}

fn flagged(flags: &[bool]) -> Vec<usize> {
    flags
        .iter()
        .enumerate()
        .filter_map(|(i, &f)| f.then_some(i))
        .collect()
}

/// A confirmed swing point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwingPoint {
    pub index: usize,
    pub price: f64,
}

/// True when `values[i]` strictly beats every neighbour in the window under `beats`.
fn dominates(
    values: &[f64],
    i: usize,
    left: usize,
    right: usize,
    beats: fn(f64, f64) -> bool,
) -> bool {
    let pivot = values[i];
    values[i - left..i]
        .iter()
        .chain(&values[i + 1..=i + right])
        .all(|&other| beats(pivot, other))
}

/// Flag swing highs and lows over the whole series.
///
/// An outside candle that would qualify as both a swing high and a swing low
/// is ambiguous and gets neither flag.
pub fn detect_swings(candles: &[Candle], left: usize, right: usize) -> SwingFlags {
    let n = candles.len();
    let mut flags = SwingFlags {
        highs: vec![false; n],
        lows: vec![false; n],
        right,
    };

    if left == 0 || right == 0 || n < left + right + 1 {
        return flags;
    }

    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();

    for i in left..(n - right) {
        let is_high = dominates(&highs, i, left, right, |a, b| a > b);
        let is_low = dominates(&lows, i, left, right, |a, b| a < b);
        if is_high && is_low {
            continue;
        }
        flags.highs[i] = is_high;
        flags.lows[i] = is_low;
    }

    flags
}
