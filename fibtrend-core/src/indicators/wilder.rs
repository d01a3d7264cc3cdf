//! True Range and Wilder smoothing, shared by the directional-movement stage.
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|)
//! Wilder smoothing: EMA with alpha = 1/period.

use crate::domain::Candle;

/// Compute the True Range series from candles.
/// TR[0] = high[0] - low[0] (no previous close).
/// TR[t] = max(high[t]-low[t], |high[t]-close[t-1]|, |low[t]-close[t-1]|).
pub fn true_range(candles: &[Candle]) -> Vec<f64> {
    let n = candles.len();
    let mut tr = vec![f64::NAN; n];

    if n == 0 {
        return tr;
    }

    tr[0] = candles[0].high - candles[0].low;

    for i in 1..n {
        let h = candles[i].high;
        let l = candles[i].low;
        let pc = candles[i - 1].close;
        tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());
    }

    tr
}

/// Index of the first run of `len` consecutive non-NaN values.
fn first_valid_run(values: &[f64], len: usize) -> Option<usize> {
    let mut run = 0;
    for (i, v) in values.iter().enumerate() {
        if v.is_nan() {
            run = 0;
            continue;
        }
        run += 1;
        if run == len {
            return Some(i + 1 - len);
        }
    }
    None
}

/// Apply Wilder smoothing to a series. Alpha = 1/period.
///
/// The seed is the mean of the first `seed_len` consecutive valid values and
/// lands on the last index of that run; everything before it is NaN. Use
/// `seed_len = period` for the classic Wilder seed and `seed_len = 1` to start
/// from the first valid value. A NaN after the seed ends the series.
pub fn wilder_smooth(values: &[f64], period: usize, seed_len: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || seed_len == 0 || n < seed_len {
        return result;
    }

    let seed_start = match first_valid_run(values, seed_len) {
        Some(s) => s,
        None => return result,
    };
    let seed_end = seed_start + seed_len;

    let seed: f64 = values[seed_start..seed_end].iter().sum::<f64>() / seed_len as f64;
    result[seed_end - 1] = seed;

    let alpha = 1.0 / period as f64;
    let mut prev = seed;

    for i in seed_end..n {
        if values[i].is_nan() {
            break;
        }
        let smoothed = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = smoothed;
        prev = smoothed;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlc_candles, DEFAULT_EPSILON};

    #[test]
    fn true_range_basic() {
        let candles = make_ohlc_candles(&[
            (100.0, 105.0, 95.0, 102.0),  // TR = 105-95 = 10
            (102.0, 108.0, 100.0, 106.0), // TR = max(8, |108-102|, |100-102|) = 8
            (106.0, 107.0, 98.0, 99.0),   // TR = max(9, |107-106|, |98-106|) = 9
        ]);
        let tr = true_range(&candles);
        assert_approx(tr[0], 10.0, DEFAULT_EPSILON);
        assert_approx(tr[1], 8.0, DEFAULT_EPSILON);
        assert_approx(tr[2], 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn true_range_gap_up() {
        // prev close 100, current candle 108-115
        let candles = make_ohlc_candles(&[
            (98.0, 102.0, 97.0, 100.0),
            (110.0, 115.0, 108.0, 112.0), // TR = max(7, 15, 8) = 15
        ]);
        let tr = true_range(&candles);
        assert_approx(tr[1], 15.0, DEFAULT_EPSILON);
    }

    #[test]
    fn true_range_empty() {
        assert!(true_range(&[]).is_empty());
    }

    #[test]
    fn wilder_classic_seed() {
        // seed = mean(8, 9, 6) at index 3, then (1/3)*6 + (2/3)*seed
        let values = [f64::NAN, 8.0, 9.0, 6.0, 6.0];
        let result = wilder_smooth(&values, 3, 3);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert_approx(result[3], 23.0 / 3.0, DEFAULT_EPSILON);
        assert_approx(result[4], 64.0 / 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn wilder_first_value_seed() {
        let values = [f64::NAN, f64::NAN, 30.0, 0.0];
        let result = wilder_smooth(&values, 3, 1);
        assert!(result[1].is_nan());
        assert_approx(result[2], 30.0, DEFAULT_EPSILON);
        assert_approx(result[3], 20.0, DEFAULT_EPSILON);
    }

    #[test]
    fn wilder_skips_broken_runs_for_seed() {
        let values = [1.0, f64::NAN, 2.0, 4.0, 6.0];
        let result = wilder_smooth(&values, 2, 2);
        assert!(result[0].is_nan());
        assert!(result[2].is_nan());
        assert_approx(result[3], 3.0, DEFAULT_EPSILON);
        assert_approx(result[4], 4.5, DEFAULT_EPSILON);
    }

    #[test]
    fn wilder_nan_after_seed_ends_series() {
        let values = [2.0, 2.0, f64::NAN, 2.0];
        let result = wilder_smooth(&values, 2, 2);
        assert_approx(result[1], 2.0, DEFAULT_EPSILON);
        assert!(result[2].is_nan());
        assert!(result[3].is_nan());
    }

    #[test]
    fn wilder_too_short() {
        let result = wilder_smooth(&[1.0, 2.0], 3, 3);
        assert!(result.iter().all(|v| v.is_nan()));
    }
}
