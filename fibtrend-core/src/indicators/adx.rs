//! ADX: Average Directional Index (Wilder).
//!
//! Steps:
//! 1. Compute +DM and -DM from consecutive candles
//! 2. Smooth +DM, -DM, and TR using Wilder smoothing (alpha = 1/period)
//! 3. +DI = 100 * smoothed(+DM) / smoothed(TR)
//! 4. -DI = 100 * smoothed(-DM) / smoothed(TR)
//! 5. DX = 100 * |+DI - -DI| / (+DI + -DI), 0 when either denominator is 0
//! 6. ADX = Wilder-smoothed DX, seeded with the first DX
//!
//! Lookback: period. The directional smoothing is seeded over candles
//! 1..=period, so DX and ADX both start at index `period`.

use crate::domain::Candle;
use crate::indicators::wilder::{true_range, wilder_smooth};
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
    name: String,
}

impl Adx {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ADX period must be >= 1");
        Self {
            period,
            name: format!("adx_{period}"),
        }
    }
}

/// +DM and -DM per candle. Index 0 has no previous candle and is NaN.
fn directional_movement(candles: &[Candle]) -> (Vec<f64>, Vec<f64>) {
    let n = candles.len();
    let mut plus_dm = vec![f64::NAN; n];
    let mut minus_dm = vec![f64::NAN; n];

    for i in 1..n {
        let up_move = candles[i].high - candles[i - 1].high;
        let down_move = candles[i - 1].low - candles[i].low;

        plus_dm[i] = if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        };
        minus_dm[i] = if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        };
    }

    (plus_dm, minus_dm)
}

impl Indicator for Adx {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let n = candles.len();
        if n < 2 {
            return vec![f64::NAN; n];
        }

        let (plus_dm, minus_dm) = directional_movement(candles);

        // TR[0] has no previous close; keep it out of the seed so TR and DM align.
        let mut tr = true_range(candles);
        tr[0] = f64::NAN;

        let smooth_tr = wilder_smooth(&tr, self.period, self.period);
        let smooth_plus_dm = wilder_smooth(&plus_dm, self.period, self.period);
        let smooth_minus_dm = wilder_smooth(&minus_dm, self.period, self.period);

        let mut dx = vec![f64::NAN; n];
        for i in 0..n {
            if smooth_tr[i].is_nan() || smooth_plus_dm[i].is_nan() || smooth_minus_dm[i].is_nan()
            {
                continue;
            }
            if smooth_tr[i] == 0.0 {
                dx[i] = 0.0;
                continue;
            }

            let plus_di = 100.0 * smooth_plus_dm[i] / smooth_tr[i];
            let minus_di = 100.0 * smooth_minus_dm[i] / smooth_tr[i];
            let di_sum = plus_di + minus_di;

            dx[i] = if di_sum == 0.0 {
                0.0
            } else {
                100.0 * (plus_di - minus_di).abs() / di_sum
            };
        }

        // ADX stays within [0, 100]; clamp away rounding drift.
        wilder_smooth(&dx, self.period, 1)
            .into_iter()
            .map(|v| if v.is_nan() { v } else { v.clamp(0.0, 100.0) })
            .collect()
    }
}
