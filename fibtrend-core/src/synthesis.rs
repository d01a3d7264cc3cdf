//! Signal synthesis: combines trend strength, slope, acceleration and the
//! Fibonacci zone into BUY/SELL events.
//!
//! Each index is evaluated on its own. A BUY needs every one of:
//! ADX ≥ threshold, slope > 0, GOG > 0, an up-leg zone, close inside the zone.
//! A SELL mirrors it on a down-leg with slope < 0 and GOG < 0. BUY is checked
//! first, so an index yields at most one signal.

use crate::domain::{Candle, IndicatorRecord, Signal, SignalKind};
use crate::fibonacci::{FiboZone, Leg};
use crate::params::EngineConfig;

/// Evaluate the entry rules at a single candle.
///
/// Returns `None` when any indicator is still warming up, when no zone is in
/// effect, or when the conditions do not line up.
pub fn evaluate_at(
    candle: &Candle,
    record: &IndicatorRecord,
    zone: Option<&FiboZone>,
    config: &EngineConfig,
) -> Option<Signal> {
    let (adx, slope, gog) = (record.adx?, record.slope?, record.gog?);
    let zone = zone?;

    if adx < config.indicators.adx_threshold || !zone.contains(candle.close) {
        return None;
    }

    let kind = match zone.leg {
        Leg::Up if slope > 0.0 && gog > 0.0 => SignalKind::Buy,
        Leg::Down if slope < 0.0 && gog < 0.0 => SignalKind::Sell,
        _ => return None,
    };

    Some(build_signal(candle, kind, zone, adx, slope, gog, config))
}

fn build_signal(
    candle: &Candle,
    kind: SignalKind,
    zone: &FiboZone,
    adx: f64,
    slope: f64,
    gog: f64,
    config: &EngineConfig,
) -> Signal {
    let entry = candle.close;
    let range = zone.range();
    let dir = kind.sign();
    let buffer = config.targets.stop_buffer * range;
    let [m1, m2, m3] = config.targets.tp_multipliers;

    let sl = zone.anchor().price - dir * buffer;
    let (lo, hi) = zone.bounds();
    let leg = match zone.leg {
        Leg::Up => "up-leg",
        Leg::Down => "down-leg",
    };
    let direction = match kind {
        SignalKind::Buy => "rising",
        SignalKind::Sell => "falling",
    };

    Signal {
        timestamp: candle.timestamp,
        kind,
        price: entry,
        reason: format!(
            "ADX {adx:.1} >= {:.1}, slope {slope:.4} and GOG {gog:.4} {direction}, \
             close in {leg} retracement [{lo:.4}, {hi:.4}]",
            config.indicators.adx_threshold
        ),
        sl,
        tp1: entry + dir * range * m1,
        tp2: entry + dir * range * m2,
        tp3: entry + dir * range * m3,
    }
}

/// Evaluate every index and collect the signals in candle order.
///
/// `records` and `zones` must be index-aligned with `candles`.
pub fn synthesize(
    candles: &[Candle],
    records: &[IndicatorRecord],
    zones: &[Option<FiboZone>],
    config: &EngineConfig,
) -> Vec<Signal> {
    debug_assert_eq!(candles.len(), records.len());
    debug_assert_eq!(candles.len(), zones.len());

    candles
        .iter()
        .zip(records)
        .zip(zones)
        .filter_map(|((candle, record), zone)| {
            evaluate_at(candle, record, zone.as_ref(), config)
        })
        .collect()
}
