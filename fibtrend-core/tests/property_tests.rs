//! Property tests for engine invariants.
//!
//! Uses proptest to verify, over random candle walks and parameter sets:
//! 1. Alignment: every output series has one entry per candle
//! 2. ADX bounds: within [0, 100] past warm-up, never undefined there
//! 3. Swing flags: never both set, never within the edge windows
//! 4. Signal shape: targets ordered away from entry, stop on the other side
//! 5. Determinism: identical inputs give identical output

use proptest::prelude::*;
use fibtrend_core::domain::Candle;
use fibtrend_core::fingerprint::analysis_hash;
use fibtrend_core::{analyze, EngineConfig, IndicatorParams, TradeTargets};

// ── Strategies (proptest) ────────────────────────────────────────────

/// Random walk of candles: each step moves the close by up to ±3%, and each
/// candle gets its own wick sizes.
fn arb_candles(max_len: usize) -> impl Strategy<Value = Vec<Candle>> {
    prop::collection::vec((-0.03..0.03_f64, 0.0..0.02_f64, 0.0..0.02_f64), 0..max_len).prop_map(
        |steps| {
            let mut close = 100.0;
            steps
                .into_iter()
                .enumerate()
                .map(|(i, (change, up_wick, down_wick))| {
                    let open = close;
                    close = (close * (1.0 + change) * 100.0).round() / 100.0;
                    let high = open.max(close) * (1.0 + up_wick);
                    let low = open.min(close) * (1.0 - down_wick);
                    Candle::new(
                        1_704_067_200_000 + i as i64 * 60_000,
                        open,
                        high,
                        low,
                        close,
                        1_000.0,
                    )
                })
                .collect()
        },
    )
}

fn arb_params() -> impl Strategy<Value = IndicatorParams> {
    (
        1usize..30,
        1.0..60.0_f64,
        2usize..30,
        1usize..10,
        1usize..10,
        1usize..6,
        1usize..6,
        0.0..0.5_f64,
        0.5..1.0_f64,
    )
        .prop_map(
            |(
                adx_period,
                adx_threshold,
                slope_window,
                slope_smooth,
                gog_span,
                swing_left,
                swing_right,
                fibo_retr_low,
                fibo_retr_high,
            )| IndicatorParams {
                adx_period,
                adx_threshold,
                slope_window,
                slope_smooth,
                gog_span,
                swing_left,
                swing_right,
                fibo_retr_low,
                fibo_retr_high,
            },
        )
}

fn arb_targets() -> impl Strategy<Value = TradeTargets> {
    (0.1..2.0_f64, 0.1..2.0_f64, 0.1..2.0_f64, 0.01..0.5_f64).prop_map(|(a, b, c, stop_buffer)| {
        TradeTargets {
            tp_multipliers: [a, a + b, a + b + c],
            stop_buffer,
        }
    })
}

fn arb_config() -> impl Strategy<Value = EngineConfig> {
    (arb_params(), arb_targets()).prop_map(|(p, t)| EngineConfig::new(p, t))
}

// ── 1 & 2. Alignment and ADX bounds ──────────────────────────────────

proptest! {
    #[test]
    fn output_is_aligned(candles in arb_candles(120), config in arb_config()) {
        let analysis = analyze(&candles, &config).unwrap();
        prop_assert_eq!(analysis.len(), candles.len());
        prop_assert_eq!(analysis.zones.len(), candles.len());
        for (annotated, candle) in analysis.candles.iter().zip(&candles) {
            prop_assert_eq!(&annotated.candle, candle);
        }
    }

    #[test]
    fn adx_is_bounded_past_warmup(candles in arb_candles(150), config in arb_config()) {
        let analysis = analyze(&candles, &config).unwrap();
        let period = config.indicators.adx_period;
        for (i, c) in analysis.candles.iter().enumerate() {
            match c.indicators.adx {
                Some(adx) => {
                    prop_assert!(i >= period, "adx defined at {} with period {}", i, period);
                    prop_assert!((0.0..=100.0).contains(&adx), "adx {} at {}", adx, i);
                }
                None => prop_assert!(i < period, "adx undefined at {} past warm-up", i),
            }
        }
    }
}

// ── 3. Swing flags ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn swing_flags_are_exclusive_and_clear_of_edges(
        candles in arb_candles(120),
        config in arb_config(),
    ) {
        let analysis = analyze(&candles, &config).unwrap();
        let n = analysis.len();
        let left = config.indicators.swing_left;
        let right = config.indicators.swing_right;
        for (i, c) in analysis.candles.iter().enumerate() {
            prop_assert!(!(c.is_swing_high && c.is_swing_low));
            if i < left || i + right >= n {
                prop_assert!(!c.is_swing_high && !c.is_swing_low, "edge swing at {}", i);
            }
        }
    }

    #[test]
    fn zones_only_use_confirmed_swings(candles in arb_candles(120), config in arb_config()) {
        let analysis = analyze(&candles, &config).unwrap();
        let right = config.indicators.swing_right;
        for (i, zone) in analysis.zones.iter().enumerate() {
            if let Some(zone) = zone {
                prop_assert!(zone.swing_high.index + right <= i);
                prop_assert!(zone.swing_low.index + right <= i);
                prop_assert!(zone.range() > 0.0);
            }
        }
    }
}

// ── 4. Signal shape ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn signals_are_well_formed(candles in arb_candles(200), config in arb_config()) {
        let analysis = analyze(&candles, &config).unwrap();
        let mut previous = None;
        for signal in &analysis.signals {
            prop_assert!(signal.is_well_formed(), "{:?}", signal);
            // at most one signal per candle, in candle order
            if let Some(prev) = previous {
                prop_assert!(signal.timestamp > prev);
            }
            previous = Some(signal.timestamp);

            let i = analysis.index_of(signal.timestamp).unwrap();
            prop_assert!(i >= analysis.warmup);
            prop_assert_eq!(signal.price, candles[i].close);
        }
    }
}

// ── 5. Determinism ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn analysis_is_deterministic(candles in arb_candles(120), config in arb_config()) {
        let a = analyze(&candles, &config).unwrap();
        let b = analyze(&candles, &config).unwrap();
        prop_assert_eq!(analysis_hash(&a), analysis_hash(&b));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn inverted_retracements_are_rejected(
        candles in arb_candles(40),
        low in 0.0..1.0_f64,
        gap in 0.0..0.5_f64,
    ) {
        let mut config = EngineConfig::default();
        config.indicators.fibo_retr_high = low;
        config.indicators.fibo_retr_low = (low + gap).min(1.0);
        prop_assert!(analyze(&candles, &config).is_err());
    }
}
