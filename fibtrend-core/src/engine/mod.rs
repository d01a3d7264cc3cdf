//! Analysis engine: runs every stage over a candle series.
//!
//! Stages, in order, all over the same index-aligned candles:
//!
//! 1. Directional trend: ADX
//! 2. Slope and GOG
//! 3. Swing detection
//! 4. Fibonacci zones from confirmed swings
//! 5. Signal synthesis
//!
//! The engine keeps no state between calls. Every call recomputes the whole
//! series from scratch.

pub mod analysis;
pub mod precompute;

pub use analysis::Analysis;
pub use precompute::{compute_warmup, precompute_indicators, IndicatorSeries};

use log::{debug, info};

use crate::domain::{validate_series, AnnotatedCandle, Candle};
use crate::error::EngineError;
use crate::fibonacci::zones_by_index;
use crate::indicators::indicators_for;
use crate::params::EngineConfig;
use crate::swing::detect_swings;
use crate::synthesis::synthesize;

/// Analyse a candle series.
///
/// The configuration is validated before the candles, and both before any
/// computation. A series too short for an indicator is not an error: its
/// values stay `None`, no zone forms and no signal fires.
pub fn analyze(candles: &[Candle], config: &EngineConfig) -> Result<Analysis, EngineError> {
    config.validate()?;
    validate_series(candles)?;

    let params = &config.indicators;
    let warmup = compute_warmup(&indicators_for(params));

    if candles.len() < 2 {
        debug!("{} candle(s), nothing to analyse", candles.len());
    }

    // Stages 1 and 2
    let records = precompute_indicators(candles, params).records();

    // Stage 3
    let flags = detect_swings(candles, params.swing_left, params.swing_right);
    debug!(
        "swings: {} highs, {} lows",
        flags.high_indices().len(),
        flags.low_indices().len()
    );

    // Stage 4
    let zones = zones_by_index(candles, &flags, params);
    debug!("zones: {} indices with a zone", zones.iter().flatten().count());

    // Stage 5
    let signals = synthesize(candles, &records, &zones, config);

    let annotated: Vec<AnnotatedCandle> = candles
        .iter()
        .zip(records)
        .enumerate()
        .map(|(i, (&candle, indicators))| AnnotatedCandle {
            candle,
            indicators,
            is_swing_high: flags.highs[i],
            is_swing_low: flags.lows[i],
        })
        .collect();

    info!(
        "analysed {} candles (warmup {}): {} signals",
        annotated.len(),
        warmup,
        signals.len()
    );

    Ok(Analysis {
        candles: annotated,
        signals,
        zones,
        warmup,
    })
}
