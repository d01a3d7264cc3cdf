//! FibTrend Core: indicator and signal engine for candle series.
//!
//! This crate is a pure function of (candles, configuration):
//! - Domain types (candles, indicator records, annotated candles, signals)
//! - ADX, smoothed regression slope and GOG indicators
//! - Swing detection with look-back and look-ahead windows
//! - Fibonacci retracement zones between confirmed swings
//! - BUY/SELL synthesis with stop-loss and three take-profit targets
//!
//! It performs no I/O and keeps no state between calls.

pub mod domain;
pub mod engine;
pub mod error;
pub mod fibonacci;
pub mod fingerprint;
pub mod indicators;
pub mod params;
pub mod summary;
pub mod swing;
pub mod synthesis;

pub use domain::{AnnotatedCandle, Candle, IndicatorRecord, Signal, SignalKind};
pub use engine::{analyze, Analysis};
pub use error::EngineError;
pub use fibonacci::{FiboZone, Leg};
pub use params::{EngineConfig, IndicatorParams, ParamsError, TradeTargets};
