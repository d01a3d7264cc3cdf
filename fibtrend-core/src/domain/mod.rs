//! Domain types for FibTrend

pub mod annotated;
pub mod candle;
pub mod signal;

pub use annotated::{defined, AnnotatedCandle, IndicatorRecord};
pub use candle::{validate_series, Candle};
pub use signal::{Signal, SignalKind};
