//! Errors that make the engine refuse a call.
//!
//! Too little data is not an error: it shows up as `None` indicator values and
//! an empty signal list.

use thiserror::Error;

use crate::params::ParamsError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    #[error("candle {index} is malformed: {reason}")]
    InvalidCandle { index: usize, reason: String },

    #[error("candle {index}: timestamp {current} is not after previous timestamp {previous}")]
    NonMonotonicTimestamp {
        index: usize,
        previous: i64,
        current: i64,
    },

    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] ParamsError),
}
