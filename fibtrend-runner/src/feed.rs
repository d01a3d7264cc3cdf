//! Candle feeds: decoding chart payloads and candle files.
//!
//! Three inputs are understood:
//! - **Chart JSON**: the market-data provider's v8 chart response
//!   (`chart.result[0]`), timestamps in seconds, prices as nullable arrays
//! - **Candle JSON**: a plain array of `{timestamp, open, high, low, close, volume}`
//! - **CSV**: header `timestamp,open,high,low,close,volume`
//!
//! Chart payloads are cleaned on the way in: candles with any missing or
//! non-finite OHLC value are dropped and a missing volume becomes 0. The other
//! two formats are taken as-is and left to the engine's validation.

use std::io::Read;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use fibtrend_core::Candle;

/// Errors from decoding a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("provider error {code}: {description}")]
    Provider { code: String, description: String },

    #[error("malformed chart payload: {0}")]
    Malformed(String),

    #[error("no usable candles in feed")]
    Empty,
}

// ── Chart payload ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<f64>>,
}

fn finite_at(values: &[Option<f64>], i: usize) -> Option<f64> {
    values.get(i).copied().flatten().filter(|v| v.is_finite())
}

/// Decode a chart response into candles with millisecond timestamps.
pub fn parse_chart_json(json: &str) -> Result<Vec<Candle>, FeedError> {
    let resp: ChartResponse = serde_json::from_str(json)?;

    let result = match (resp.chart.result, resp.chart.error) {
        (_, Some(err)) => {
            return Err(FeedError::Provider {
                code: err.code,
                description: err.description,
            })
        }
        (Some(result), None) => result,
        (None, None) => return Err(FeedError::Malformed("empty result with no error".into())),
    };

    let data = result
        .into_iter()
        .next()
        .ok_or_else(|| FeedError::Malformed("result array is empty".into()))?;

    let timestamps = data
        .timestamp
        .ok_or_else(|| FeedError::Malformed("no timestamps".into()))?;

    let quote = data
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| FeedError::Malformed("no quote data".into()))?;

    let mut candles = Vec::with_capacity(timestamps.len());
    let mut dropped = 0usize;

    for (i, &ts) in timestamps.iter().enumerate() {
        let ohlc = (
            finite_at(&quote.open, i),
            finite_at(&quote.high, i),
            finite_at(&quote.low, i),
            finite_at(&quote.close, i),
        );
        let (Some(open), Some(high), Some(low), Some(close)) = ohlc else {
            dropped += 1;
            continue;
        };
        let volume = finite_at(&quote.volume, i).unwrap_or(0.0);
        let Some(ms) = ts.checked_mul(1000) else {
            return Err(FeedError::Malformed(format!(
                "timestamp {ts} at index {i} is out of range"
            )));
        };
        candles.push(Candle::new(ms, open, high, low, close, volume));
    }

    debug!(
        "chart payload: {} candles kept, {} dropped",
        candles.len(),
        dropped
    );

    if candles.is_empty() {
        return Err(FeedError::Empty);
    }
    Ok(candles)
}

// ── Candle JSON / CSV ────────────────────────────────────────────────

/// Decode a JSON array of candles.
pub fn parse_candles_json(json: &str) -> Result<Vec<Candle>, FeedError> {
    Ok(serde_json::from_str(json)?)
}

/// Decode candles from CSV with a `timestamp,open,high,low,close,volume` header.
pub fn read_candles_csv<R: Read>(reader: R) -> Result<Vec<Candle>, FeedError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let candles = rdr.deserialize().collect::<Result<Vec<Candle>, _>>()?;
    Ok(candles)
}

/// Decode JSON that is either a chart response or a plain candle array.
pub fn parse_json_feed(json: &str) -> Result<Vec<Candle>, FeedError> {
    if json.trim_start().starts_with('[') {
        parse_candles_json(json)
    } else {
        parse_chart_json(json)
    }
}

/// Load candles from a file. `.csv` files are read as CSV, anything else as JSON.
pub fn load_candles(path: &Path) -> Result<Vec<Candle>, FeedError> {
    let io_err = |source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    };

    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let candles = if is_csv {
        read_candles_csv(std::fs::File::open(path).map_err(io_err)?)?
    } else {
        parse_json_feed(&std::fs::read_to_string(path).map_err(io_err)?)?
    };

    debug!("loaded {} candles from {}", candles.len(), path.display());
    Ok(candles)
}
