//! Analysis runner: wires together feeds, config and the engine.
//!
//! Two entry points:
//! - `run_analysis()`: loads candles and config from disk, then runs. Used by the CLI.
//! - `analyze_candles()`: takes candles already in memory. Used by batch runs.

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fibtrend_core::fingerprint::{config_hash, dataset_hash};
use fibtrend_core::{analyze, Analysis, Candle, EngineConfig, EngineError, FiboZone};
use fibtrend_core::{IndicatorRecord, Signal};

use crate::config::{load_or_default, ConfigError};
use crate::feed::{load_candles, FeedError};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Current schema version for persisted reports.
pub const SCHEMA_VERSION: u32 = 1;

/// What to analyse and how.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Label for logs and reports. Defaults to the input file stem.
    pub symbol: Option<String>,
    pub input: PathBuf,
    pub config_path: Option<PathBuf>,
}

/// Complete result of one analysis run, with provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub symbol: String,
    pub config: EngineConfig,
    pub config_hash: String,
    pub dataset_hash: String,
    pub candle_count: usize,
    pub warmup: usize,
    /// Indicator values of the last candle.
    pub latest: Option<IndicatorRecord>,
    /// Zone in effect at the last candle.
    pub latest_zone: Option<FiboZone>,
    /// Signals, most recent first.
    pub signals: Vec<Signal>,
    pub analysis: Analysis,
}

/// Default schema version for serde deserialization of older JSON without the field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl AnalysisReport {
    pub fn new(
        symbol: &str,
        candles: &[Candle],
        config: &EngineConfig,
        analysis: Analysis,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            symbol: symbol.to_string(),
            config: config.clone(),
            config_hash: config_hash(config).0,
            dataset_hash: dataset_hash(candles).0,
            candle_count: analysis.len(),
            warmup: analysis.warmup,
            latest: analysis.latest(),
            latest_zone: analysis.latest_zone().copied(),
            signals: analysis.signals_newest_first(),
            analysis,
        }
    }
}

/// Analyse candles already in memory.
pub fn analyze_candles(
    symbol: &str,
    candles: &[Candle],
    config: &EngineConfig,
) -> Result<AnalysisReport, EngineError> {
    let analysis = analyze(candles, config)?;
    info!(
        "{symbol}: {} candles, {} signals",
        analysis.len(),
        analysis.signals.len()
    );
    Ok(AnalysisReport::new(symbol, candles, config, analysis))
}

/// Load a candle file and a config, then analyse.
pub fn run_analysis(request: &AnalysisRequest) -> Result<AnalysisReport, RunError> {
    let config = load_or_default(request.config_path.as_deref())?;
    let candles = load_candles(&request.input)?;
    let symbol = request
        .symbol
        .clone()
        .unwrap_or_else(|| symbol_from_path(&request.input));
    Ok(analyze_candles(&symbol, &candles, &config)?)
}

/// File stem of `path`, or "UNKNOWN".
pub fn symbol_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| "UNKNOWN".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.2;
                Candle::new(
                    1_700_000_000_000 + i as i64 * 60_000,
                    close,
                    close + 0.5,
                    close - 0.5,
                    close,
                    10.0,
                )
            })
            .collect()
    }

    #[test]
    fn report_carries_provenance() {
        let candles = candles(80);
        let config = EngineConfig::default();
        let report = analyze_candles("BTC-USD", &candles, &config).unwrap();

        assert_eq!(report.schema_version, SCHEMA_VERSION);
        assert_eq!(report.symbol, "BTC-USD");
        assert_eq!(report.candle_count, 80);
        assert_eq!(report.config_hash, config_hash(&config).0);
        assert_eq!(report.dataset_hash, dataset_hash(&candles).0);
        assert_eq!(report.latest, report.analysis.latest());
        assert_eq!(report.signals.len(), report.analysis.signals.len());
    }

    #[test]
    fn engine_errors_propagate() {
        let mut bad = candles(10);
        bad[5].high = f64::INFINITY;
        let err = analyze_candles("X", &bad, &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidCandle { index: 5, .. }));
    }

    #[test]
    fn run_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("ETH-USD.json");
        std::fs::write(&input, serde_json::to_string(&candles(50)).unwrap()).unwrap();
        let config_path = dir.path().join("fibtrend.toml");
        std::fs::write(&config_path, "[indicators]\nadx_period = 10\n").unwrap();

        let report = run_analysis(&AnalysisRequest {
            symbol: None,
            input,
            config_path: Some(config_path),
        })
        .unwrap();

        assert_eq!(report.symbol, "ETH-USD");
        assert_eq!(report.config.indicators.adx_period, 10);
        assert_eq!(report.candle_count, 50);
    }

    #[test]
    fn report_json_roundtrip_keeps_schema() {
        let report = analyze_candles("BTC-USD", &candles(40), &EngineConfig::default()).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let back: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.schema_version, SCHEMA_VERSION);
        assert_eq!(back.candle_count, report.candle_count);
        assert_eq!(back.analysis.len(), report.analysis.len());
        assert_eq!(back.config, report.config);
    }

    #[test]
    fn symbol_defaults_to_file_stem() {
        assert_eq!(symbol_from_path(Path::new("/data/SOL-USD.csv")), "SOL-USD");
        assert_eq!(symbol_from_path(Path::new("/")), "UNKNOWN");
    }
}
