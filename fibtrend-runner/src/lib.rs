//! FibTrend Runner: analysis orchestration on top of `fibtrend-core`.
//!
//! This crate provides:
//! - TOML config files for indicator parameters and trade targets
//! - Candle feeds from chart JSON, candle JSON and CSV
//! - Single and batch analysis runs with provenance hashes
//! - Publish-on-completion slots holding the latest good result per symbol
//! - JSON, CSV and Markdown export

pub mod batch;
pub mod config;
pub mod export;
pub mod feed;
pub mod publish;
pub mod runner;

pub use batch::{run_batch, run_batch_with, BatchJob, BatchOutcome};
pub use config::{load_config, load_or_default, parse_config, to_toml, ConfigError};
pub use export::{annotated_csv, signals_csv, signals_json, ExportError};
pub use feed::{load_candles, parse_chart_json, FeedError};
pub use publish::{AnalysisSlot, SlotBoard};
pub use runner::{
    analyze_candles, run_analysis, AnalysisReport, AnalysisRequest, RunError, SCHEMA_VERSION,
};
