//! Batch analysis of independent (symbol, candles, config) jobs.
//!
//! Jobs share nothing, so they run on the rayon pool. Each job gets its own
//! `Result`: one bad series does not stop the others.

use std::time::Instant;

use log::{info, warn};
use rayon::prelude::*;

use fibtrend_core::{Candle, EngineConfig, EngineError};

use crate::runner::{analyze_candles, AnalysisReport};

/// One series to analyse.
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub symbol: String,
    pub candles: Vec<Candle>,
    pub config: EngineConfig,
}

impl BatchJob {
    pub fn new(symbol: impl Into<String>, candles: Vec<Candle>, config: EngineConfig) -> Self {
        Self {
            symbol: symbol.into(),
            candles,
            config,
        }
    }
}

/// Result of one job.
#[derive(Debug)]
pub struct BatchOutcome {
    pub symbol: String,
    pub result: Result<AnalysisReport, EngineError>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Analyse every job, in parallel unless `parallel` is false.
///
/// Outcomes are returned in job order either way.
pub fn run_batch_with(jobs: &[BatchJob], parallel: bool) -> Vec<BatchOutcome> {
    let started = Instant::now();

    let run = |job: &BatchJob| {
        let result = analyze_candles(&job.symbol, &job.candles, &job.config);
        if let Err(e) = &result {
            warn!("{}: analysis failed: {e}", job.symbol);
        }
        BatchOutcome {
            symbol: job.symbol.clone(),
            result,
        }
    };

    let outcomes: Vec<BatchOutcome> = if parallel {
        jobs.par_iter().map(run).collect()
    } else {
        jobs.iter().map(run).collect()
    };

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    info!(
        "batch: {} jobs, {} failed, {:.1?}",
        outcomes.len(),
        failed,
        started.elapsed()
    );
    outcomes
}

/// Analyse every job on the rayon pool.
pub fn run_batch(jobs: &[BatchJob]) -> Vec<BatchOutcome> {
    run_batch_with(jobs, true)
}
