//! FibTrend CLI: analyze candle files and export signals.
//!
//! Commands:
//! - `analyze`: run the engine on one candle file and print the latest state
//! - `batch`: analyze several files in parallel with one config
//! - `defaults`: print the default config as TOML
//! - `show`: print the summary of a saved report

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use fibtrend_core::EngineConfig;
use fibtrend_runner::export::{
    annotated_csv, load_artifacts, markdown_summary, save_artifacts, signals_json, write_file,
};
use fibtrend_runner::runner::symbol_from_path;
use fibtrend_runner::{
    load_candles, load_or_default, run_analysis, run_batch, to_toml, AnalysisReport,
    AnalysisRequest, BatchJob,
};

#[derive(Parser)]
#[command(
    name = "fibtrend",
    about = "FibTrend CLI: ADX, slope and Fibonacci retracement signals for crypto candles"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one candle file (chart JSON, candle JSON or CSV).
    Analyze {
        /// Candle file.
        input: PathBuf,

        /// Path to a TOML config file. Defaults are used when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Symbol label. Defaults to the input file stem.
        #[arg(long)]
        symbol: Option<String>,

        /// Write annotated candles as CSV to this path.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write signals (most recent first) as JSON to this path.
        #[arg(long)]
        signals_json: Option<PathBuf>,

        /// Print the full report as JSON instead of the summary.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Save the full artifact set under this directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Analyze several candle files with the same config.
    Batch {
        /// Candle files. The symbol of each is its file stem.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the default config as TOML.
    Defaults,
    /// Print the summary of a saved artifact directory.
    Show {
        /// Directory created by `analyze --output-dir`.
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            config,
            symbol,
            csv,
            signals_json,
            json,
            output_dir,
        } => run_analyze_cmd(input, config, symbol, csv, signals_json, json, output_dir),
        Commands::Batch { inputs, config } => run_batch_cmd(inputs, config),
        Commands::Defaults => {
            print!("{}", to_toml(&EngineConfig::default())?);
            Ok(())
        }
        Commands::Show { dir } => {
            let report = load_artifacts(&dir)?;
            print!("{}", markdown_summary(&report));
            Ok(())
        }
    }
}

fn run_analyze_cmd(
    input: PathBuf,
    config_path: Option<PathBuf>,
    symbol: Option<String>,
    csv_path: Option<PathBuf>,
    signals_path: Option<PathBuf>,
    json: bool,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let report = run_analysis(&AnalysisRequest {
        symbol,
        input: input.clone(),
        config_path,
    })
    .with_context(|| format!("analysis of {} failed", input.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    if let Some(path) = csv_path {
        write_file(&path, &annotated_csv(&report.analysis.candles)?)?;
        info!("annotated candles written to {}", path.display());
    }
    if let Some(path) = signals_path {
        write_file(&path, &signals_json(&report.signals)?)?;
        info!("signals written to {}", path.display());
    }
    if let Some(dir) = output_dir {
        let run_dir = save_artifacts(&report, &dir)?;
        println!("Artifacts saved to: {}", run_dir.display());
    }
    Ok(())
}

fn run_batch_cmd(inputs: Vec<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_or_default(config_path.as_deref())?;

    let mut jobs = Vec::with_capacity(inputs.len());
    for path in &inputs {
        let candles =
            load_candles(path).with_context(|| format!("failed to load {}", path.display()))?;
        jobs.push(BatchJob::new(symbol_from_path(path), candles, config.clone()));
    }

    let outcomes = run_batch(&jobs);

    println!();
    println!(
        "{:<14} {:>8} {:>8} {:>9} {:>10} {:>6}",
        "Symbol", "Candles", "ADX", "Slope", "GOG", "Last"
    );
    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) => {
                let rec = report.latest.unwrap_or_default();
                let last = report
                    .signals
                    .first()
                    .map(|s| s.kind.to_string())
                    .unwrap_or_else(|| "-".into());
                println!(
                    "{:<14} {:>8} {:>8} {:>9} {:>10} {:>6}",
                    outcome.symbol,
                    report.candle_count,
                    fmt_value(rec.adx, 2),
                    fmt_value(rec.slope, 4),
                    fmt_value(rec.gog, 5),
                    last
                );
            }
            Err(e) => {
                failed += 1;
                println!("{:<14} ERROR: {e}", outcome.symbol);
            }
        }
    }

    if failed == outcomes.len() {
        bail!("all {failed} analyses failed");
    }
    Ok(())
}

fn fmt_value(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{v:.decimals$}"))
        .unwrap_or_else(|| "-".into())
}

fn print_summary(report: &AnalysisReport) {
    println!();
    println!("=== Analysis ===");
    println!("Symbol:         {}", report.symbol);
    println!(
        "Candles:        {} ({} warmup)",
        report.candle_count, report.warmup
    );
    println!("Config:         {}", report.config_hash);
    println!("Dataset:        {}", report.dataset_hash);
    println!();
    println!("--- Latest ---");
    let rec = report.latest.unwrap_or_default();
    println!("ADX:            {}", fmt_value(rec.adx, 2));
    println!("Slope:          {}", fmt_value(rec.slope, 4));
    println!("GOG:            {}", fmt_value(rec.gog, 5));
    match &report.latest_zone {
        Some(zone) => {
            let (lo, hi) = zone.bounds();
            println!("Zone:           {:?} leg [{lo:.4}, {hi:.4}]", zone.leg);
        }
        None => println!("Zone:           -"),
    }
    println!();
    println!("--- Signals ({}) ---", report.signals.len());
    for s in report.signals.iter().take(10) {
        println!(
            "{:>4} @ {:.4}  SL {:.4}  TP {:.4} / {:.4} / {:.4}  ({})",
            s.kind, s.price, s.sl, s.tp1, s.tp2, s.tp3, s.reason
        );
    }
    if report.signals.len() > 10 {
        println!("... {} older", report.signals.len() - 10);
    }
}
