//! Export: JSON, CSV and Markdown artifacts for an analysis report.
//!
//! - **JSON**: the full `AnalysisReport` with schema versioning, plus a
//!   signals-only document for downstream consumers
//! - **CSV**: one row per annotated candle, and one row per signal
//! - **Markdown**: a short human-readable summary
//!
//! Reports carry a `schema_version` field. Newer versions are rejected on load.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

use fibtrend_core::{AnnotatedCandle, Signal};

use crate::runner::{AnalysisReport, SCHEMA_VERSION};

/// Errors from writing or reading artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("unsupported schema version {found} (max supported: {max})")]
    UnsupportedSchema { found: u32, max: u32 },
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ExportError + '_ {
    move |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Millisecond timestamp as RFC 3339, or empty if out of range.
fn datetime(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ts)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}

fn opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.6}")).unwrap_or_default()
}

fn csv_into_string(wtr: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let data = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(data)?)
}

// ─── JSON ───────────────────────────────────────────────────────────

/// Serialize a report to pretty JSON.
pub fn export_json(report: &AnalysisReport) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Deserialize a report, rejecting schema versions newer than this build.
pub fn import_json(json: &str) -> Result<AnalysisReport, ExportError> {
    let report: AnalysisReport = serde_json::from_str(json)?;
    if report.schema_version > SCHEMA_VERSION {
        return Err(ExportError::UnsupportedSchema {
            found: report.schema_version,
            max: SCHEMA_VERSION,
        });
    }
    Ok(report)
}

/// Signals as a pretty JSON array, in the order given.
pub fn signals_json(signals: &[Signal]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(signals)?)
}

// ─── CSV ────────────────────────────────────────────────────────────

/// Annotated candles as CSV.
///
/// Columns: timestamp, datetime, open, high, low, close, volume, adx, slope,
/// gog, is_swing_high, is_swing_low. Warm-up indicator cells are empty.
pub fn annotated_csv(candles: &[AnnotatedCandle]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "timestamp",
        "datetime",
        "open",
        "high",
        "low",
        "close",
        "volume",
        "adx",
        "slope",
        "gog",
        "is_swing_high",
        "is_swing_low",
    ])?;

    for a in candles {
        let c = &a.candle;
        wtr.write_record([
            &c.timestamp.to_string(),
            &datetime(c.timestamp),
            &c.open.to_string(),
            &c.high.to_string(),
            &c.low.to_string(),
            &c.close.to_string(),
            &c.volume.to_string(),
            &opt(a.indicators.adx),
            &opt(a.indicators.slope),
            &opt(a.indicators.gog),
            &a.is_swing_high.to_string(),
            &a.is_swing_low.to_string(),
        ])?;
    }

    csv_into_string(wtr)
}

/// Signals as CSV.
///
/// Columns: timestamp, datetime, type, price, sl, tp1, tp2, tp3, reason
pub fn signals_csv(signals: &[Signal]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "timestamp",
        "datetime",
        "type",
        "price",
        "sl",
        "tp1",
        "tp2",
        "tp3",
        "reason",
    ])?;

    for s in signals {
        wtr.write_record([
            &s.timestamp.to_string(),
            &datetime(s.timestamp),
            &s.kind.to_string(),
            &format!("{:.6}", s.price),
            &format!("{:.6}", s.sl),
            &format!("{:.6}", s.tp1),
            &format!("{:.6}", s.tp2),
            &format!("{:.6}", s.tp3),
            &s.reason,
        ])?;
    }

    csv_into_string(wtr)
}

// ─── Files ──────────────────────────────────────────────────────────

/// Write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    std::fs::write(path, contents).map_err(io_error(path))
}

/// Save the full artifact set for one report.
///
/// Creates `{symbol}_{timestamp}/` under `output_dir` containing:
/// - `report.json`: the full report
/// - `candles.csv`: annotated candles
/// - `signals.csv`: signals, most recent first
/// - `summary.md`: the Markdown summary
///
/// Returns the created directory.
pub fn save_artifacts(report: &AnalysisReport, output_dir: &Path) -> Result<PathBuf, ExportError> {
    let dirname = format!(
        "{}_{}",
        report.symbol,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir).map_err(io_error(&run_dir))?;

    write_file(&run_dir.join("report.json"), &export_json(report)?)?;
    write_file(
        &run_dir.join("candles.csv"),
        &annotated_csv(&report.analysis.candles)?,
    )?;
    write_file(&run_dir.join("signals.csv"), &signals_csv(&report.signals)?)?;
    write_file(&run_dir.join("summary.md"), &markdown_summary(report))?;

    Ok(run_dir)
}

/// Load a report from an artifact directory.
pub fn load_artifacts(dir: &Path) -> Result<AnalysisReport, ExportError> {
    let path = dir.join("report.json");
    let json = std::fs::read_to_string(&path).map_err(io_error(&path))?;
    import_json(&json)
}

// ─── Markdown ───────────────────────────────────────────────────────

/// Human-readable summary of a report.
pub fn markdown_summary(report: &AnalysisReport) -> String {
    let mut md = String::new();
    let p = &report.config.indicators;

    md.push_str(&format!("# {} analysis\n\n", report.symbol));
    md.push_str(&format!(
        "- Candles: {} (warm-up {})\n",
        report.candle_count, report.warmup
    ));
    md.push_str(&format!("- Config: `{}`\n", &report.config_hash));
    md.push_str(&format!("- Dataset: `{}`\n\n", &report.dataset_hash));

    md.push_str("## Parameters\n\n");
    md.push_str("| Parameter | Value |\n| --- | ---: |\n");
    md.push_str(&format!("| ADX period | {} |\n", p.adx_period));
    md.push_str(&format!("| ADX threshold | {:.1} |\n", p.adx_threshold));
    md.push_str(&format!(
        "| Slope window / smoothing | {} / {} |\n",
        p.slope_window, p.slope_smooth
    ));
    md.push_str(&format!("| GOG span | {} |\n", p.gog_span));
    md.push_str(&format!(
        "| Swing window | {} / {} |\n",
        p.swing_left, p.swing_right
    ));
    md.push_str(&format!(
        "| Retracement | {:.3} to {:.3} |\n\n",
        p.fibo_retr_low, p.fibo_retr_high
    ));

    md.push_str("## Latest\n\n");
    match &report.latest {
        Some(rec) => {
            let cell = |v: Option<f64>| v.map(|v| format!("{v:.4}")).unwrap_or_else(|| "-".into());
            md.push_str(&format!(
                "ADX {} / slope {} / GOG {}\n\n",
                cell(rec.adx),
                cell(rec.slope),
                cell(rec.gog)
            ));
        }
        None => md.push_str("No candles.\n\n"),
    }
    if let Some(zone) = &report.latest_zone {
        let (lo, hi) = zone.bounds();
        md.push_str(&format!(
            "Zone: {:?} leg, [{lo:.4}, {hi:.4}]\n\n",
            zone.leg
        ));
    }

    md.push_str(&format!("## Signals ({})\n\n", report.signals.len()));
    if report.signals.is_empty() {
        md.push_str("None.\n");
        return md;
    }
    md.push_str("| Time | Type | Price | SL | TP1 | TP2 | TP3 |\n");
    md.push_str("| --- | --- | ---: | ---: | ---: | ---: | ---: |\n");
    for s in &report.signals {
        md.push_str(&format!(
            "| {} | {} | {:.4} | {:.4} | {:.4} | {:.4} | {:.4} |\n",
            datetime(s.timestamp),
            s.kind,
            s.price,
            s.sl,
            s.tp1,
            s.tp2,
            s.tp3
        ));
    }
    md
}
