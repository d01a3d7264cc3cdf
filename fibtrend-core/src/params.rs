//! Engine configuration.
//!
//! One immutable `EngineConfig` is handed to every `analyze` call. Nothing is
//! read from process-wide state, so two calls with different configs never
//! interfere.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Indicator and signal parameters, as exposed by the dashboard's parameter panel.
///
/// Field aliases accept the panel's camelCase names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    #[serde(alias = "adxPeriod")]
    pub adx_period: usize,
    #[serde(alias = "adxThreshold")]
    pub adx_threshold: f64,
    #[serde(alias = "slopeWindow")]
    pub slope_window: usize,
    #[serde(alias = "slopeSmooth")]
    pub slope_smooth: usize,
    #[serde(alias = "gogSpan")]
    pub gog_span: usize,
    #[serde(alias = "swingLeft")]
    pub swing_left: usize,
    #[serde(alias = "swingRight")]
    pub swing_right: usize,
    #[serde(alias = "fiboRetrLow")]
    pub fibo_retr_low: f64,
    #[serde(alias = "fiboRetrHigh")]
    pub fibo_retr_high: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            adx_period: 14,
            adx_threshold: 20.0,
            slope_window: 14,
            slope_smooth: 5,
            gog_span: 5,
            swing_left: 3,
            swing_right: 3,
            fibo_retr_low: 0.382,
            fibo_retr_high: 0.618,
        }
    }
}

impl IndicatorParams {
    /// Check every window bound and the retracement ordering.
    pub fn validate(&self) -> Result<(), ParamsError> {
        min_window("adx_period", self.adx_period, 1)?;
        if !(self.adx_threshold.is_finite() && self.adx_threshold > 0.0) {
            return Err(ParamsError::AdxThreshold(self.adx_threshold));
        }
        min_window("slope_window", self.slope_window, 2)?;
        min_window("slope_smooth", self.slope_smooth, 1)?;
        min_window("gog_span", self.gog_span, 1)?;
        min_window("swing_left", self.swing_left, 1)?;
        min_window("swing_right", self.swing_right, 1)?;

        for (name, value) in [
            ("fibo_retr_low", self.fibo_retr_low),
            ("fibo_retr_high", self.fibo_retr_high),
        ] {
            if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
                return Err(ParamsError::RatioOutOfRange { name, value });
            }
        }
        if self.fibo_retr_low >= self.fibo_retr_high {
            return Err(ParamsError::RetracementOrder {
                low: self.fibo_retr_low,
                high: self.fibo_retr_high,
            });
        }
        Ok(())
    }
}

fn min_window(name: &'static str, value: usize, min: usize) -> Result<(), ParamsError> {
    if value < min {
        Err(ParamsError::WindowTooSmall { name, value, min })
    } else {
        Ok(())
    }
}

/// Stop-loss and take-profit placement for emitted signals.
///
/// Both are expressed in units of the active leg's range (swing high minus
/// swing low). Take-profits are projected from the entry price; the stop is
/// placed beyond the swing point that anchors the leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeTargets {
    /// Multipliers for tp1, tp2, tp3. Must be positive and strictly increasing.
    pub tp_multipliers: [f64; 3],
    /// Stop buffer beyond the anchoring swing point, as a fraction of the range.
    pub stop_buffer: f64,
}

impl Default for TradeTargets {
    fn default() -> Self {
        Self {
            tp_multipliers: [1.0, 1.618, 2.618],
            stop_buffer: 0.05,
        }
    }
}

impl TradeTargets {
    pub fn validate(&self) -> Result<(), ParamsError> {
        let [m1, m2, m3] = self.tp_multipliers;
        let all_finite = self.tp_multipliers.iter().all(|m| m.is_finite());
        if !(all_finite && m1 > 0.0 && m1 < m2 && m2 < m3) {
            return Err(ParamsError::TakeProfitOrder(self.tp_multipliers));
        }
        if !(self.stop_buffer.is_finite() && self.stop_buffer > 0.0) {
            return Err(ParamsError::StopBuffer(self.stop_buffer));
        }
        Ok(())
    }
}

/// Everything one `analyze` call needs besides the candles.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub indicators: IndicatorParams,
    pub targets: TradeTargets,
}

impl EngineConfig {
    pub fn new(indicators: IndicatorParams, targets: TradeTargets) -> Self {
        Self {
            indicators,
            targets,
        }
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        self.indicators.validate()?;
        self.targets.validate()
    }
}

impl From<IndicatorParams> for EngineConfig {
    fn from(indicators: IndicatorParams) -> Self {
        Self {
            indicators,
            targets: TradeTargets::default(),
        }
    }
}

/// A parameter set the engine refuses to run with.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParamsError {
    #[error("{name} must be >= {min} (got {value})")]
    WindowTooSmall {
        name: &'static str,
        value: usize,
        min: usize,
    },

    #[error("adx_threshold must be a finite value > 0 (got {0})")]
    AdxThreshold(f64),

    #[error("{name} must be within [0, 1] (got {value})")]
    RatioOutOfRange { name: &'static str, value: f64 },

    #[error("fibo_retr_low ({low}) must be strictly less than fibo_retr_high ({high})")]
    RetracementOrder { low: f64, high: f64 },

    #[error("take-profit multipliers must be positive and strictly increasing (got {0:?})")]
    TakeProfitOrder([f64; 3]),

    #[error("stop_buffer must be a finite value > 0 (got {0})")]
    StopBuffer(f64),
}
