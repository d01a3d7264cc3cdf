//! Publish-on-completion slots for analysis results.
//!
//! Readers always see a complete result: a new analysis replaces the old one
//! by swapping an `Arc` under a short write lock, never by mutating it in
//! place. A failed run leaves the previous result published and records the
//! error next to it.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, warn};

use fibtrend_core::EngineError;

use crate::runner::AnalysisReport;

#[derive(Debug, Default)]
struct SlotState {
    current: Option<Arc<AnalysisReport>>,
    last_error: Option<EngineError>,
    /// Number of successful publications.
    generation: u64,
}

/// Latest good analysis for one symbol.
#[derive(Debug, Default)]
pub struct AnalysisSlot {
    state: RwLock<SlotState>,
}

impl AnalysisSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, SlotState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SlotState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish the outcome of a run. Returns true when a new result was published.
    pub fn publish(&self, outcome: Result<AnalysisReport, EngineError>) -> bool {
        match outcome {
            Ok(report) => {
                let report = Arc::new(report);
                let mut state = self.write();
                state.current = Some(report);
                state.last_error = None;
                state.generation += 1;
                true
            }
            Err(e) => {
                warn!("keeping previous analysis: {e}");
                self.write().last_error = Some(e);
                false
            }
        }
    }

    /// The published result, if any.
    pub fn current(&self) -> Option<Arc<AnalysisReport>> {
        self.read().current.clone()
    }

    /// Error from the most recent run, cleared by the next success.
    pub fn last_error(&self) -> Option<EngineError> {
        self.read().last_error.clone()
    }

    pub fn generation(&self) -> u64 {
        self.read().generation
    }
}

/// One slot per symbol.
#[derive(Debug, Default)]
pub struct SlotBoard {
    slots: RwLock<BTreeMap<String, Arc<AnalysisSlot>>>,
}

impl SlotBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot for `symbol`, created on first use.
    pub fn slot(&self, symbol: &str) -> Arc<AnalysisSlot> {
        if let Some(slot) = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(symbol)
        {
            return Arc::clone(slot);
        }
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(symbol.to_string()).or_insert_with(|| {
            debug!("new slot for {symbol}");
            Arc::new(AnalysisSlot::new())
        }))
    }

    pub fn publish(&self, symbol: &str, outcome: Result<AnalysisReport, EngineError>) -> bool {
        self.slot(symbol).publish(outcome)
    }

    pub fn current(&self, symbol: &str) -> Option<Arc<AnalysisReport>> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(symbol)
            .and_then(|slot| slot.current())
    }

    /// Symbols with a slot, in sorted order.
    pub fn symbols(&self) -> Vec<String> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}
