//! Trading signals emitted by the synthesis stage.
//!
//! Signals are immutable value records. They point at a candle by timestamp
//! only; there is no link back from a candle to the signals fired on it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalKind {
    Buy,
    Sell,
}

impl SignalKind {
    /// +1.0 for a buy, -1.0 for a sell.
    pub fn sign(&self) -> f64 {
        match self {
            SignalKind::Buy => 1.0,
            SignalKind::Sell => -1.0,
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::Buy => write!(f, "BUY"),
            SignalKind::Sell => write!(f, "SELL"),
        }
    }
}

/// A BUY or SELL event with its entry, stop-loss and three take-profit targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Timestamp of the candle the signal fired on.
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: SignalKind,
    /// Entry price (the candle close).
    pub price: f64,
    /// Short description of the conditions that matched.
    pub reason: String,
    pub sl: f64,
    pub tp1: f64,
    pub tp2: f64,
    pub tp3: f64,
}

impl Signal {
    /// Take-profit targets, closest first.
    pub fn targets(&self) -> [f64; 3] {
        [self.tp1, self.tp2, self.tp3]
    }

    /// True when the targets move strictly away from entry in the trade direction
    /// and the stop sits on the other side of entry.
    pub fn is_well_formed(&self) -> bool {
        let s = self.kind.sign();
        let ordered = s * (self.tp1 - self.price) > 0.0
            && s * (self.tp2 - self.tp1) > 0.0
            && s * (self.tp3 - self.tp2) > 0.0;
        ordered && s * (self.price - self.sl) > 0.0
    }

    /// Distance from entry to stop-loss, always positive for a well-formed signal.
    pub fn risk(&self) -> f64 {
        self.kind.sign() * (self.price - self.sl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buy() -> Signal {
        Signal {
            timestamp: 1_700_000_000_000,
            kind: SignalKind::Buy,
            price: 100.0,
            reason: "test".into(),
            sl: 95.0,
            tp1: 110.0,
            tp2: 116.18,
            tp3: 126.18,
        }
    }

    #[test]
    fn serializes_kind_as_type_field() {
        let json = serde_json::to_string(&buy()).unwrap();
        assert!(json.contains("\"type\":\"BUY\""), "json was: {json}");
        let deser: Signal = serde_json::from_str(&json).unwrap();
        assert_eq!(deser, buy());
    }

    #[test]
    fn well_formed_buy() {
        assert!(buy().is_well_formed());
        assert_eq!(buy().risk(), 5.0);
    }

    #[test]
    fn well_formed_sell() {
        let sell = Signal {
            kind: SignalKind::Sell,
            sl: 105.0,
            tp1: 90.0,
            tp2: 83.82,
            tp3: 73.82,
            ..buy()
        };
        assert!(sell.is_well_formed());
        assert_eq!(sell.targets(), [90.0, 83.82, 73.82]);
    }

    #[test]
    fn stop_on_wrong_side_is_rejected() {
        let bad = Signal { sl: 101.0, ..buy() };
        assert!(!bad.is_well_formed());
    }

    #[test]
    fn unordered_targets_are_rejected() {
        let bad = Signal {
            tp2: 109.0,
            ..buy()
        };
        assert!(!bad.is_well_formed());
    }

    #[test]
    fn kind_display() {
        assert_eq!(SignalKind::Buy.to_string(), "BUY");
        assert_eq!(SignalKind::Sell.to_string(), "SELL");
    }
}
