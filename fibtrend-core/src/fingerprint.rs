//! Deterministic fingerprints for configurations, candle series and results.
//!
//! - `ConfigHash`: exact identity of an `EngineConfig` (every parameter value).
//! - `DatasetHash`: content hash of a candle series.
//! - `AnalysisHash`: content hash of an `Analysis`, used to check that
//!   identical inputs produce byte-identical output.
//!
//! All three are BLAKE3 over canonical `serde_json` bytes. Struct fields
//! serialize in declaration order, so the bytes are stable across runs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::Candle;
use crate::engine::Analysis;
use crate::params::EngineConfig;

macro_rules! hex_hash {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            fn from_bytes(bytes: &[u8]) -> Self {
                Self(blake3::hash(bytes).to_hex().to_string())
            }

            /// First 12 hex characters, for log lines and file names.
            pub fn short(&self) -> &str {
                &self.0[..12.min(self.0.len())]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

hex_hash!(
    /// Hash of every parameter value in an `EngineConfig`.
    ConfigHash
);
hex_hash!(
    /// Content hash of a candle series.
    DatasetHash
);
hex_hash!(
    /// Content hash of an analysis result.
    AnalysisHash
);

fn canonical_json<T: Serialize + ?Sized>(value: &T) -> Vec<u8> {
    // Plain structs, vectors and finite numbers: serialization cannot fail.
    serde_json::to_vec(value).expect("value must serialize")
}

pub fn config_hash(config: &EngineConfig) -> ConfigHash {
    ConfigHash::from_bytes(&canonical_json(config))
}

pub fn dataset_hash(candles: &[Candle]) -> DatasetHash {
    DatasetHash::from_bytes(&canonical_json(candles))
}

pub fn analysis_hash(analysis: &Analysis) -> AnalysisHash {
    AnalysisHash::from_bytes(&canonical_json(analysis))
}
