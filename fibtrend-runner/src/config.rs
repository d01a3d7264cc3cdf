//! TOML configuration files for the engine.
//!
//! A config file holds two optional tables, `[indicators]` and `[targets]`.
//! Missing tables or keys fall back to the dashboard defaults, and indicator
//! keys may use either snake_case or the dashboard's camelCase names.
//!
//! ```toml
//! [indicators]
//! adx_period = 14
//! adx_threshold = 25.0
//! fiboRetrLow = 0.5
//!
//! [targets]
//! tp_multipliers = [1.0, 2.0, 3.0]
//! stop_buffer = 0.1
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use fibtrend_core::{EngineConfig, ParamsError};

/// Errors from loading or rendering a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render config TOML: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] ParamsError),
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Parse and validate config TOML.
pub fn parse_config(content: &str) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load the config at `path`, or the defaults when no path is given.
pub fn load_or_default(path: Option<&Path>) -> Result<EngineConfig, ConfigError> {
    match path {
        Some(p) => load_config(p),
        None => Ok(EngineConfig::default()),
    }
}

/// Render a config as TOML, e.g. to write out the defaults as a starting point.
pub fn to_toml(config: &EngineConfig) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}
