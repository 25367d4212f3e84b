//! Application settings from config.toml with environment overrides.
//!
//! The data path is resolved in precedence order: the `ENVDASH_DATA_PATH`
//! environment variable wins over the TOML value, which wins over the
//! built-in default. A missing config file is not an error; defaults apply.

use crate::errors::{Error, Result};
use crate::store::DEFAULT_EXPORT_FILENAME;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Location of the persisted blob when nothing else is configured.
pub const DEFAULT_DATA_PATH: &str = "data/environments.json";

/// Environment variable overriding the configured data path.
const DATA_PATH_ENV_VAR: &str = "ENVDASH_DATA_PATH";

/// Configuration structure representing the config.toml file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the JSON blob lives
    pub data_path: String,
    /// Filename offered for exports when the user does not pick one
    pub export_filename: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_DATA_PATH.to_string(),
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
        }
    }
}

impl Settings {
    /// Data path with the environment override applied.
    #[must_use]
    pub fn resolved_data_path(&self) -> String {
        Self::data_path_with_override(self, std::env::var(DATA_PATH_ENV_VAR).ok())
    }

    fn data_path_with_override(&self, env_override: Option<String>) -> String {
        env_override
            .filter(|path| !path.is_empty())
            .unwrap_or_else(|| self.data_path.clone())
    }
}

/// Loads settings from a TOML file.
///
/// A missing file yields the defaults; an unreadable or unparseable file is
/// a configuration error.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);

    let contents = match std::fs::read_to_string(path_ref) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No config file at {:?}, using defaults", path_ref);
            return Ok(Settings::default());
        }
        Err(e) => {
            return Err(Error::Config {
                message: format!("Failed to read config file {path_ref:?}: {e}"),
            });
        }
    };

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse TOML from config file {path_ref:?}: {e}"),
    })
}

/// Loads settings from the default location (./config.toml).
pub fn load_default_settings() -> Result<Settings> {
    load_settings("config.toml")
}
