//! Configuration management for the data path and application settings.

/// Settings loading from config.toml and environment overrides
pub mod settings;

pub use settings::{DEFAULT_DATA_PATH, Settings, load_default_settings, load_settings};
