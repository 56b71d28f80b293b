//! Application settings loading from catalog.toml
//!
//! Every section is optional; anything not present in the file falls back to the
//! defaults below. The database URL can additionally be overridden through the
//! `DATABASE_URL` environment variable (see [`crate::config::database`]).

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default location of the settings file
pub const DEFAULT_SETTINGS_PATH: &str = "catalog.toml";

/// Configuration structure representing the entire catalog.toml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Database connection settings
    pub database: DatabaseSettings,
    /// Where uploaded product images live
    pub storage: StorageSettings,
    /// How values are shown in the product listing
    pub display: DisplaySettings,
}

/// `[database]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Connection URL, e.g. `sqlite://data/catalog.sqlite?mode=rwc`
    pub url: Option<String>,
}

/// `[storage]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory uploaded images are written to
    pub upload_dir: PathBuf,
    /// URL prefix under which `upload_dir` is served
    pub public_url: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("storage/app/public"),
            public_url: "/storage".to_string(),
        }
    }
}

/// `[display]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Prefix for the price columns of the listing
    pub currency_symbol: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
        }
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read settings file: {e}"),
    })?;

    parse_settings(&contents)
}

/// Parses settings from TOML text
///
/// # Errors
/// Returns an error if the TOML syntax is invalid or a value has the wrong type.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog.toml: {e}"),
    })
}

/// Loads settings from the default location (./catalog.toml), or the built-in
/// defaults when that file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_default_settings() -> Result<Settings> {
    let path = Path::new(DEFAULT_SETTINGS_PATH);
    if path.exists() {
        load_settings(path)
    } else {
        tracing::info!("No {DEFAULT_SETTINGS_PATH} found, using default settings");
        Ok(Settings::default())
    }
}
