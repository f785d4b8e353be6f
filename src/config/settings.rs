//! Ledger settings loading from config.toml
//!
//! Every field is optional in the file; anything missing falls back to its default. A missing
//! file is not an error, a malformed one is.

use crate::errors::{Error, Result};
use crate::money::Money;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A balance below this amount after a payment settles the debt automatically.
///
/// The bound is exclusive: a balance of exactly `0.01` stays open.
pub const DEFAULT_AUTO_SETTLE_THRESHOLD: Money = Money::from_cents(1);

/// Settings for the ledger binary
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Database URL; the `DATABASE_URL` environment variable takes precedence
    pub database_url: Option<String>,
    /// Balance below which a payment settles its debt; must be positive
    pub auto_settle_threshold: Money,
    /// Insert the demo people and debts when the ledger is empty
    pub seed_demo_data: bool,
    /// Write a JSON snapshot of the ledger here on startup
    pub export_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: None,
            auto_settle_threshold: DEFAULT_AUTO_SETTLE_THRESHOLD,
            seed_demo_data: false,
            export_path: None,
        }
    }
}

impl Settings {
    /// Parses settings from TOML text and validates them.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let settings: Self = toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse config.toml: {e}"),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if !self.auto_settle_threshold.is_positive() {
            return Err(Error::Config {
                message: format!(
                    "auto_settle_threshold must be greater than zero (got {})",
                    self.auto_settle_threshold
                ),
            });
        }
        Ok(())
    }
}

/// Loads settings from a TOML file, or defaults when the file does not exist.
///
/// # Errors
/// Returns an error if:
/// - The file exists but cannot be read
/// - The TOML syntax is invalid or contains unknown keys
/// - The auto-settle threshold is not positive
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!("No settings file at {:?}, using defaults", path);
        return Ok(Settings::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path:?}: {e}"),
    })?;
    Settings::from_toml(&contents)
}
