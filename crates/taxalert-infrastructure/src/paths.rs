//! Unified path management for TaxAlert local files.
//!
//! All configuration and ledger files live under one directory so the
//! whole local state can be inspected or backed up in one place.
//!
//! ```text
//! ~/.config/taxalert/
//! ├── config.toml          # Service endpoints
//! ├── predictions.json     # Prediction ledger
//! └── emails_sent.json     # Sent-email ledger
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for TaxAlert.
pub struct TaxAlertPaths;

impl TaxAlertPaths {
    /// Returns the TaxAlert configuration directory (`~/.config/taxalert/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        let home = dirs::home_dir().ok_or(PathError::HomeDirNotFound)?;
        Ok(home.join(".config").join("taxalert"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the prediction ledger file.
    pub fn predictions_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("predictions.json"))
    }

    /// Returns the path to the sent-email ledger file.
    pub fn emails_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("emails_sent.json"))
    }
}
