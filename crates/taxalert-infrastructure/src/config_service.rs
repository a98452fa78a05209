//! Configuration file management for TaxAlert.
//!
//! Reads service endpoints from `~/.config/taxalert/config.toml`. A missing
//! file means defaults (all three services on `http://localhost:5000`); a
//! malformed file is an error rather than a silent fallback.

use crate::paths::TaxAlertPaths;
use serde::{Deserialize, Serialize};
use std::path::Path;
use taxalert_core::error::{Result, TaxAlertError};

const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Endpoints of the three external services plus answer-service options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the inference service (`POST {url}/predict`)
    #[serde(default = "default_base_url")]
    pub inference_url: String,
    /// Base URL of the email service (`POST {url}/send_email`)
    #[serde(default = "default_base_url")]
    pub email_url: String,
    /// Base URL of the answer service (`POST {url}/api/chat`)
    #[serde(default = "default_base_url")]
    pub answer_url: String,
    /// Whether the answer service should be asked to return citations
    #[serde(default)]
    pub include_sources: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            inference_url: default_base_url(),
            email_url: default_base_url(),
            answer_url: default_base_url(),
            include_sources: false,
        }
    }
}

impl ServiceConfig {
    /// Loads the configuration from the default location, falling back to
    /// defaults when the file does not exist.
    pub fn load_or_default() -> Result<Self> {
        let path =
            TaxAlertPaths::config_file().map_err(|e| TaxAlertError::config(e.to_string()))?;
        Self::load_from(&path)
    }

    /// Loads the configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error when the file exists but cannot be read,
    /// and a `Serialization` error when it cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(
                "No config file at {}, using default service endpoints",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            TaxAlertError::config(format!(
                "Failed to read configuration file at {}: {}",
                path.display(),
                e
            ))
        })?;

        let config = toml::from_str(&content)?;
        Ok(config)
    }
}
