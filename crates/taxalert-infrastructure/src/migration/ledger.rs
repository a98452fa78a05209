//! Schema versions and migration steps for the ledger files.
//!
//! Version history:
//! - **1.0.0** — a bare JSON array of records, as written by the original
//!   browser implementation into local storage. Carries no version field.
//! - **1.1.0** — the current envelope: an object with an explicit
//!   `schema_version` field and a `records` array.

use super::registry::{JsonMigration, MigrationRegistry};
use anyhow::Result;
use semver::Version;
use serde_json::Value;
use std::sync::Arc;

/// The current ledger file schema version.
pub const LEDGER_SCHEMA_VERSION: &str = "1.1.0";

const LEGACY_SCHEMA_VERSION: &str = "1.0.0";

/// Determines the schema version of a raw ledger file.
///
/// A bare array is the unversioned legacy format; an object must carry a
/// parseable `schema_version` string.
///
/// # Errors
///
/// Returns an error when the value is neither shape or the version field is
/// missing or malformed.
pub fn detect_schema_version(value: &Value) -> Result<Version> {
    match value {
        Value::Array(_) => Ok(Version::parse(LEGACY_SCHEMA_VERSION).expect("valid const version")),
        Value::Object(map) => {
            let raw = map
                .get("schema_version")
                .and_then(Value::as_str)
                .ok_or_else(|| anyhow::anyhow!("Ledger file is missing schema_version"))?;
            Version::parse(raw)
                .map_err(|e| anyhow::anyhow!("Invalid ledger schema_version '{}': {}", raw, e))
        }
        other => anyhow::bail!(
            "Ledger file has unexpected shape (expected array or object, got {})",
            match other {
                Value::Null => "null",
                Value::Bool(_) => "bool",
                Value::Number(_) => "number",
                Value::String(_) => "string",
                _ => "value",
            }
        ),
    }
}

/// 1.0.0 → 1.1.0: wraps the legacy bare array into the versioned envelope.
#[derive(Debug)]
struct WrapLegacyArray;

impl JsonMigration for WrapLegacyArray {
    fn from_version(&self) -> Version {
        Version::parse(LEGACY_SCHEMA_VERSION).expect("valid const version")
    }

    fn to_version(&self) -> Version {
        Version::parse(LEDGER_SCHEMA_VERSION).expect("valid const version")
    }

    fn description(&self) -> &str {
        "wrap legacy bare record array into versioned envelope"
    }

    fn migrate(&self, value: Value) -> Result<Value> {
        let records = match value {
            Value::Array(records) => records,
            other => anyhow::bail!(
                "Expected a legacy record array, got: {}",
                serde_json::to_string(&other).unwrap_or_default()
            ),
        };

        Ok(serde_json::json!({
            "schema_version": LEDGER_SCHEMA_VERSION,
            "records": records,
        }))
    }
}

/// Builds the migration registry shared by both ledger files.
pub fn create_ledger_migrations() -> MigrationRegistry {
    let mut registry =
        MigrationRegistry::new(Version::parse(LEDGER_SCHEMA_VERSION).expect("valid const version"));
    registry.register(Arc::new(WrapLegacyArray));
    registry
}
