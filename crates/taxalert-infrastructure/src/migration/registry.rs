//! Migration registry managing a linear migration chain.
//!
//! Migrations are stored in order and must form a continuous chain
//! (1.0.0 → 1.1.0 → 2.0.0 → ...). Each version migrates through all
//! intermediate versions; no step is ever skipped. This prioritizes safety
//! and debuggability over performance, which is acceptable for files that
//! are loaded once per operation.

use anyhow::{Context, Result};
use semver::Version;
use serde_json::Value;
use std::sync::Arc;

/// One migration step over the raw JSON representation of a ledger file.
pub trait JsonMigration: Send + Sync + std::fmt::Debug {
    /// Returns the source version this migration starts from.
    fn from_version(&self) -> Version;

    /// Returns the target version this migration produces.
    fn to_version(&self) -> Version;

    /// A human-readable description, used for logging.
    fn description(&self) -> &str;

    /// Executes the migration on the raw JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be transformed.
    fn migrate(&self, value: Value) -> Result<Value>;
}

/// Registry for a linear chain of [`JsonMigration`] steps.
#[derive(Debug)]
pub struct MigrationRegistry {
    migrations: Vec<Arc<dyn JsonMigration>>,
    latest_version: Version,
}

impl MigrationRegistry {
    /// Creates a registry targeting the given latest version.
    pub fn new(latest_version: Version) -> Self {
        Self {
            migrations: Vec::new(),
            latest_version,
        }
    }

    /// The latest version this registry migrates to.
    pub fn latest_version(&self) -> &Version {
        &self.latest_version
    }

    /// Registers a migration, validating chain continuity.
    ///
    /// # Panics
    ///
    /// Panics if the migration does not connect to the existing chain or
    /// overshoots the registry's latest version. Registration happens at
    /// startup with a fixed set of steps, so a broken chain is a
    /// programming error.
    pub fn register(&mut self, migration: Arc<dyn JsonMigration>) {
        if let Some(last) = self.migrations.last() {
            assert_eq!(
                last.to_version(),
                migration.from_version(),
                "Migration chain broken: expected migration from {}, got migration from {}",
                last.to_version(),
                migration.from_version()
            );
        }

        assert!(
            migration.to_version() <= self.latest_version,
            "Migration target version {} exceeds registry's latest version {}",
            migration.to_version(),
            self.latest_version
        );

        self.migrations.push(migration);
    }

    /// Migrates data from `current_version` to the latest version, applying
    /// every intermediate step in sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is newer than the latest supported
    /// version, if no migration path starts at `current_version`, or if any
    /// step fails.
    pub fn migrate_to_latest(&self, mut data: Value, current_version: &Version) -> Result<Value> {
        if current_version == &self.latest_version {
            tracing::debug!(
                "Data is already at the latest version ({}), no migration needed",
                current_version
            );
            return Ok(data);
        }

        if current_version > &self.latest_version {
            anyhow::bail!(
                "Data version ({}) is newer than the latest supported version ({})",
                current_version,
                self.latest_version
            );
        }

        let start_idx = self
            .migrations
            .iter()
            .position(|m| &m.from_version() == current_version)
            .ok_or_else(|| {
                anyhow::anyhow!("No migration found starting from version {}", current_version)
            })?;

        for migration in &self.migrations[start_idx..] {
            tracing::info!(
                "Migrating ledger schema {} -> {} ({})",
                migration.from_version(),
                migration.to_version(),
                migration.description()
            );

            data = migration.migrate(data).with_context(|| {
                format!(
                    "Migration failed: {} -> {}",
                    migration.from_version(),
                    migration.to_version()
                )
            })?;
        }

        Ok(data)
    }
}
