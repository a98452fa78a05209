//! Linear schema-migration framework for the persisted ledger files.
//!
//! Each ledger file carries a semver schema version; loading migrates the
//! raw JSON through every intermediate step to the latest version before
//! deserialization. Data newer than the latest supported version is
//! rejected rather than guessed at.

mod ledger;
mod registry;

pub use ledger::{create_ledger_migrations, detect_schema_version, LEDGER_SCHEMA_VERSION};
pub use registry::{JsonMigration, MigrationRegistry};
