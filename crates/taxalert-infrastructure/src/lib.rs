//! Infrastructure layer of TaxAlert: local persistence of the audit
//! ledgers (versioned JSON files with schema migration), configuration
//! loading, and path management.

pub mod config_service;
pub mod json_ledger_repository;
pub mod migration;
pub mod paths;
pub mod storage;

pub use config_service::ServiceConfig;
pub use json_ledger_repository::{JsonEmailLedger, JsonPredictionLedger};
pub use paths::TaxAlertPaths;
