//! Ledger repository traits.
//!
//! Two independent ledgers exist, one per record kind, persisted under
//! distinct namespaces. Implementations live in the infrastructure layer;
//! the application layer depends only on these traits.

use super::model::{EmailRecord, PredictionRecord};
use crate::error::Result;
use async_trait::async_trait;

/// Append-only store for prediction events.
#[async_trait]
pub trait PredictionLedgerRepository: Send + Sync {
    /// Appends a record. Never retried on failure; the fault is surfaced.
    async fn append(&self, record: &PredictionRecord) -> Result<()>;

    /// Returns all records, most-recent-first.
    ///
    /// Append order is chronological; display order is a read-time reversal.
    async fn list(&self) -> Result<Vec<PredictionRecord>>;
}

/// Append-only store for sent alert emails.
#[async_trait]
pub trait EmailLedgerRepository: Send + Sync {
    /// Appends a record. Never retried on failure; the fault is surfaced.
    async fn append(&self, record: &EmailRecord) -> Result<()>;

    /// Returns all records, most-recent-first.
    async fn list(&self) -> Result<Vec<EmailRecord>>;
}
