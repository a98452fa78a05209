//! JSON-file implementations of the ledger repositories.
//!
//! Each ledger lives in its own file under the TaxAlert config directory.
//! Files are read fully, migrated to the current schema once at load, and
//! rewritten atomically on every append. A per-store async mutex keeps the
//! single-writer-at-a-time property inside the process; the file lock in
//! the storage layer covers read-modify-write cycles across processes.

use crate::migration::{
    create_ledger_migrations, detect_schema_version, MigrationRegistry, LEDGER_SCHEMA_VERSION,
};
use crate::paths::TaxAlertPaths;
use crate::storage::{AtomicJsonError, AtomicJsonFile};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use taxalert_core::error::{Result, TaxAlertError};
use taxalert_core::ledger::{
    EmailLedgerRepository, EmailRecord, PredictionLedgerRepository, PredictionRecord,
};

/// The versioned on-disk envelope of a ledger file.
#[derive(Debug, Serialize, Deserialize)]
struct LedgerEnvelope<T> {
    schema_version: String,
    records: Vec<T>,
}

/// Shared store logic for one ledger file.
struct JsonLedgerStore {
    file: AtomicJsonFile,
    registry: Arc<MigrationRegistry>,
    write_guard: tokio::sync::Mutex<()>,
}

impl JsonLedgerStore {
    fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
            registry: Arc::new(create_ledger_migrations()),
            write_guard: tokio::sync::Mutex::new(()),
        }
    }

    /// Loads all records in append (chronological) order, migrating the
    /// file schema if needed.
    async fn load_records<T>(&self) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let file = self.file.clone();
        let registry = self.registry.clone();

        tokio::task::spawn_blocking(move || load_records_blocking(&file, &registry))
            .await
            .map_err(|e| TaxAlertError::internal(format!("Failed to join task: {}", e)))?
    }

    /// Appends one record and rewrites the file under the current schema.
    async fn append_record<T>(&self, record: T) -> Result<()>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
    {
        let _guard = self.write_guard.lock().await;

        let file = self.file.clone();
        let registry = self.registry.clone();

        tokio::task::spawn_blocking(move || {
            let _lock = file.lock().map_err(storage_error)?;

            let mut records: Vec<T> = load_records_blocking(&file, &registry)?;
            records.push(record);

            let envelope = LedgerEnvelope {
                schema_version: LEDGER_SCHEMA_VERSION.to_string(),
                records,
            };
            file.save(&envelope).map_err(storage_error)
        })
        .await
        .map_err(|e| TaxAlertError::internal(format!("Failed to join task: {}", e)))?
    }
}

fn load_records_blocking<T: DeserializeOwned>(
    file: &AtomicJsonFile,
    registry: &MigrationRegistry,
) -> Result<Vec<T>> {
    let Some(raw) = file.load().map_err(storage_error)? else {
        return Ok(Vec::new());
    };

    let version =
        detect_schema_version(&raw).map_err(|e| TaxAlertError::migration(e.to_string()))?;
    let migrated = registry
        .migrate_to_latest(raw, &version)
        .map_err(|e| TaxAlertError::migration(e.to_string()))?;

    let envelope: LedgerEnvelope<T> = serde_json::from_value(migrated)?;
    Ok(envelope.records)
}

fn storage_error(err: AtomicJsonError) -> TaxAlertError {
    match err {
        AtomicJsonError::Io(e) => TaxAlertError::io(e.to_string()),
        AtomicJsonError::Json(e) => TaxAlertError::from(e),
        AtomicJsonError::Lock(e) => TaxAlertError::io(e),
    }
}

/// Prediction ledger persisted to `predictions.json`.
pub struct JsonPredictionLedger {
    store: JsonLedgerStore,
}

impl JsonPredictionLedger {
    /// Creates a ledger backed by the given file.
    pub fn new(path: PathBuf) -> Self {
        Self {
            store: JsonLedgerStore::new(path),
        }
    }

    /// Creates a ledger at the default location
    /// (`~/.config/taxalert/predictions.json`).
    pub fn default_location() -> Result<Self> {
        let path = TaxAlertPaths::predictions_file()
            .map_err(|e| TaxAlertError::config(e.to_string()))?;
        Ok(Self::new(path))
    }
}

#[async_trait]
impl PredictionLedgerRepository for JsonPredictionLedger {
    async fn append(&self, record: &PredictionRecord) -> Result<()> {
        self.store.append_record(record.clone()).await
    }

    async fn list(&self) -> Result<Vec<PredictionRecord>> {
        let mut records: Vec<PredictionRecord> = self.store.load_records().await?;
        records.reverse();
        Ok(records)
    }
}

/// Sent-email ledger persisted to `emails_sent.json`.
pub struct JsonEmailLedger {
    store: JsonLedgerStore,
}

impl JsonEmailLedger {
    /// Creates a ledger backed by the given file.
    pub fn new(path: PathBuf) -> Self {
        Self {
            store: JsonLedgerStore::new(path),
        }
    }

    /// Creates a ledger at the default location
    /// (`~/.config/taxalert/emails_sent.json`).
    pub fn default_location() -> Result<Self> {
        let path =
            TaxAlertPaths::emails_file().map_err(|e| TaxAlertError::config(e.to_string()))?;
        Ok(Self::new(path))
    }
}

#[async_trait]
impl EmailLedgerRepository for JsonEmailLedger {
    async fn append(&self, record: &EmailRecord) -> Result<()> {
        self.store.append_record(record.clone()).await
    }

    async fn list(&self) -> Result<Vec<EmailRecord>> {
        let mut records: Vec<EmailRecord> = self.store.load_records().await?;
        records.reverse();
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use taxalert_core::prediction::{ComplianceLabel, PredictionResult};
    use taxalert_core::taxpayer::TaxpayerProfile;
    use tempfile::TempDir;

    fn profile() -> TaxpayerProfile {
        TaxpayerProfile {
            annual_revenue: 40_000_000.0,
            turnover: 80_000_000.0,
            late_payments: 2,
            past_sanctions: 1,
            sector: None,
            location: None,
            audit_count: 1,
            risk_level: None,
            contact_email: Some("a@b.com".to_string()),
        }
    }

    fn prediction_record(timestamp: &str, probability: f64) -> PredictionRecord {
        PredictionRecord::new(
            timestamp.to_string(),
            &PredictionResult::new(ComplianceLabel::NonCompliant, probability),
            profile(),
        )
    }

    fn email_record(timestamp: &str) -> EmailRecord {
        EmailRecord {
            timestamp: timestamp.to_string(),
            email: "a@b.com".to_string(),
            subject: "Alerte de non-conformité fiscale".to_string(),
            body: "Bonjour,\n\n...".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_ledger_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let ledger = JsonPredictionLedger::new(dir.path().join("predictions.json"));

        assert!(ledger.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_then_list_most_recent_first() {
        let dir = TempDir::new().unwrap();
        let ledger = JsonPredictionLedger::new(dir.path().join("predictions.json"));

        ledger
            .append(&prediction_record("2025-01-01T00:00:00Z", 0.12))
            .await
            .unwrap();
        ledger
            .append(&prediction_record("2025-01-02T00:00:00Z", 0.73))
            .await
            .unwrap();

        let records = ledger.list().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].timestamp, "2025-01-02T00:00:00Z");
        assert_eq!(records[1].timestamp, "2025-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn test_label_and_probability_round_trip_exactly() {
        let dir = TempDir::new().unwrap();
        let ledger = JsonPredictionLedger::new(dir.path().join("predictions.json"));

        let record = prediction_record("2025-01-01T00:00:00Z", 0.73);
        ledger.append(&record).await.unwrap();

        let loaded = ledger.list().await.unwrap();
        assert_eq!(loaded[0], record);
    }

    #[tokio::test]
    async fn test_legacy_bare_array_is_migrated_at_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("emails_sent.json");

        // Legacy ledger files were bare record arrays.
        let legacy = serde_json::json!([{
            "timestamp": "2024-12-31T00:00:00Z",
            "email": "old@b.com",
            "subject": "Alerte de non-conformité fiscale",
            "body": "Bonjour,"
        }]);
        fs::write(&path, serde_json::to_string(&legacy).unwrap()).unwrap();

        let ledger = JsonEmailLedger::new(path.clone());
        let records = ledger.list().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].email, "old@b.com");

        // The next append persists the versioned envelope.
        ledger.append(&email_record("2025-01-01T00:00:00Z")).await.unwrap();
        let on_disk: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk["schema_version"], "1.1.0");
        assert_eq!(on_disk["records"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_future_schema_version_fails_to_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("predictions.json");
        fs::write(
            &path,
            serde_json::to_string(&serde_json::json!({
                "schema_version": "9.0.0",
                "records": []
            }))
            .unwrap(),
        )
        .unwrap();

        let ledger = JsonPredictionLedger::new(path);
        let err = ledger.list().await.unwrap_err();
        assert!(err.is_migration());
    }

    #[tokio::test]
    async fn test_ledgers_use_distinct_namespaces() {
        let dir = TempDir::new().unwrap();
        let predictions = JsonPredictionLedger::new(dir.path().join("predictions.json"));
        let emails = JsonEmailLedger::new(dir.path().join("emails_sent.json"));

        predictions
            .append(&prediction_record("2025-01-01T00:00:00Z", 0.5))
            .await
            .unwrap();
        emails.append(&email_record("2025-01-01T00:00:00Z")).await.unwrap();

        assert_eq!(predictions.list().await.unwrap().len(), 1);
        assert_eq!(emails.list().await.unwrap().len(), 1);
    }
}
