//! Wires the full application stack from configuration.
//!
//! The two subsystems (prediction pipeline and assistant) share nothing but
//! this container; the host UI holds one `TaxAlertApp` and calls into it.

use crate::alert_notifier::AlertNotifier;
use crate::chat_service::ChatService;
use crate::prediction_workflow::PredictionWorkflow;
use std::path::PathBuf;
use std::sync::Arc;
use taxalert_core::error::Result;
use taxalert_core::ledger::{
    EmailLedgerRepository, EmailRecord, LedgerStats, PredictionLedgerRepository, PredictionRecord,
};
use taxalert_infrastructure::{JsonEmailLedger, JsonPredictionLedger, ServiceConfig};
use taxalert_interaction::{AnswerClient, EmailClient, InferenceClient};

/// The assembled application.
pub struct TaxAlertApp {
    pub predictions: Arc<PredictionWorkflow>,
    pub alerts: Arc<AlertNotifier>,
    pub chat: Arc<ChatService>,
    prediction_ledger: Arc<dyn PredictionLedgerRepository>,
    email_ledger: Arc<dyn EmailLedgerRepository>,
}

impl TaxAlertApp {
    /// Builds the stack from `~/.config/taxalert/config.toml` (or defaults)
    /// with the ledgers at their default locations.
    pub fn from_default_config() -> Result<Self> {
        let config = ServiceConfig::load_or_default()?;
        let prediction_ledger = Arc::new(JsonPredictionLedger::default_location()?);
        let email_ledger = Arc::new(JsonEmailLedger::default_location()?);
        Ok(Self::assemble(&config, prediction_ledger, email_ledger))
    }

    /// Builds the stack with explicit ledger file paths.
    pub fn with_paths(
        config: &ServiceConfig,
        predictions_path: PathBuf,
        emails_path: PathBuf,
    ) -> Self {
        let prediction_ledger = Arc::new(JsonPredictionLedger::new(predictions_path));
        let email_ledger = Arc::new(JsonEmailLedger::new(emails_path));
        Self::assemble(config, prediction_ledger, email_ledger)
    }

    fn assemble(
        config: &ServiceConfig,
        prediction_ledger: Arc<dyn PredictionLedgerRepository>,
        email_ledger: Arc<dyn EmailLedgerRepository>,
    ) -> Self {
        let inference = Arc::new(InferenceClient::from_config(config));
        let email = Arc::new(EmailClient::from_config(config));
        let answers = Arc::new(AnswerClient::from_config(config));

        Self {
            predictions: Arc::new(PredictionWorkflow::new(
                inference,
                prediction_ledger.clone(),
            )),
            alerts: Arc::new(AlertNotifier::new(email, email_ledger.clone())),
            chat: Arc::new(ChatService::new(answers)),
            prediction_ledger,
            email_ledger,
        }
    }

    /// Prediction history, most-recent-first, with its aggregates computed
    /// at read time.
    pub async fn prediction_history(&self) -> Result<(Vec<PredictionRecord>, LedgerStats)> {
        let records = self.prediction_ledger.list().await?;
        let stats = LedgerStats::from_records(&records);
        Ok((records, stats))
    }

    /// Sent-email history, most-recent-first.
    pub async fn email_history(&self) -> Result<Vec<EmailRecord>> {
        self.email_ledger.list().await
    }
}
