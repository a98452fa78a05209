//! Application layer of TaxAlert: the prediction workflow, the guarded
//! alert notifier, and the chat service, plus the bootstrap that wires them
//! to the HTTP clients and JSON ledgers.

pub mod alert_notifier;
pub mod bootstrap;
pub mod chat_service;
pub mod prediction_workflow;
mod slot;

pub use alert_notifier::{AlertNotifier, ALERT_BODY, ALERT_SUBJECT};
pub use bootstrap::TaxAlertApp;
pub use chat_service::ChatService;
pub use prediction_workflow::{PredictionOutcome, PredictionWorkflow};
