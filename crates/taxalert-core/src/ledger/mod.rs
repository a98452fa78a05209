//! Append-only audit ledgers for predictions and sent alert emails.

mod model;
mod repository;
mod stats;

pub use model::{EmailRecord, PredictionRecord};
pub use repository::{EmailLedgerRepository, PredictionLedgerRepository};
pub use stats::LedgerStats;
