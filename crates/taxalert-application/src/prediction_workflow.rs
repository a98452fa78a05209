//! Prediction workflow: validate → infer → recommend → append to ledger.

use crate::slot::InFlightSlot;
use std::sync::Arc;
use taxalert_core::error::{Result, TaxAlertError};
use taxalert_core::ledger::{PredictionLedgerRepository, PredictionRecord};
use taxalert_core::prediction::{recommendations_for, PredictionResult};
use taxalert_core::service::InferenceService;
use taxalert_core::taxpayer::TaxpayerProfile;

/// The combined outcome of one submission.
#[derive(Debug, Clone)]
pub struct PredictionOutcome {
    /// The inference result.
    pub result: PredictionResult,
    /// Ordered advisory list derived from the profile.
    pub recommendations: Vec<String>,
    /// The ledger record that was appended, profile snapshot included.
    pub record: PredictionRecord,
}

/// Orchestrates one prediction per submission.
///
/// At most one submission is in flight at a time; an overlapping call is
/// rejected with a busy error rather than queued. A failed inference call
/// leaves the ledger untouched.
pub struct PredictionWorkflow {
    inference: Arc<dyn InferenceService>,
    ledger: Arc<dyn PredictionLedgerRepository>,
    slot: InFlightSlot,
}

impl PredictionWorkflow {
    pub fn new(
        inference: Arc<dyn InferenceService>,
        ledger: Arc<dyn PredictionLedgerRepository>,
    ) -> Self {
        Self {
            inference,
            ledger,
            slot: InFlightSlot::new(),
        }
    }

    /// Submits a profile for prediction.
    ///
    /// The profile is taken by value: the workflow owns the snapshot that
    /// ends up in the ledger record.
    ///
    /// # Errors
    ///
    /// - `Validation` when a numeric constraint is violated (checked before
    ///   anything else; unset catalog fields are forwarded, not rejected).
    /// - `Busy` when another submission is in flight.
    /// - `Request` when the inference service fails; nothing is appended.
    /// - A ledger fault after a successful prediction is surfaced as-is and
    ///   not retried.
    pub async fn submit(&self, profile: TaxpayerProfile) -> Result<PredictionOutcome> {
        profile.validate()?;

        let _guard = self
            .slot
            .try_acquire()
            .ok_or(TaxAlertError::Busy("prediction"))?;

        let result = match self.inference.predict(&profile).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Prediction request failed: {}", e);
                return Err(e);
            }
        };

        let recommendations = recommendations_for(&profile, &result);

        let record = PredictionRecord::new(chrono::Utc::now().to_rfc3339(), &result, profile);
        self.ledger.append(&record).await?;

        tracing::info!(
            "Prediction recorded: label={:?} probability={:.3} recommendations={}",
            record.label,
            record.probability,
            recommendations.len()
        );

        Ok(PredictionOutcome {
            result,
            recommendations,
            record,
        })
    }

    /// True while a submission is in flight; the host UI mirrors this as a
    /// loading indicator.
    pub fn is_in_flight(&self) -> bool {
        self.slot.is_occupied()
    }
}
