//! Ledger record types.
//!
//! Both record kinds are append-only and keyed by an ISO-8601 timestamp
//! assigned at append time. Records are never mutated or removed.

use crate::prediction::{ComplianceLabel, PredictionResult};
use crate::taxpayer::TaxpayerProfile;
use serde::{Deserialize, Serialize};

/// One prediction event: the outcome plus a snapshot of the profile that
/// produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Timestamp assigned at append time (ISO 8601 format)
    pub timestamp: String,
    /// Binary compliance label (0 = compliant, 1 = non-compliant)
    pub label: ComplianceLabel,
    /// Non-compliance likelihood in [0, 1]
    pub probability: f64,
    /// Snapshot of the submitted profile
    pub profile: TaxpayerProfile,
}

impl PredictionRecord {
    /// Builds a record from a prediction outcome and the profile snapshot.
    pub fn new(timestamp: String, result: &PredictionResult, profile: TaxpayerProfile) -> Self {
        Self {
            timestamp,
            label: result.label,
            probability: result.probability,
            profile,
        }
    }
}

/// One sent alert email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailRecord {
    /// Timestamp assigned at append time (ISO 8601 format)
    pub timestamp: String,
    /// Recipient address
    pub email: String,
    /// Subject line as sent
    pub subject: String,
    /// Body as sent
    pub body: String,
}
