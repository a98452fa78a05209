//! Aggregate statistics over the prediction ledger.
//!
//! Computed at read time, never cached.

use super::model::PredictionRecord;
use crate::prediction::ComplianceLabel;
use serde::{Deserialize, Serialize};

/// Aggregates over a set of prediction records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LedgerStats {
    /// Total number of predictions
    pub total: usize,
    /// Predictions labeled compliant
    pub compliant: usize,
    /// Predictions labeled non-compliant
    pub non_compliant: usize,
}

impl LedgerStats {
    /// Computes the aggregates over the given records.
    pub fn from_records(records: &[PredictionRecord]) -> Self {
        let non_compliant = records
            .iter()
            .filter(|r| r.label == ComplianceLabel::NonCompliant)
            .count();

        Self {
            total: records.len(),
            compliant: records.len() - non_compliant,
            non_compliant,
        }
    }

    /// Non-compliance rate as a percentage; 0 when the ledger is empty.
    pub fn non_compliance_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.non_compliant as f64 / self.total as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::PredictionResult;
    use crate::taxpayer::TaxpayerProfile;

    fn record(label: ComplianceLabel) -> PredictionRecord {
        let profile = TaxpayerProfile {
            annual_revenue: 1.0,
            turnover: 1.0,
            late_payments: 0,
            past_sanctions: 0,
            sector: None,
            location: None,
            audit_count: 0,
            risk_level: None,
            contact_email: None,
        };
        PredictionRecord::new(
            "2025-01-01T00:00:00Z".to_string(),
            &PredictionResult::new(label, 0.5),
            profile,
        )
    }

    #[test]
    fn test_empty_ledger_has_zero_rate() {
        let stats = LedgerStats::from_records(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.non_compliance_rate(), 0.0);
    }

    #[test]
    fn test_counts_and_rate() {
        let records = vec![
            record(ComplianceLabel::NonCompliant),
            record(ComplianceLabel::Compliant),
            record(ComplianceLabel::NonCompliant),
            record(ComplianceLabel::NonCompliant),
        ];
        let stats = LedgerStats::from_records(&records);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.compliant, 1);
        assert_eq!(stats.non_compliant, 3);
        assert_eq!(stats.non_compliance_rate(), 75.0);
    }
}
