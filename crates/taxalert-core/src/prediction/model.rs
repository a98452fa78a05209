//! Prediction result types.

use serde::{Deserialize, Serialize};

/// Binary compliance label returned by the inference service.
///
/// Serialized as the integer the service emits: 0 = compliant,
/// 1 = non-compliant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ComplianceLabel {
    Compliant,
    NonCompliant,
}

impl From<ComplianceLabel> for u8 {
    fn from(label: ComplianceLabel) -> Self {
        match label {
            ComplianceLabel::Compliant => 0,
            ComplianceLabel::NonCompliant => 1,
        }
    }
}

impl TryFrom<u8> for ComplianceLabel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ComplianceLabel::Compliant),
            1 => Ok(ComplianceLabel::NonCompliant),
            other => Err(format!("invalid compliance label: {}", other)),
        }
    }
}

/// The outcome of one inference call.
///
/// `probability` is the non-compliance likelihood and is kept within
/// [0, 1] by construction (`new` clamps).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: ComplianceLabel,
    pub probability: f64,
}

impl PredictionResult {
    /// Builds a result, clamping the probability into [0, 1].
    pub fn new(label: ComplianceLabel, probability: f64) -> Self {
        Self {
            label,
            probability: probability.clamp(0.0, 1.0),
        }
    }

    /// True when the service flagged the profile as non-compliant.
    pub fn is_non_compliant(&self) -> bool {
        self.label == ComplianceLabel::NonCompliant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trips_as_integer() {
        let json = serde_json::to_string(&ComplianceLabel::NonCompliant).unwrap();
        assert_eq!(json, "1");

        let label: ComplianceLabel = serde_json::from_str("0").unwrap();
        assert_eq!(label, ComplianceLabel::Compliant);
    }

    #[test]
    fn test_label_rejects_out_of_range_integer() {
        let result: Result<ComplianceLabel, _> = serde_json::from_str("2");
        assert!(result.is_err());
    }

    #[test]
    fn test_probability_is_clamped() {
        let result = PredictionResult::new(ComplianceLabel::Compliant, 1.7);
        assert_eq!(result.probability, 1.0);

        let result = PredictionResult::new(ComplianceLabel::Compliant, -0.2);
        assert_eq!(result.probability, 0.0);
    }

    #[test]
    fn test_result_round_trips_exactly() {
        let result = PredictionResult::new(ComplianceLabel::NonCompliant, 0.73);
        let json = serde_json::to_string(&result).unwrap();
        let back: PredictionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
