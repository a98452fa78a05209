//! Advisory recommendations derived from a profile and its prediction.
//!
//! The rules are independent and order-sensitive: they are evaluated in a
//! fixed order, every matching rule fires, and none suppresses another.

use crate::prediction::PredictionResult;
use crate::taxpayer::{RiskLevel, TaxpayerProfile};

/// Computes the ordered advisory list for a prediction.
///
/// Deterministic: the same profile always yields the same sequence. The
/// prediction itself does not influence the current rules but is part of the
/// contract so future rules can use it.
pub fn recommendations_for(
    profile: &TaxpayerProfile,
    _prediction: &PredictionResult,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if profile.late_payments > 0 {
        recommendations.push(format!(
            "Vous avez {} retard(s) de paiement. Veuillez régulariser.",
            profile.late_payments
        ));
    }

    if profile.past_sanctions > 0 {
        recommendations.push(format!(
            "{} sanction(s) passée(s) détectée(s).",
            profile.past_sanctions
        ));
    }

    if profile.risk_level == Some(RiskLevel::High) {
        recommendations
            .push("Niveau de risque élevé détecté. Vérification recommandée.".to_string());
    }

    recommendations
}
