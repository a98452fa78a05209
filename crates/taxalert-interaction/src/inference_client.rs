//! HTTP client for the compliance-risk inference service.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use taxalert_core::error::{Result, TaxAlertError};
use taxalert_core::prediction::{ComplianceLabel, PredictionResult};
use taxalert_core::service::InferenceService;
use taxalert_core::taxpayer::TaxpayerProfile;
use taxalert_infrastructure::ServiceConfig;

const SERVICE_NAME: &str = "inference";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Request body for `POST /predict`.
///
/// Field names are part of the external contract and must match the model's
/// training columns exactly, diacritics included. Unset catalog fields are
/// forwarded as empty strings; the service is authoritative for them.
#[derive(Debug, Serialize)]
struct PredictRequest {
    revenu_annuel: f64,
    retards_paiement: u32,
    #[serde(rename = "sanctions_passées")]
    sanctions_passees: u32,
    #[serde(rename = "secteur_activité")]
    secteur_activite: String,
    chiffre_affaire: f64,
    localisation: String,
    nb_controles: u32,
    niveau_risque: String,
}

impl From<&TaxpayerProfile> for PredictRequest {
    fn from(profile: &TaxpayerProfile) -> Self {
        Self {
            revenu_annuel: profile.annual_revenue,
            retards_paiement: profile.late_payments,
            sanctions_passees: profile.past_sanctions,
            secteur_activite: profile
                .sector
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            chiffre_affaire: profile.turnover,
            localisation: profile
                .location
                .map(|c| c.as_str().to_string())
                .unwrap_or_default(),
            nb_controles: profile.audit_count,
            niveau_risque: profile
                .risk_level
                .map(|r| r.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    prediction: u8,
    probability: f64,
}

/// Client for the inference service.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    base_url: String,
}

impl InferenceClient {
    /// Creates a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Creates a client from the service configuration.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.inference_url.clone())
    }
}

#[async_trait]
impl InferenceService for InferenceClient {
    async fn predict(&self, profile: &TaxpayerProfile) -> Result<PredictionResult> {
        let url = format!("{}/predict", self.base_url);
        let body = PredictRequest::from(profile);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| TaxAlertError::request(SERVICE_NAME, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TaxAlertError::request(
                SERVICE_NAME,
                format!("status {}: {}", status, error_text),
            ));
        }

        let parsed: PredictResponse = response
            .json()
            .await
            .map_err(|e| TaxAlertError::request(SERVICE_NAME, format!("invalid response: {}", e)))?;

        let label = ComplianceLabel::try_from(parsed.prediction)
            .map_err(|e| TaxAlertError::request(SERVICE_NAME, e))?;

        Ok(PredictionResult::new(label, parsed.probability))
    }
}
