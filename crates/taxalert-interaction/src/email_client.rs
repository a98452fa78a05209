//! HTTP client for the alert email delivery service.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use taxalert_core::error::{Result, TaxAlertError};
use taxalert_core::service::EmailService;
use taxalert_infrastructure::ServiceConfig;

const SERVICE_NAME: &str = "email";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Request body for `POST /send_email`.
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    email: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Client for the email service.
///
/// The service returns no structured response; only the status matters.
#[derive(Clone)]
pub struct EmailClient {
    client: Client,
    base_url: String,
}

impl EmailClient {
    /// Creates a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Creates a client from the service configuration.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.email_url.clone())
    }
}

#[async_trait]
impl EmailService for EmailClient {
    async fn send(&self, email: &str, subject: &str, body: &str) -> Result<()> {
        let url = format!("{}/send_email", self.base_url);
        let request = SendEmailRequest {
            email,
            subject,
            body,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
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

        tracing::info!("Alert email accepted for delivery to {}", email);
        Ok(())
    }
}
