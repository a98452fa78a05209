//! HTTP client for the knowledge-grounded answer service.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use taxalert_core::chat::ChatAnswer;
use taxalert_core::error::{Result, TaxAlertError};
use taxalert_core::service::AnswerService;
use taxalert_infrastructure::ServiceConfig;

const SERVICE_NAME: &str = "answer";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Request body for `POST /api/chat`.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    question: &'a str,
    include_sources: bool,
}

/// Client for the answer service.
#[derive(Clone)]
pub struct AnswerClient {
    client: Client,
    base_url: String,
    include_sources: bool,
}

impl AnswerClient {
    /// Creates a client for the given base URL.
    pub fn new(base_url: impl Into<String>, include_sources: bool) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            include_sources,
        }
    }

    /// Creates a client from the service configuration.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.answer_url.clone(), config.include_sources)
    }
}

#[async_trait]
impl AnswerService for AnswerClient {
    async fn ask(&self, question: &str) -> Result<ChatAnswer> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            question,
            include_sources: self.include_sources,
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

        response
            .json::<ChatAnswer>()
            .await
            .map_err(|e| TaxAlertError::request(SERVICE_NAME, format!("invalid response: {}", e)))
    }
}
