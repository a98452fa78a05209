//! Interface boundaries of the three external services.
//!
//! Only the request/response contracts matter here; implementations live in
//! the interaction layer and the application layer depends on these traits
//! so it can be exercised without a network.

use crate::chat::ChatAnswer;
use crate::error::Result;
use crate::prediction::PredictionResult;
use crate::taxpayer::TaxpayerProfile;
use async_trait::async_trait;

/// Compliance-risk inference service (`POST /predict`).
#[async_trait]
pub trait InferenceService: Send + Sync {
    /// Requests a prediction for the given profile.
    ///
    /// # Errors
    ///
    /// Returns a `Request` error on transport failure or a non-success
    /// response.
    async fn predict(&self, profile: &TaxpayerProfile) -> Result<PredictionResult>;
}

/// Alert email delivery service (`POST /send_email`).
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Sends one email; no structured response beyond success/failure.
    async fn send(&self, email: &str, subject: &str, body: &str) -> Result<()>;
}

/// Knowledge-grounded answer service (`POST /api/chat`).
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Asks one question and returns the raw answer with its citations.
    async fn ask(&self, question: &str) -> Result<ChatAnswer>;
}
