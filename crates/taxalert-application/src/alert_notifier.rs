//! Guarded alert-email workflow.
//!
//! An alert can only go out when the last prediction flagged non-compliance
//! and the profile carries a contact address. Repeated triggers are absorbed
//! by a single-slot token plus a short cooldown after each settled send; the
//! cooldown is a per-session debounce, not a cross-session idempotency key.

use crate::slot::InFlightSlot;
use std::sync::Arc;
use std::time::{Duration, Instant};
use taxalert_core::error::{Result, TaxAlertError};
use taxalert_core::ledger::{EmailLedgerRepository, EmailRecord};
use taxalert_core::prediction::PredictionResult;
use taxalert_core::service::EmailService;
use taxalert_core::taxpayer::TaxpayerProfile;

/// Fixed alert subject line.
pub const ALERT_SUBJECT: &str = "Alerte de non-conformité fiscale";

/// Fixed four-paragraph alert body, signed by the operator identity.
pub const ALERT_BODY: &str = "Bonjour,\n\nSuite à l'analyse de votre dossier fiscal, notre \
     système a détecté une situation de non-conformité. Nous vous invitons à régulariser votre \
     situation dans les plus brefs délais afin d'éviter toute sanction ou pénalité conformément \
     à la législation en vigueur.\n\nPour toute question ou assistance, n'hésitez pas à nous \
     contacter.\n\nCordialement,\nL'équipe TaxAlert";

const DEFAULT_COOLDOWN: Duration = Duration::from_secs(3);

/// Sends at most one non-compliance alert per trigger.
pub struct AlertNotifier {
    email: Arc<dyn EmailService>,
    ledger: Arc<dyn EmailLedgerRepository>,
    slot: InFlightSlot,
    cooldown: Duration,
    last_settled: tokio::sync::Mutex<Option<Instant>>,
}

impl AlertNotifier {
    pub fn new(email: Arc<dyn EmailService>, ledger: Arc<dyn EmailLedgerRepository>) -> Self {
        Self::with_cooldown(email, ledger, DEFAULT_COOLDOWN)
    }

    /// Creates a notifier with an explicit cooldown window.
    pub fn with_cooldown(
        email: Arc<dyn EmailService>,
        ledger: Arc<dyn EmailLedgerRepository>,
        cooldown: Duration,
    ) -> Self {
        Self {
            email,
            ledger,
            slot: InFlightSlot::new(),
            cooldown,
            last_settled: tokio::sync::Mutex::new(None),
        }
    }

    /// Whether the alert trigger should be offered at all: the last
    /// prediction must be non-compliant and the profile must carry a
    /// non-empty contact address.
    pub fn can_alert(last: Option<&PredictionResult>, profile: &TaxpayerProfile) -> bool {
        last.is_some_and(|result| result.is_non_compliant()) && profile.alert_address().is_some()
    }

    /// Composes and sends the alert for the given profile.
    ///
    /// # Errors
    ///
    /// - `Validation` when the guard does not hold (label compliant or
    ///   address empty).
    /// - `Busy` while a send is in flight or within the cooldown window of
    ///   the previous one, whatever its outcome.
    /// - `Request` when the email service fails; nothing is appended.
    pub async fn send_alert(
        &self,
        profile: &TaxpayerProfile,
        last: &PredictionResult,
    ) -> Result<EmailRecord> {
        if !last.is_non_compliant() {
            return Err(TaxAlertError::validation(
                "alert requires a non-compliant prediction",
            ));
        }
        let address = profile.alert_address().ok_or_else(|| {
            TaxAlertError::validation("alert requires a non-empty contact address")
        })?;

        {
            let last_settled = self.last_settled.lock().await;
            if let Some(settled_at) = *last_settled {
                if settled_at.elapsed() < self.cooldown {
                    return Err(TaxAlertError::Busy("alert email"));
                }
            }
        }

        let _guard = self
            .slot
            .try_acquire()
            .ok_or(TaxAlertError::Busy("alert email"))?;

        let send_result = self.email.send(address, ALERT_SUBJECT, ALERT_BODY).await;

        // The cooldown window opens when the attempt settles, success or not.
        *self.last_settled.lock().await = Some(Instant::now());

        if let Err(e) = send_result {
            tracing::warn!("Alert email to {} failed: {}", address, e);
            return Err(e);
        }

        let record = EmailRecord {
            timestamp: chrono::Utc::now().to_rfc3339(),
            email: address.to_string(),
            subject: ALERT_SUBJECT.to_string(),
            body: ALERT_BODY.to_string(),
        };
        self.ledger.append(&record).await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use taxalert_core::prediction::ComplianceLabel;

    struct MockEmailService {
        fail: bool,
        calls: Mutex<u32>,
    }

    impl MockEmailService {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                calls: Mutex::new(0),
            }
        }

        fn call_count(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl EmailService for MockEmailService {
        async fn send(&self, _email: &str, _subject: &str, _body: &str) -> Result<()> {
            *self.calls.lock().unwrap() += 1;
            if self.fail {
                Err(TaxAlertError::request("email", "smtp relay down"))
            } else {
                Ok(())
            }
        }
    }

    struct MockEmailLedger {
        records: Mutex<Vec<EmailRecord>>,
    }

    impl MockEmailLedger {
        fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
            }
        }

        fn len(&self) -> usize {
            self.records.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl EmailLedgerRepository for MockEmailLedger {
        async fn append(&self, record: &EmailRecord) -> Result<()> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }

        async fn list(&self) -> Result<Vec<EmailRecord>> {
            let mut records = self.records.lock().unwrap().clone();
            records.reverse();
            Ok(records)
        }
    }

    fn profile(email: Option<&str>) -> TaxpayerProfile {
        TaxpayerProfile {
            annual_revenue: 40_000_000.0,
            turnover: 80_000_000.0,
            late_payments: 2,
            past_sanctions: 1,
            sector: None,
            location: None,
            audit_count: 0,
            risk_level: None,
            contact_email: email.map(|e| e.to_string()),
        }
    }

    fn non_compliant() -> PredictionResult {
        PredictionResult::new(ComplianceLabel::NonCompliant, 0.73)
    }

    fn compliant() -> PredictionResult {
        PredictionResult::new(ComplianceLabel::Compliant, 0.12)
    }

    fn notifier(
        service: Arc<MockEmailService>,
        ledger: Arc<MockEmailLedger>,
        cooldown: Duration,
    ) -> AlertNotifier {
        AlertNotifier::with_cooldown(service, ledger, cooldown)
    }

    #[test]
    fn test_can_alert_guard() {
        assert!(AlertNotifier::can_alert(
            Some(&non_compliant()),
            &profile(Some("a@b.com"))
        ));
        // No address.
        assert!(!AlertNotifier::can_alert(Some(&non_compliant()), &profile(None)));
        // Compliant label.
        assert!(!AlertNotifier::can_alert(
            Some(&compliant()),
            &profile(Some("a@b.com"))
        ));
        // No prediction yet.
        assert!(!AlertNotifier::can_alert(None, &profile(Some("a@b.com"))));
    }

    #[tokio::test]
    async fn test_successful_send_appends_templated_record() {
        let service = Arc::new(MockEmailService::new(false));
        let ledger = Arc::new(MockEmailLedger::new());
        let notifier = notifier(service, ledger.clone(), Duration::ZERO);

        let record = notifier
            .send_alert(&profile(Some("a@b.com")), &non_compliant())
            .await
            .unwrap();

        assert_eq!(record.email, "a@b.com");
        assert_eq!(record.subject, ALERT_SUBJECT);
        assert!(record.body.starts_with("Bonjour,"));
        assert!(record.body.ends_with("L'équipe TaxAlert"));
        assert_eq!(ledger.len(), 1);
    }

    #[tokio::test]
    async fn test_compliant_label_is_rejected_before_sending() {
        let service = Arc::new(MockEmailService::new(false));
        let ledger = Arc::new(MockEmailLedger::new());
        let notifier = notifier(service.clone(), ledger.clone(), Duration::ZERO);

        let err = notifier
            .send_alert(&profile(Some("a@b.com")), &compliant())
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(service.call_count(), 0);
        assert_eq!(ledger.len(), 0);
    }

    #[tokio::test]
    async fn test_empty_address_is_rejected_before_sending() {
        let service = Arc::new(MockEmailService::new(false));
        let ledger = Arc::new(MockEmailLedger::new());
        let notifier = notifier(service.clone(), ledger.clone(), Duration::ZERO);

        let err = notifier
            .send_alert(&profile(Some("   ")), &non_compliant())
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn test_delivery_failure_appends_nothing() {
        let service = Arc::new(MockEmailService::new(true));
        let ledger = Arc::new(MockEmailLedger::new());
        let notifier = notifier(service, ledger.clone(), Duration::ZERO);

        let err = notifier
            .send_alert(&profile(Some("a@b.com")), &non_compliant())
            .await
            .unwrap_err();

        assert!(err.is_request());
        assert_eq!(ledger.len(), 0);
    }

    #[tokio::test]
    async fn test_cooldown_rejects_immediate_retry() {
        let service = Arc::new(MockEmailService::new(false));
        let ledger = Arc::new(MockEmailLedger::new());
        let notifier = notifier(service.clone(), ledger.clone(), Duration::from_millis(80));

        notifier
            .send_alert(&profile(Some("a@b.com")), &non_compliant())
            .await
            .unwrap();

        let err = notifier
            .send_alert(&profile(Some("a@b.com")), &non_compliant())
            .await
            .unwrap_err();
        assert!(err.is_busy());
        assert_eq!(service.call_count(), 1);

        tokio::time::sleep(Duration::from_millis(100)).await;
        notifier
            .send_alert(&profile(Some("a@b.com")), &non_compliant())
            .await
            .unwrap();
        assert_eq!(ledger.len(), 2);
    }

    #[tokio::test]
    async fn test_cooldown_also_opens_after_a_failed_send() {
        let service = Arc::new(MockEmailService::new(true));
        let ledger = Arc::new(MockEmailLedger::new());
        let notifier = notifier(service.clone(), ledger, Duration::from_millis(80));

        let _ = notifier
            .send_alert(&profile(Some("a@b.com")), &non_compliant())
            .await;

        let err = notifier
            .send_alert(&profile(Some("a@b.com")), &non_compliant())
            .await
            .unwrap_err();
        assert!(err.is_busy());
        assert_eq!(service.call_count(), 1);
    }
}
