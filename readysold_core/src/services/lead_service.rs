use crate::{
    config::EmailConfig,
    email::{EmailMessage, Mailer, SendReceipt},
    error::Result,
    models::LeadSubmission,
    templates::{self, EmailDocument, TemplateContext},
    validation::validate_email,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

/// Turns a checked lead into the outgoing emails and sends them.
#[derive(Clone)]
pub struct LeadService {
    mailer: Arc<dyn Mailer>,
    config: EmailConfig,
}

impl LeadService {
    pub fn new(mailer: Arc<dyn Mailer>, config: EmailConfig) -> Self {
        Self { mailer, config }
    }

    pub fn mailer_name(&self) -> &'static str {
        self.mailer.name()
    }

    pub async fn submit(&self, submission: &LeadSubmission) -> Result<SendReceipt> {
        self.submit_at(submission, Utc::now()).await
    }

    /// Sends the team notification, then the customer confirmation when enabled.
    /// The returned receipt is the notification's.
    pub async fn submit_at(&self, submission: &LeadSubmission, submitted_at: DateTime<Utc>) -> Result<SendReceipt> {
        let ctx = TemplateContext::from_config(&self.config, submitted_at);
        let form_type = submission.form_type();
        let data = submission.data();

        let notification = self.address(
            templates::render_notification(submission, &ctx),
            &self.config.notify_to,
            data.email.clone(),
        );
        let receipt = self.mailer.send(&notification).await?;

        info!(
            form_type = %form_type,
            message_id = %receipt.id,
            mailer = self.mailer.name(),
            "lead notification sent"
        );

        if let Some(customer) = self.confirmation_recipient(submission) {
            let confirmation = self.address(
                templates::render_confirmation(submission, &ctx),
                customer,
                Some(self.config.notify_to.clone()),
            );
            let confirmation_receipt = self.mailer.send(&confirmation).await?;

            info!(
                form_type = %form_type,
                message_id = %confirmation_receipt.id,
                "customer confirmation sent"
            );
        }

        Ok(receipt)
    }

    fn confirmation_recipient<'a>(&self, submission: &'a LeadSubmission) -> Option<&'a str> {
        if !self.config.send_confirmation {
            return None;
        }

        let email = submission.data().email.as_deref()?.trim();
        match validate_email(email) {
            Ok(()) => Some(email),
            Err(_) => {
                warn!(form_type = %submission.form_type(), "skipping confirmation for malformed address");
                None
            }
        }
    }

    fn address(&self, document: EmailDocument, to: &str, reply_to: Option<String>) -> EmailMessage {
        EmailMessage {
            from: self.config.from.clone(),
            to: to.to_string(),
            subject: document.subject,
            html: document.html,
            reply_to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::{MailerError, OutboxMailer};
    use crate::error::AppError;
    use crate::models::LeadData;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Accepts the first message and rejects every later one.
    #[derive(Default)]
    struct AcceptsOnce {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Mailer for AcceptsOnce {
        async fn send(&self, _message: &EmailMessage) -> std::result::Result<SendReceipt, MailerError> {
            match self.calls.fetch_add(1, Ordering::SeqCst) {
                0 => Ok(SendReceipt { id: "first".to_string() }),
                _ => Err(MailerError::Rejected("Confirmation bounced".to_string())),
            }
        }

        fn name(&self) -> &'static str {
            "accepts-once"
        }
    }

    fn service(mailer: &OutboxMailer, send_confirmation: bool) -> LeadService {
        let config = EmailConfig {
            send_confirmation,
            ..EmailConfig::default()
        };
        LeadService::new(Arc::new(mailer.clone()), config)
    }

    fn lead(email: Option<&str>) -> LeadSubmission {
        LeadSubmission::Valuation(LeadData {
            name: Some("Jane Doe".to_string()),
            email: email.map(str::to_string),
            registration: Some("AB12CDE".to_string()),
            ..LeadData::default()
        })
    }

    #[tokio::test]
    async fn test_notification_goes_to_the_team() {
        let mailer = OutboxMailer::new();
        let receipt = service(&mailer, false)
            .submit(&lead(Some("jane@example.com")))
            .await
            .unwrap();

        let sent = mailer.messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "hello@readysold.co.uk");
        assert_eq!(sent[0].from, "ReadySold <noreply@readysold.co.uk>");
        assert_eq!(sent[0].reply_to.as_deref(), Some("jane@example.com"));
        assert_eq!(sent[0].subject, "New Valuation Request - AB12CDE");
        assert_eq!(mailer.receipts()[0], receipt);
    }

    #[tokio::test]
    async fn test_confirmation_sent_to_customer() {
        let mailer = OutboxMailer::new();
        let receipt = service(&mailer, true)
            .submit(&lead(Some(" jane@example.com ")))
            .await
            .unwrap();

        let sent = mailer.messages();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].to, "jane@example.com");
        assert_eq!(sent[1].reply_to.as_deref(), Some("hello@readysold.co.uk"));
        assert!(sent[1].subject.starts_with("We've received your request"));
        assert_eq!(mailer.receipts()[0], receipt);
    }

    #[tokio::test]
    async fn test_confirmation_skipped_without_usable_address() {
        let mailer = OutboxMailer::new();
        let service = service(&mailer, true);

        service.submit(&lead(None)).await.unwrap();
        service.submit(&lead(Some("not-an-address"))).await.unwrap();

        assert_eq!(mailer.len(), 2);
        assert!(mailer.messages().iter().all(|m| m.to == "hello@readysold.co.uk"));
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces_as_delivery_error() {
        let mailer = OutboxMailer::failing("API key is invalid");
        let err = service(&mailer, true).submit(&lead(None)).await.unwrap_err();

        match err {
            AppError::EmailDelivery(inner) => assert_eq!(inner.to_string(), "API key is invalid"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_confirmation_failure_surfaces_as_delivery_error() {
        let mailer = Arc::new(AcceptsOnce::default());
        let config = EmailConfig {
            send_confirmation: true,
            ..EmailConfig::default()
        };
        let service = LeadService::new(mailer.clone(), config);

        let err = service.submit(&lead(Some("jane@example.com"))).await.unwrap_err();

        assert_eq!(mailer.calls.load(Ordering::SeqCst), 2);
        match err {
            AppError::EmailDelivery(inner) => assert_eq!(inner.to_string(), "Confirmation bounced"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
