//! Outbound transactional email

pub mod outbox;
pub mod resend;

pub use outbox::OutboxMailer;
pub use resend::ResendMailer;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single-recipient HTML email ready to hand to a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    pub reply_to: Option<String>,
}

/// What the provider handed back for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReceipt {
    pub id: String,
}

#[derive(Error, Debug)]
pub enum MailerError {
    /// The provider answered with a non-success status.
    #[error("{message}")]
    Provider { status: u16, message: String },

    #[error("Email transport error: {0}")]
    Transport(String),

    #[error("Unexpected provider response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Rejected(String),
}

impl From<reqwest::Error> for MailerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            MailerError::InvalidResponse(err.to_string())
        } else {
            MailerError::Transport(err.to_string())
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<SendReceipt, MailerError>;

    /// Short provider name for logs and health output.
    fn name(&self) -> &'static str;
}
