//! In-process mailer that logs messages and keeps the most recent ones

use super::{EmailMessage, Mailer, MailerError, SendReceipt};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

pub const DEFAULT_OUTBOX_CAPACITY: usize = 100;

#[derive(Clone)]
pub struct OutboxMailer {
    sent: Arc<Mutex<VecDeque<(SendReceipt, EmailMessage)>>>,
    failure: Arc<Mutex<Option<String>>>,
    capacity: usize,
}

impl Default for OutboxMailer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_OUTBOX_CAPACITY)
    }
}

impl OutboxMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps at most `capacity` messages, dropping the oldest first. Zero keeps none.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sent: Arc::new(Mutex::new(VecDeque::with_capacity(capacity.min(DEFAULT_OUTBOX_CAPACITY)))),
            failure: Arc::new(Mutex::new(None)),
            capacity,
        }
    }

    /// A mailer whose every send fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        let mailer = Self::new();
        mailer.fail_with(message);
        mailer
    }

    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock() = Some(message.into());
    }

    pub fn recover(&self) {
        *self.failure.lock() = None;
    }

    pub fn messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().iter().map(|(_, message)| message.clone()).collect()
    }

    pub fn receipts(&self) -> Vec<SendReceipt> {
        self.sent.lock().iter().map(|(receipt, _)| receipt.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.lock().is_empty()
    }
}

#[async_trait]
impl Mailer for OutboxMailer {
    async fn send(&self, message: &EmailMessage) -> Result<SendReceipt, MailerError> {
        if let Some(reason) = self.failure.lock().clone() {
            return Err(MailerError::Rejected(reason));
        }

        let receipt = SendReceipt {
            id: Uuid::new_v4().to_string(),
        };

        info!(id = %receipt.id, bytes = message.html.len(), "email captured in outbox");
        debug!(id = %receipt.id, to = %message.to, subject = %message.subject, "outbox message");

        if self.capacity > 0 {
            let mut sent = self.sent.lock();
            while sent.len() >= self.capacity {
                sent.pop_front();
            }
            sent.push_back((receipt.clone(), message.clone()));
        }

        Ok(receipt)
    }

    fn name(&self) -> &'static str {
        "outbox"
    }
}
