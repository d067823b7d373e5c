//! Resend HTTP API client

use super::{EmailMessage, Mailer, MailerError, SendReceipt};
use crate::config::EmailConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
    name: Option<String>,
}

impl ResendMailer {
    pub fn new(api_key: impl Into<String>, api_base_url: &str, timeout: Duration) -> Result<Self, MailerError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(MailerError::Rejected("Missing API key".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}/emails", api_base_url.trim_end_matches('/')),
        })
    }

    pub fn from_config(config: &EmailConfig) -> Result<Self, MailerError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| MailerError::Rejected("Missing API key".to_string()))?;

        Self::new(
            api_key,
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, message: &EmailMessage) -> Result<SendReceipt, MailerError> {
        let payload = SendEmailRequest {
            from: &message.from,
            to: [&message.to],
            subject: &message.subject,
            html: &message.html,
            reply_to: message.reply_to.as_deref(),
        };

        debug!(endpoint = %self.endpoint, subject = %message.subject, "sending email via Resend");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body: SendEmailResponse = response.json().await?;
            return Ok(SendReceipt { id: body.id });
        }

        let raw = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(ErrorResponse { message: Some(message), .. }) => message,
            Ok(ErrorResponse { name: Some(name), .. }) => name,
            _ if !raw.trim().is_empty() => raw,
            _ => status
                .canonical_reason()
                .unwrap_or("Email provider error")
                .to_string(),
        };

        warn!(status = status.as_u16(), error = %message, "Resend rejected email");

        Err(MailerError::Provider {
            status: status.as_u16(),
            message,
        })
    }

    fn name(&self) -> &'static str {
        "resend"
    }
}
