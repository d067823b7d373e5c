//! Request and response models

use serde::{Deserialize, Serialize};

/// Body returned when a lead email was accepted by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResponse {
    pub success: bool,
    pub message_id: String,
}

impl SendEmailResponse {
    pub fn sent(message_id: impl Into<String>) -> Self {
        Self {
            success: true,
            message_id: message_id.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}
