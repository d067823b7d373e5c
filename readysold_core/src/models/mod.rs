//! Data models for lead capture

pub mod lead;
pub mod request;

pub use lead::{FormType, LeadData, LeadEnvelope, LeadSubmission};
pub use request::{ApiResponse, SendEmailResponse};
