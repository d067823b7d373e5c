//! Lead email endpoint

use crate::{
    error::{AppError, Result},
    extractors::LenientJson,
    models::{LeadEnvelope, LeadSubmission, SendEmailResponse},
    AppState,
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::info;

pub async fn handle_send_email(
    State(state): State<AppState>,
    LenientJson(envelope): LenientJson<LeadEnvelope>,
) -> Result<impl IntoResponse> {
    let submission = LeadSubmission::try_from(envelope)?;

    info!("POST /api/send-email - form: {}", submission.form_type());

    let receipt = state.lead_service.submit(&submission).await?;

    Ok(Json(SendEmailResponse::sent(receipt.id)))
}

/// CORS preflight; the headers themselves come from the CORS layer.
pub async fn handle_preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn handle_method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
