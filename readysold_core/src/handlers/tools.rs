//! Form validation and fee calculator endpoints used by the pages

use crate::{
    error::{AppError, Result},
    extractors::LenientJson,
    models::{ApiResponse, LeadData},
    pricing::{FeeQuote, FeeQuoteDisplay},
    validation::{
        format_mileage_input, normalize_registration, sanitize_phone, validate_valuation_form,
        FieldValidationError,
    },
    AppState,
};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
pub struct ValidateRequest {
    #[serde(default)]
    pub data: LeadData,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub errors: Vec<FieldValidationError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
    pub normalized: NormalizedFields,
}

/// Field values as the form re-renders them while the user types.
#[derive(Debug, Serialize)]
pub struct NormalizedFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<String>,
}

impl NormalizedFields {
    fn from_lead(data: &LeadData) -> Self {
        Self {
            registration: data.registration.as_deref().map(normalize_registration),
            phone: data.phone.as_deref().map(sanitize_phone),
            mileage: data.mileage.as_deref().map(format_mileage_input),
        }
    }
}

/// Advisory only: the result is for the page to show, nothing is enforced here.
pub async fn handle_validate(
    LenientJson(request): LenientJson<ValidateRequest>,
) -> impl IntoResponse {
    let result = validate_valuation_form(&request.data);
    debug!("POST /api/validate - valid: {}", result.is_valid);

    Json(ApiResponse::success(ValidateResponse {
        valid: result.is_valid,
        alert: result.alert_text(),
        errors: result.errors,
        normalized: NormalizedFields::from_lead(&request.data),
    }))
}

#[derive(Debug, Deserialize)]
pub struct FeesQuery {
    price: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FeesResponse {
    #[serde(flatten)]
    pub quote: FeeQuote,
    pub display: FeeQuoteDisplay,
    pub rate: f64,
    pub minimum_fee: f64,
}

pub async fn handle_fees(
    State(state): State<AppState>,
    Query(params): Query<FeesQuery>,
) -> Result<impl IntoResponse> {
    let price = params
        .price
        .ok_or_else(|| AppError::BadRequest("Missing price".to_string()))?;

    let quote = state
        .fee_schedule
        .quote_input(&price)
        .ok_or_else(|| AppError::BadRequest("Invalid price".to_string()))?;

    Ok(Json(ApiResponse::success(FeesResponse {
        display: quote.display(),
        quote,
        rate: state.fee_schedule.rate,
        minimum_fee: state.fee_schedule.minimum_fee,
    })))
}
