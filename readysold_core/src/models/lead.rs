//! Lead submissions as they arrive from the marketing pages

use crate::error::AppError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Which page form produced the lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormType {
    #[serde(rename = "valuation")]
    Valuation,
    #[serde(rename = "hero-form")]
    HeroForm,
}

impl FormType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::Valuation => "valuation",
            FormType::HeroForm => "hero-form",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "valuation" => Ok(FormType::Valuation),
            "hero-form" => Ok(FormType::HeroForm),
            _ => Err(AppError::InvalidFormType),
        }
    }
}

/// Contact and vehicle details. Every field is optional; empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadData {
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub mileage: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub expected_price: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Form pages post numbers and strings interchangeably, so both are kept as text.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Raw request body before any checks: `{ "type": ..., "data": ... }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadEnvelope {
    #[serde(rename = "type", default)]
    pub kind: Option<Value>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// A checked lead, one variant per form.
#[derive(Debug, Clone, PartialEq)]
pub enum LeadSubmission {
    Valuation(LeadData),
    HeroForm(LeadData),
}

impl LeadSubmission {
    pub fn new(form_type: FormType, data: LeadData) -> Self {
        match form_type {
            FormType::Valuation => LeadSubmission::Valuation(data),
            FormType::HeroForm => LeadSubmission::HeroForm(data),
        }
    }

    pub fn form_type(&self) -> FormType {
        match self {
            LeadSubmission::Valuation(_) => FormType::Valuation,
            LeadSubmission::HeroForm(_) => FormType::HeroForm,
        }
    }

    pub fn data(&self) -> &LeadData {
        match self {
            LeadSubmission::Valuation(data) | LeadSubmission::HeroForm(data) => data,
        }
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl TryFrom<LeadEnvelope> for LeadSubmission {
    type Error = AppError;

    fn try_from(envelope: LeadEnvelope) -> Result<Self, Self::Error> {
        let kind = envelope.kind.filter(is_present).ok_or(AppError::MissingFields)?;
        let data = match envelope.data {
            Some(Value::Object(map)) => map,
            _ => return Err(AppError::MissingFields),
        };

        let form_type = match kind {
            Value::String(s) => s.parse::<FormType>()?,
            _ => return Err(AppError::InvalidFormType),
        };

        let data: LeadData = serde_json::from_value(Value::Object(data))
            .map_err(|e| AppError::BadRequest(format!("Invalid lead data: {}", e)))?;

        Ok(LeadSubmission::new(form_type, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> LeadEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valuation_submission() {
        let submission = LeadSubmission::try_from(envelope(json!({
            "type": "valuation",
            "data": {
                "name": "Jane Doe",
                "registration": "AB12CDE",
                "mileage": 42000,
                "expectedPrice": "12500",
                "condition": "excellent"
            }
        })))
        .unwrap();

        assert_eq!(submission.form_type(), FormType::Valuation);
        let data = submission.data();
        assert_eq!(data.name.as_deref(), Some("Jane Doe"));
        assert_eq!(data.mileage.as_deref(), Some("42000"));
        assert_eq!(data.expected_price.as_deref(), Some("12500"));
        assert!(data.email.is_none());
    }

    #[test]
    fn test_hero_form_submission_with_empty_data() {
        let submission = LeadSubmission::try_from(envelope(json!({
            "type": "hero-form",
            "data": {}
        })))
        .unwrap();

        assert_eq!(submission, LeadSubmission::HeroForm(LeadData::default()));
    }

    #[test]
    fn test_missing_fields() {
        for body in [
            json!({}),
            json!({ "type": "valuation" }),
            json!({ "data": { "name": "Jane" } }),
            json!({ "type": "", "data": {} }),
            json!({ "type": null, "data": {} }),
            json!({ "type": "valuation", "data": null }),
            json!({ "type": "valuation", "data": "AB12CDE" }),
        ] {
            let err = LeadSubmission::try_from(envelope(body.clone())).unwrap_err();
            assert!(matches!(err, AppError::MissingFields), "body: {}", body);
        }
    }

    #[test]
    fn test_invalid_form_type() {
        for kind in [json!("contact"), json!("Valuation"), json!(7), json!(["valuation"])] {
            let err = LeadSubmission::try_from(envelope(json!({ "type": kind, "data": {} }))).unwrap_err();
            assert!(matches!(err, AppError::InvalidFormType));
        }
    }

    #[test]
    fn test_empty_strings_and_odd_values_are_absent() {
        let data: LeadData = serde_json::from_value(json!({
            "name": "",
            "phone": null,
            "email": ["a@b.com"],
            "condition": true,
            "unknown": "ignored"
        }))
        .unwrap();

        assert_eq!(data, LeadData::default());
    }

    #[test]
    fn test_form_type_round_trips_wire_names() {
        assert_eq!("hero-form".parse::<FormType>().unwrap(), FormType::HeroForm);
        assert_eq!(FormType::Valuation.to_string(), "valuation");
        assert_eq!(serde_json::to_value(FormType::HeroForm).unwrap(), json!("hero-form"));
    }
}
