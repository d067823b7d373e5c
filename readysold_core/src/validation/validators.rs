//! Validators for the lead forms

use super::{rules::*, OrderedValidate, Validatable, ValidationResult};
use crate::models::LeadData;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// The valuation form after the page's own input formatting has been applied.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ValuationFormValidator {
    #[validate(custom(function = "validate_name", message = "Please enter a valid name"))]
    pub name: String,

    #[validate(custom(function = "validate_uk_phone", message = "Please enter a valid UK phone number"))]
    pub phone: String,

    #[validate(custom(function = "validate_uk_registration", message = "Please enter a valid UK registration number"))]
    pub registration: String,

    #[validate(custom(function = "validate_mileage", message = "Please enter a valid mileage"))]
    pub mileage: String,
}

impl OrderedValidate for ValuationFormValidator {
    const FIELD_ORDER: &'static [&'static str] = &["name", "phone", "registration", "mileage"];
}

impl ValuationFormValidator {
    pub fn from_lead(data: &LeadData) -> Self {
        Self {
            name: data.name.clone().unwrap_or_default(),
            phone: data.phone.as_deref().map(sanitize_phone).unwrap_or_default(),
            registration: data
                .registration
                .as_deref()
                .map(normalize_registration)
                .unwrap_or_default(),
            mileage: data.mileage.clone().unwrap_or_default(),
        }
    }
}

/// Checks a lead the way the valuation form does before submitting.
pub fn validate_valuation_form(data: &LeadData) -> ValidationResult {
    ValuationFormValidator::from_lead(data).validate_comprehensive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(name: &str, phone: &str, registration: &str, mileage: &str) -> LeadData {
        let field = |value: &str| (!value.is_empty()).then(|| value.to_string());
        LeadData {
            name: field(name),
            phone: field(phone),
            registration: field(registration),
            mileage: field(mileage),
            ..LeadData::default()
        }
    }

    #[test]
    fn test_valid_form() {
        let result = validate_valuation_form(&lead("Jane Doe", "07123 456789", "ab12 cde", "45,000"));
        assert!(result.is_valid);
        assert!(result.alert_text().is_none());
    }

    #[test]
    fn test_errors_follow_form_order() {
        let result = validate_valuation_form(&lead("J", "12345", "1234", "600000"));

        assert!(!result.is_valid);
        assert_eq!(
            result.messages(),
            vec![
                "Please enter a valid name",
                "Please enter a valid UK phone number",
                "Please enter a valid UK registration number",
                "Please enter a valid mileage",
            ]
        );
        let fields: Vec<_> = result.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "phone", "registration", "mileage"]);
    }

    #[test]
    fn test_registration_is_upper_cased_before_checking() {
        let validator = ValuationFormValidator::from_lead(&lead("Jane", "07123456789", " ab12cde", ""));
        assert_eq!(validator.registration, "AB12CDE");
        assert!(validator.validate_comprehensive().is_valid);
    }

    #[test]
    fn test_phone_punctuation_is_stripped_before_checking() {
        let validator = ValuationFormValidator::from_lead(&lead("Jane", "(07123) 456-789", "AB12CDE", ""));
        assert_eq!(validator.phone, "07123 456789");
        assert!(validator.validate_comprehensive().is_valid);
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let result = validate_valuation_form(&LeadData::default());
        assert_eq!(result.errors.len(), 3);
        assert!(!result.messages().contains(&"Please enter a valid mileage".to_string()));
    }
}
