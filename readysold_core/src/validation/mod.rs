//! Form validation shared with the marketing pages

pub mod rules;
pub mod validators;

pub use rules::*;
pub use validators::*;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
    pub code: String,
}

/// Outcome of validating a form; errors keep the order the form shows its fields in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldValidationError>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Flattens `validator` errors, ordering fields by `field_order` (unknown fields last).
    pub fn from_validation_errors(errors: ValidationErrors, field_order: &[&str]) -> Self {
        let mut result = Self::success();

        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| {
            let field: &str = field.as_ref();
            field_order
                .iter()
                .position(|known| *known == field)
                .unwrap_or(field_order.len())
        });

        for (field, field_errors) in fields {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation failed for field '{}'", field));
                result.push(&field.to_string(), &message, &error.code);
            }
        }

        result
    }

    fn push(&mut self, field: &str, message: &str, code: &str) {
        self.is_valid = false;
        self.errors.push(FieldValidationError {
            field: field.to_string(),
            message: message.to_string(),
            code: code.to_string(),
        });
    }


    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// The blocking alert the page shows, or `None` when the form is valid.
    pub fn alert_text(&self) -> Option<String> {
        if self.is_valid {
            return None;
        }
        Some(format!(
            "Please correct the following errors:\n\n{}",
            self.messages().join("\n")
        ))
    }
}

pub trait Validatable {
    fn validate_comprehensive(&self) -> ValidationResult;
}

/// Types validated through `validator` derive, with a fixed field order for reporting.
pub trait OrderedValidate: Validate {
    const FIELD_ORDER: &'static [&'static str];
}

impl<T> Validatable for T
where
    T: OrderedValidate,
{
    fn validate_comprehensive(&self) -> ValidationResult {
        match self.validate() {
            Ok(_) => ValidationResult::success(),
            Err(errors) => ValidationResult::from_validation_errors(errors, T::FIELD_ORDER),
        }
    }
}
