//! Validation rules and input normalisation for lead forms

use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use validator::{ValidateEmail, ValidationError};

pub const MAX_MILEAGE: f64 = 500_000.0;

lazy_static! {
    // Current, prefix, suffix and dateless plate shapes.
    static ref UK_REGISTRATION_REGEX: Regex = Regex::new(
        r"(?i)^(?:[A-Z]{2}[0-9]{2}\s?[A-Z]{3}|[A-Z][0-9]{1,3}[A-Z]{3}|[A-Z]{3}[0-9]{1,3}[A-Z]|[0-9]{1,4}[A-Z]{1,2}|[0-9]{1,3}[A-Z]{1,3})$"
    ).unwrap();

    static ref UK_PHONE_REGEX: Regex = Regex::new(
        r"^(?:(?:\+44\s?7[0-9]{3}|\(?07[0-9]{3}\)?)\s?[0-9]{3}\s?[0-9]{3}|(?:\+44\s?[1-9][0-9]{2,4}|\(?0[1-9][0-9]{2,4}\)?)\s?[0-9]{4,6})$"
    ).unwrap();

    static ref PHONE_DISALLOWED_CHARS: Regex = Regex::new(r"[^0-9+\s]").unwrap();
}

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < 2 {
        return Err(rule_error("name", "Name must be at least 2 characters"));
    }
    Ok(())
}

pub fn validate_uk_registration(registration: &str) -> Result<(), ValidationError> {
    if registration.is_empty() {
        return Err(rule_error("uk_registration", "Registration cannot be empty"));
    }

    if !UK_REGISTRATION_REGEX.is_match(registration) {
        return Err(rule_error("uk_registration", "Invalid UK registration format"));
    }

    Ok(())
}

pub fn validate_uk_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() {
        return Err(rule_error("uk_phone", "Phone number cannot be empty"));
    }

    if !UK_PHONE_REGEX.is_match(phone) {
        return Err(rule_error("uk_phone", "Invalid UK phone number format"));
    }

    Ok(())
}

/// Empty mileage is allowed; anything else must be a number of miles within range.
pub fn validate_mileage(mileage: &str) -> Result<(), ValidationError> {
    if mileage.trim().is_empty() {
        return Ok(());
    }

    match parse_mileage(mileage) {
        Some(miles) if (0.0..=MAX_MILEAGE).contains(&miles) => Ok(()),
        Some(_) => Err(rule_error("mileage", "Mileage is out of range")),
        None => Err(rule_error("mileage", "Mileage must be a number")),
    }
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(rule_error("email", "Email cannot be empty"));
    }

    if email.len() > 254 || !email.validate_email() {
        return Err(rule_error("email", "Invalid email format"));
    }

    Ok(())
}

pub fn normalize_registration(registration: &str) -> String {
    registration.trim().to_uppercase()
}

/// Drops everything except digits, `+` and whitespace.
pub fn sanitize_phone(phone: &str) -> String {
    PHONE_DISALLOWED_CHARS.replace_all(phone, "").into_owned()
}

/// Parses a mileage that may carry thousands separators, e.g. `45,000`.
pub fn parse_mileage(mileage: &str) -> Option<f64> {
    let cleaned: String = mileage
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    cleaned.parse::<f64>().ok().filter(|miles| miles.is_finite())
}

/// Re-renders a typed mileage with separators; input that does not parse is left alone.
pub fn format_mileage_input(mileage: &str) -> String {
    match parse_mileage(mileage) {
        Some(miles) => crate::format::group_thousands(miles.trunc() as i64),
        None => mileage.to_string(),
    }
}
