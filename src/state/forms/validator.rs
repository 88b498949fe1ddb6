//! Field validation rules

use super::field::{FieldKind, FormField};
use regex::Regex;
use std::sync::OnceLock;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const INVALID_PHONE_MESSAGE: &str = "Please enter a valid phone number";

static EMAIL_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
static PHONE_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn email_pattern() -> Option<&'static Regex> {
    EMAIL_PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

fn phone_pattern() -> Option<&'static Regex> {
    PHONE_PATTERN
        .get_or_init(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").ok())
        .as_ref()
}

/// Outcome of validating one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn invalid(message: &str) -> Self {
        Self {
            valid: false,
            message: Some(message.to_string()),
        }
    }
}

/// Validate a field against its declared constraints.
///
/// Rules run in order and the first failure wins: required, then the
/// email format, then the telephone format. Format rules only apply to
/// non-empty values.
pub fn validate(field: &FormField) -> ValidationResult {
    let value = field.value.trim();

    if field.required && value.is_empty() {
        return ValidationResult::invalid(REQUIRED_MESSAGE);
    }

    if value.is_empty() {
        return ValidationResult::ok();
    }

    match field.kind {
        FieldKind::Email if !is_valid_email(value) => {
            ValidationResult::invalid(INVALID_EMAIL_MESSAGE)
        }
        FieldKind::Telephone if !is_valid_phone(value) => {
            ValidationResult::invalid(INVALID_PHONE_MESSAGE)
        }
        _ => ValidationResult::ok(),
    }
}

/// Check the `local@domain.tld` shape: no whitespace, a single `@`, and a dot
/// somewhere after it.
pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_some_and(|re| re.is_match(value))
}

/// Check a phone number after stripping all whitespace: optional leading `+`,
/// a non-zero digit, then at most fifteen more digits.
pub fn is_valid_phone(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    phone_pattern().is_some_and(|re| re.is_match(&compact))
}
