//! Input validation shared by the gateway and the server
//!
//! Field-level rules that do not depend on the operation are declared with
//! `validator` derives on the input types. Rules that only apply on create or
//! on update are checked by [`ValidateInput::violations`], which receives the
//! mode explicitly.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use validator::ValidationErrors;

use crate::error::{AppError, AppResult};

/// Pattern every user email must match
pub static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w!#$%'*+/=?`{|}~^-]+(?:\.[\w!#$%'*+/=?`{|}~^-]+)*@(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,6}$")
        .expect("email pattern is valid")
});

/// Which group of constraints applies to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    Update,
}

/// One violated constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Mode-aware validation of a request DTO
pub trait ValidateInput {
    fn violations(&self, mode: ValidationMode) -> Vec<FieldViolation>;

    fn validate_for(&self, mode: ValidationMode) -> AppResult<()> {
        let violations = self.violations(mode);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(violations))
        }
    }
}

/// Flatten `validator` errors, sorted by field name so output is stable
pub fn violations_from(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                FieldViolation::new(field.to_string(), message)
            })
        })
        .collect();
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(violations_from(&errors))
    }
}

pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
