//! User model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::{
    is_blank, is_valid_email, violations_from, FieldViolation, ValidateInput, ValidationMode,
};

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Short user representation embedded in bookings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserShort {
    pub id: i64,
    pub name: String,
}

impl From<&User> for UserShort {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

/// Create or update user request
///
/// On create both fields are required. On update absent fields are left
/// unchanged, but a provided email must still be well formed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserInput {
    #[validate(length(max = 255, message = "The name must be at most 255 characters."))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(max = 512, message = "The email must be at most 512 characters."))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserInput {
    /// Same input with surrounding whitespace removed
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.map(|v| v.trim().to_string()),
            email: self.email.map(|v| v.trim().to_string()),
        }
    }
}

impl ValidateInput for UserInput {
    fn violations(&self, mode: ValidationMode) -> Vec<FieldViolation> {
        let mut violations = self
            .validate()
            .err()
            .map(|e| violations_from(&e))
            .unwrap_or_default();

        if mode == ValidationMode::Create {
            if is_blank(self.name.as_deref()) {
                violations.push(FieldViolation::new("name", "The name must not be empty."));
            }
            if is_blank(self.email.as_deref()) {
                violations.push(FieldViolation::new("email", "The email must not be empty."));
            }
        } else if self.name.as_deref().is_some_and(|v| v.trim().is_empty()) {
            violations.push(FieldViolation::new("name", "The name must not be empty."));
        }

        if let Some(email) = self.email.as_deref() {
            let reported_blank = mode == ValidationMode::Create && email.trim().is_empty();
            if !reported_blank && !is_valid_email(email) {
                violations.push(FieldViolation::new("email", "The email is incorrect."));
            }
        }

        violations
    }
}
