//! Comment model and related types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::{is_blank, violations_from, FieldViolation, ValidateInput, ValidationMode};

/// Comment record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub item_id: i64,
    pub author_id: i64,
    pub created: NaiveDateTime,
}

/// Comment with its author's name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentDetails {
    pub id: i64,
    pub text: String,
    #[serde(skip_serializing, default)]
    pub item_id: i64,
    pub author_name: String,
    pub created: NaiveDateTime,
}

/// Create comment request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CommentInput {
    #[validate(length(max = 2000, message = "The comment must be at most 2000 characters."))]
    pub text: Option<String>,
}

impl ValidateInput for CommentInput {
    fn violations(&self, _mode: ValidationMode) -> Vec<FieldViolation> {
        let mut violations = self
            .validate()
            .err()
            .map(|e| violations_from(&e))
            .unwrap_or_default();
        if is_blank(self.text.as_deref()) {
            violations.push(FieldViolation::new("text", "The comment text must not be empty."));
        }
        violations
    }
}
