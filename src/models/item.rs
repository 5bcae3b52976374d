//! Item (shareable thing) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::booking::BookingShort;
use super::comment::CommentDetails;
use crate::validation::{is_blank, violations_from, FieldViolation, ValidateInput, ValidationMode};

/// Item record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    /// Request this item was listed in answer to
    pub request_id: Option<i64>,
}

/// Short item representation embedded in bookings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemShort {
    pub id: i64,
    pub name: String,
}

/// Item with its bookings and comments, as shown to users
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
    /// Only filled in for the owner
    pub last_booking: Option<BookingShort>,
    /// Only filled in for the owner
    pub next_booking: Option<BookingShort>,
    pub comments: Vec<CommentDetails>,
}

impl ItemDetails {
    pub fn new(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request_id,
            last_booking: None,
            next_booking: None,
            comments: Vec::new(),
        }
    }
}

/// Create or update item request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    #[validate(length(max = 255, message = "The name must be at most 255 characters."))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(max = 2000, message = "The description must be at most 2000 characters."))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<i64>,
}

impl ItemInput {
    /// Same input with surrounding whitespace removed from text fields
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.map(|v| v.trim().to_string()),
            description: self.description.map(|v| v.trim().to_string()),
            ..self
        }
    }
}

impl ValidateInput for ItemInput {
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
            if is_blank(self.description.as_deref()) {
                violations.push(FieldViolation::new(
                    "description",
                    "The description must not be empty.",
                ));
            }
            if self.available.is_none() {
                violations.push(FieldViolation::new(
                    "available",
                    "The availability must be specified.",
                ));
            }
        } else {
            if self.name.as_deref().is_some_and(|v| v.trim().is_empty()) {
                violations.push(FieldViolation::new("name", "The name must not be empty."));
            }
            if self.description.as_deref().is_some_and(|v| v.trim().is_empty()) {
                violations.push(FieldViolation::new(
                    "description",
                    "The description must not be empty.",
                ));
            }
        }

        violations
    }
}
