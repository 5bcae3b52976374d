//! Item request model: a user asking for something nobody has listed yet

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::item::Item;
use crate::validation::{is_blank, violations_from, FieldViolation, ValidateInput, ValidationMode};

/// Item request record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub id: i64,
    pub description: String,
    pub requester_id: i64,
    pub created: NaiveDateTime,
}

/// Item request with the items listed in answer to it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemRequestDetails {
    pub id: i64,
    pub description: String,
    pub created: NaiveDateTime,
    pub items: Vec<Item>,
}

impl ItemRequestDetails {
    pub fn new(request: ItemRequest, items: Vec<Item>) -> Self {
        Self {
            id: request.id,
            description: request.description,
            created: request.created,
            items,
        }
    }
}

/// Create item request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ItemRequestInput {
    #[validate(length(max = 2000, message = "The description must be at most 2000 characters."))]
    pub description: Option<String>,
}

impl ValidateInput for ItemRequestInput {
    fn violations(&self, _mode: ValidationMode) -> Vec<FieldViolation> {
        let mut violations = self
            .validate()
            .err()
            .map(|e| violations_from(&e))
            .unwrap_or_default();
        if is_blank(self.description.as_deref()) {
            violations.push(FieldViolation::new(
                "description",
                "The description must not be empty.",
            ));
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_required() {
        assert!(ItemRequestInput::default()
            .validate_for(ValidationMode::Create)
            .is_err());

        let input = ItemRequestInput {
            description: Some("Need a sofa".into()),
        };
        assert!(input.validate_for(ValidationMode::Create).is_ok());
    }

    #[test]
    fn test_overlong_description_reported_once() {
        let input = ItemRequestInput {
            description: Some("d".repeat(2001)),
        };
        let violations = input.violations(ValidationMode::Create);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "description");
    }
}
