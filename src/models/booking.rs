//! Booking model and related types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;

use super::{item::ItemShort, local_now, user::UserShort};
use crate::error::AppError;
use crate::validation::{FieldViolation, ValidateInput, ValidationMode};

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
    Canceled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Canceled => "CANCELED",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            "CANCELED" => Ok(BookingStatus::Canceled),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

// Stored as VARCHAR
impl sqlx::Type<Postgres> for BookingStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for BookingStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: &str = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for BookingStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

/// Filter applied when listing bookings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingState {
    #[default]
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl std::str::FromStr for BookingState {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ALL" => Ok(BookingState::All),
            "CURRENT" => Ok(BookingState::Current),
            "PAST" => Ok(BookingState::Past),
            "FUTURE" => Ok(BookingState::Future),
            "WAITING" => Ok(BookingState::Waiting),
            "REJECTED" => Ok(BookingState::Rejected),
            _ => Err(AppError::Unsupported(format!("Unknown state: {}", s))),
        }
    }
}

impl BookingState {
    /// Parse an optional `state` query value; absent means `ALL`
    pub fn parse_param(state: Option<&str>) -> Result<Self, AppError> {
        state.map_or(Ok(BookingState::All), str::parse)
    }
}

/// Booking record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    #[sqlx(rename = "start_date")]
    pub start: NaiveDateTime,
    #[sqlx(rename = "end_date")]
    pub end: NaiveDateTime,
    pub status: BookingStatus,
    pub booker_id: i64,
    pub item_id: i64,
}

/// Booking reference shown on an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingShort {
    pub id: i64,
    pub booker_id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl From<&Booking> for BookingShort {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            booker_id: booking.booker_id,
            start: booking.start,
            end: booking.end,
        }
    }
}

/// Internal row structure for booking queries joined with users and items
#[derive(Debug, Clone, FromRow)]
pub struct BookingDetailsRow {
    id: i64,
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
    status: BookingStatus,
    booker_id: i64,
    booker_name: String,
    item_id: i64,
    item_name: String,
    pub item_owner_id: i64,
}

/// Booking with booker and item, as shown to users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookingDetails {
    pub id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status: BookingStatus,
    pub booker: UserShort,
    pub item: ItemShort,
}

impl From<BookingDetailsRow> for BookingDetails {
    fn from(row: BookingDetailsRow) -> Self {
        BookingDetails {
            id: row.id,
            start: row.start_date,
            end: row.end_date,
            status: row.status,
            booker: UserShort {
                id: row.booker_id,
                name: row.booker_name,
            },
            item: ItemShort {
                id: row.item_id,
                name: row.item_name,
            },
        }
    }
}

/// Create booking request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingInput {
    pub item_id: Option<i64>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl BookingInput {
    /// Field checks relative to the given moment
    ///
    /// `start` may equal `now`, `end` must be strictly after it. The two
    /// bounds are checked independently; ordering is a server-side rule.
    pub fn violations_at(&self, now: NaiveDateTime) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        if self.item_id.is_none() {
            violations.push(FieldViolation::new("itemId", "The item of the booking must be specified."));
        }

        match self.start {
            None => violations.push(FieldViolation::new("start", "The start of the booking must not be null.")),
            Some(start) if start < now => violations.push(FieldViolation::new(
                "start",
                "The start of the booking cannot be earlier than the current time.",
            )),
            Some(_) => {}
        }

        match self.end {
            None => violations.push(FieldViolation::new("end", "The end of the booking must not be null.")),
            Some(end) if end <= now => violations.push(FieldViolation::new(
                "end",
                "The end of the booking must be in the future.",
            )),
            Some(_) => {}
        }

        violations
    }
}

impl BookingInput {
    /// Item, start and end, or a violation for each missing one
    pub fn required(&self) -> Result<(i64, NaiveDateTime, NaiveDateTime), AppError> {
        match (self.item_id, self.start, self.end) {
            (Some(item_id), Some(start), Some(end)) => Ok((item_id, start, end)),
            _ => {
                let missing = [
                    (self.item_id.is_none(), "itemId"),
                    (self.start.is_none(), "start"),
                    (self.end.is_none(), "end"),
                ];
                Err(AppError::Validation(
                    missing
                        .iter()
                        .filter(|(absent, _)| *absent)
                        .map(|(_, field)| FieldViolation::new(*field, "The field must be specified."))
                        .collect(),
                ))
            }
        }
    }
}

impl ValidateInput for BookingInput {
    fn violations(&self, _mode: ValidationMode) -> Vec<FieldViolation> {
        self.violations_at(local_now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(now: NaiveDateTime, start_offset: i64, end_offset: i64) -> BookingInput {
        BookingInput {
            item_id: Some(1),
            start: Some(now + Duration::minutes(start_offset)),
            end: Some(now + Duration::minutes(end_offset)),
        }
    }

    #[test]
    fn test_start_in_past_rejected() {
        let now = local_now();
        let violations = at(now, -5, 60).violations_at(now);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "start");
    }

    #[test]
    fn test_start_now_accepted_end_now_rejected() {
        let now = local_now();
        let violations = at(now, 0, 0).violations_at(now);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "end");
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let violations = BookingInput::default().violations_at(local_now());
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["itemId", "start", "end"]);
    }

    #[test]
    fn test_end_before_start_is_not_a_field_violation() {
        let now = local_now();
        assert!(at(now, 120, 60).violations_at(now).is_empty());
    }

    #[test]
    fn test_state_parsing() {
        assert_eq!(BookingState::parse_param(None).unwrap(), BookingState::All);
        assert_eq!("current".parse::<BookingState>().unwrap(), BookingState::Current);
        match "UNSUPPORTED_STATUS".parse::<BookingState>() {
            Err(AppError::Unsupported(reason)) => {
                assert_eq!(reason, "Unknown state: UNSUPPORTED_STATUS")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_status_json_representation() {
        assert_eq!(serde_json::to_value(BookingStatus::Waiting).unwrap(), "WAITING");
        assert_eq!("CANCELED".parse::<BookingStatus>().unwrap(), BookingStatus::Canceled);
        assert!("waiting".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_input_reads_iso_timestamps() {
        let input: BookingInput = serde_json::from_value(serde_json::json!({
            "itemId": 4,
            "start": "2030-01-01T10:00:00",
            "end": "2030-01-02T10:00:00"
        }))
        .unwrap();
        assert_eq!(input.item_id, Some(4));
        assert!(input.violations_at(local_now()).is_empty());
    }
}
