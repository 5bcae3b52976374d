//! Bookings repository for database operations

use chrono::NaiveDateTime;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::booking::{Booking, BookingDetails, BookingDetailsRow, BookingState, BookingStatus},
};

const DETAILS_SELECT: &str = r#"
    SELECT b.id, b.start_date, b.end_date, b.status,
           b.booker_id, u.name AS booker_name,
           b.item_id, i.name AS item_name, i.owner_id AS item_owner_id
    FROM bookings b
    JOIN users u ON u.id = b.booker_id
    JOIN items i ON i.id = b.item_id
"#;

/// Whose bookings a list query returns
#[derive(Debug, Clone, Copy)]
pub enum BookingParty {
    Booker(i64),
    Owner(i64),
}

/// Extra bind value needed by a state filter
enum StateBind {
    Nothing,
    Moment(NaiveDateTime),
    Status(BookingStatus),
}

/// SQL condition for a state filter; placeholders start at `$2`
fn state_condition(state: BookingState, now: NaiveDateTime) -> (Option<&'static str>, StateBind) {
    match state {
        BookingState::All => (None, StateBind::Nothing),
        BookingState::Current => (
            Some("b.start_date <= $2 AND b.end_date >= $2"),
            StateBind::Moment(now),
        ),
        BookingState::Past => (Some("b.end_date < $2"), StateBind::Moment(now)),
        BookingState::Future => (Some("b.start_date > $2"), StateBind::Moment(now)),
        BookingState::Waiting => (Some("b.status = $2"), StateBind::Status(BookingStatus::Waiting)),
        BookingState::Rejected => (Some("b.status = $2"), StateBind::Status(BookingStatus::Rejected)),
    }
}

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// Get booking with booker, item and item owner
    pub async fn get_details(&self, id: i64) -> AppResult<BookingDetailsRow> {
        let query = format!("{} WHERE b.id = $1", DETAILS_SELECT);
        sqlx::query_as::<_, BookingDetailsRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    pub async fn create(
        &self,
        item_id: i64,
        booker_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        status: BookingStatus,
    ) -> AppResult<Booking> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (start_date, end_date, item_id, booker_id, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(item_id)
        .bind(booker_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(booking)
    }

    /// Move a booking to `status` only if it currently has `expected`
    ///
    /// Returns `None` when the booking was not in the expected status.
    pub async fn transition_status(
        &self,
        id: i64,
        expected: BookingStatus,
        status: BookingStatus,
    ) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $3 WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(id)
        .bind(expected)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(booking)
    }

    /// Bookings of a booker or of an owner's items, newest start first
    pub async fn find_for_party(
        &self,
        party: BookingParty,
        state: BookingState,
        now: NaiveDateTime,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<BookingDetails>> {
        let (party_condition, party_id) = match party {
            BookingParty::Booker(id) => ("b.booker_id = $1", id),
            BookingParty::Owner(id) => ("i.owner_id = $1", id),
        };
        let (state_sql, state_bind) = state_condition(state, now);

        let mut conditions = vec![party_condition];
        conditions.extend(state_sql);

        let query = format!(
            "{} WHERE {} ORDER BY b.start_date DESC, b.id DESC LIMIT {} OFFSET {}",
            DETAILS_SELECT,
            conditions.join(" AND "),
            size,
            from
        );

        let mut builder = sqlx::query_as::<_, BookingDetailsRow>(&query).bind(party_id);
        builder = match state_bind {
            StateBind::Nothing => builder,
            StateBind::Moment(moment) => builder.bind(moment),
            StateBind::Status(status) => builder.bind(status),
        };

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(BookingDetails::from).collect())
    }

    /// Approved bookings of the given items, ordered by start
    pub async fn find_approved_by_item_ids(&self, item_ids: &[i64]) -> AppResult<Vec<Booking>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE item_id = ANY($1) AND status = $2 ORDER BY start_date",
        )
        .bind(item_ids)
        .bind(BookingStatus::Approved)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    /// Whether the user has an approved booking of the item that already ended
    pub async fn has_finished_booking(
        &self,
        booker_id: i64,
        item_id: i64,
        now: NaiveDateTime,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE booker_id = $1 AND item_id = $2 AND status = $3 AND end_date < $4
            )
            "#,
        )
        .bind(booker_id)
        .bind(item_id)
        .bind(BookingStatus::Approved)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
