//! Booking service: placing, approving and listing bookings

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{BookingDetails, BookingInput, BookingState, BookingStatus},
        local_now, PageQuery,
    },
    repository::{bookings::BookingParty, Repository},
    validation::FieldViolation,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Place a booking; it waits for the owner's decision
    pub async fn create_booking(&self, booker_id: i64, input: BookingInput) -> AppResult<BookingDetails> {
        let (item_id, start, end) = input.required()?;
        if end <= start {
            return Err(AppError::Validation(vec![FieldViolation::new(
                "end",
                "The end of the booking must be after its start.",
            )]));
        }

        self.repository.users.get_by_id(booker_id).await?;
        let item = self.repository.items.get_by_id(item_id).await?;

        if item.owner_id == booker_id {
            return Err(AppError::NotFound(format!(
                "Item with id {} cannot be booked by its owner",
                item_id
            )));
        }
        if !item.available {
            return Err(AppError::validation(
                "itemId",
                format!("Item with id {} is not available for booking", item_id),
            ));
        }

        let booking = self
            .repository
            .bookings
            .create(item_id, booker_id, start, end, BookingStatus::Waiting)
            .await?;
        tracing::info!(booking_id = booking.id, item_id, booker_id, "Created booking");

        self.repository
            .bookings
            .get_details(booking.id)
            .await
            .map(BookingDetails::from)
    }

    /// Approve or reject a waiting booking; only the item owner may decide
    pub async fn decide(&self, owner_id: i64, booking_id: i64, approved: bool) -> AppResult<BookingDetails> {
        let row = self.repository.bookings.get_details(booking_id).await?;
        if row.item_owner_id != owner_id {
            return Err(AppError::NotFound(format!("Booking with id {} not found", booking_id)));
        }

        let current = BookingDetails::from(row);
        let target = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };

        if current.status != BookingStatus::Waiting {
            return Err(already_decided(booking_id, current.status));
        }

        let changed = self
            .repository
            .bookings
            .transition_status(booking_id, BookingStatus::Waiting, target)
            .await?;
        if changed.is_none() {
            // Decided concurrently by another request
            let status = self.repository.bookings.get_by_id(booking_id).await?.status;
            return Err(already_decided(booking_id, status));
        }
        tracing::info!(booking_id, owner_id, status = %target, "Booking decided");

        Ok(BookingDetails { status: target, ..current })
    }

    /// Booking visible to its booker and to the item owner
    pub async fn get_booking(&self, user_id: i64, booking_id: i64) -> AppResult<BookingDetails> {
        let row = self.repository.bookings.get_details(booking_id).await?;
        let owner_id = row.item_owner_id;
        let details = BookingDetails::from(row);

        if details.booker.id != user_id && owner_id != user_id {
            return Err(AppError::NotFound(format!("Booking with id {} not found", booking_id)));
        }
        Ok(details)
    }

    /// Bookings placed by the user
    pub async fn list_for_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        page: PageQuery,
    ) -> AppResult<Vec<BookingDetails>> {
        self.list(BookingParty::Booker(booker_id), booker_id, state, page).await
    }

    /// Bookings of the user's items
    pub async fn list_for_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        page: PageQuery,
    ) -> AppResult<Vec<BookingDetails>> {
        self.list(BookingParty::Owner(owner_id), owner_id, state, page).await
    }

    async fn list(
        &self,
        party: BookingParty,
        user_id: i64,
        state: BookingState,
        page: PageQuery,
    ) -> AppResult<Vec<BookingDetails>> {
        self.repository.users.get_by_id(user_id).await?;
        self.repository
            .bookings
            .find_for_party(party, state, local_now(), page.from, page.size)
            .await
    }
}

fn already_decided(booking_id: i64, status: BookingStatus) -> AppError {
    AppError::Unsupported(format!(
        "Booking {} is {} and can no longer change status",
        booking_id, status
    ))
}
