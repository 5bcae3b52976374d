//! Booking endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        booking::{BookingDetails, BookingInput, BookingState},
        ApprovalQuery, PageQuery, StateQuery,
    },
    AppState,
};

use super::{AppJson, AppPath, AppQuery, SharerId};

/// Place a booking
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Booker")
    ),
    request_body = BookingInput,
    responses(
        (status = 201, description = "Booking waiting for approval", body = BookingDetails),
        (status = 400, description = "Invalid dates or item unavailable", body = crate::error::ErrorResponse),
        (status = 404, description = "Item or user not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    SharerId(booker_id): SharerId,
    AppJson(input): AppJson<BookingInput>,
) -> AppResult<(StatusCode, Json<BookingDetails>)> {
    let booking = state.services.bookings.create_booking(booker_id, input).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Approve or reject a booking
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Item owner"),
        ("id" = i64, Path, description = "Booking ID"),
        ApprovalQuery
    ),
    responses(
        (status = 200, description = "Booking decided", body = BookingDetails),
        (status = 400, description = "Booking already decided", body = crate::error::ErrorResponse),
        (status = 404, description = "Booking not found for this owner", body = crate::error::ErrorResponse)
    )
)]
pub async fn decide_booking(
    State(state): State<AppState>,
    SharerId(owner_id): SharerId,
    AppPath(id): AppPath<i64>,
    AppQuery(decision): AppQuery<ApprovalQuery>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state
        .services
        .bookings
        .decide(owner_id, id, decision.approved)
        .await?;
    Ok(Json(booking))
}

/// Get a booking as its booker or item owner
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Booker or item owner"),
        ("id" = i64, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking details", body = BookingDetails),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.get_booking(user_id, id).await?;
    Ok(Json(booking))
}

/// List bookings placed by the acting user
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Booker"),
        StateQuery,
        PageQuery
    ),
    responses(
        (status = 200, description = "Bookings, newest start first", body = Vec<BookingDetails>),
        (status = 400, description = "Unknown state", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    SharerId(booker_id): SharerId,
    AppQuery(filter): AppQuery<StateQuery>,
    AppQuery(page): AppQuery<PageQuery>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let booking_state = BookingState::parse_param(filter.state.as_deref())?;
    page.validate()?;

    let bookings = state
        .services
        .bookings
        .list_for_booker(booker_id, booking_state, page)
        .await?;
    Ok(Json(bookings))
}

/// List bookings of the acting user's items
#[utoipa::path(
    get,
    path = "/bookings/owner",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Item owner"),
        StateQuery,
        PageQuery
    ),
    responses(
        (status = 200, description = "Bookings, newest start first", body = Vec<BookingDetails>),
        (status = 400, description = "Unknown state", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_owner_bookings(
    State(state): State<AppState>,
    SharerId(owner_id): SharerId,
    AppQuery(filter): AppQuery<StateQuery>,
    AppQuery(page): AppQuery<PageQuery>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let booking_state = BookingState::parse_param(filter.state.as_deref())?;
    page.validate()?;

    let bookings = state
        .services
        .bookings
        .list_for_owner(owner_id, booking_state, page)
        .await?;
    Ok(Json(bookings))
}
