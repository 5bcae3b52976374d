//! Gateway booking endpoints
//!
//! Dates and the `state` filter are checked here; ordering of `start` and
//! `end` is left to the server.

use axum::{
    extract::{RawQuery, State},
    http::Method,
    response::Response,
};
use validator::Validate;

use crate::{
    api::{AppJson, AppPath, AppQuery, SharerId},
    error::AppResult,
    models::{
        booking::{BookingInput, BookingState},
        ApprovalQuery, PageQuery, StateQuery,
    },
    validation::{ValidateInput, ValidationMode},
};

use super::{Forward, GatewayState};

pub async fn create_booking(
    State(state): State<GatewayState>,
    SharerId(booker_id): SharerId,
    AppJson(input): AppJson<BookingInput>,
) -> AppResult<Response> {
    input.validate_for(ValidationMode::Create)?;
    state
        .client
        .forward(Forward::new(Method::POST, "/bookings").sharer(booker_id).json(&input))
        .await
}

pub async fn decide_booking(
    State(state): State<GatewayState>,
    SharerId(owner_id): SharerId,
    AppPath(id): AppPath<i64>,
    AppQuery(_decision): AppQuery<ApprovalQuery>,
    RawQuery(query): RawQuery,
) -> AppResult<Response> {
    state
        .client
        .forward(
            Forward::new(Method::PATCH, format!("/bookings/{}", id))
                .query(query.as_deref())
                .sharer(owner_id),
        )
        .await
}

pub async fn get_booking(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    AppPath(id): AppPath<i64>,
) -> AppResult<Response> {
    state
        .client
        .forward(Forward::new(Method::GET, format!("/bookings/{}", id)).sharer(user_id))
        .await
}

pub async fn list_bookings(
    State(state): State<GatewayState>,
    SharerId(booker_id): SharerId,
    AppQuery(filter): AppQuery<StateQuery>,
    AppQuery(page): AppQuery<PageQuery>,
    RawQuery(query): RawQuery,
) -> AppResult<Response> {
    list(state, "/bookings", booker_id, filter, page, query).await
}

pub async fn list_owner_bookings(
    State(state): State<GatewayState>,
    SharerId(owner_id): SharerId,
    AppQuery(filter): AppQuery<StateQuery>,
    AppQuery(page): AppQuery<PageQuery>,
    RawQuery(query): RawQuery,
) -> AppResult<Response> {
    list(state, "/bookings/owner", owner_id, filter, page, query).await
}

async fn list(
    state: GatewayState,
    path: &str,
    user_id: i64,
    filter: StateQuery,
    page: PageQuery,
    query: Option<String>,
) -> AppResult<Response> {
    BookingState::parse_param(filter.state.as_deref())?;
    page.validate()?;
    state
        .client
        .forward(
            Forward::new(Method::GET, path)
                .query(query.as_deref())
                .sharer(user_id),
        )
        .await
}
