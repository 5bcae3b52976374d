//! Gateway item request endpoints

use axum::{
    extract::{RawQuery, State},
    http::Method,
    response::Response,
};
use validator::Validate;

use crate::{
    api::{AppJson, AppPath, AppQuery, SharerId},
    error::AppResult,
    models::{request::ItemRequestInput, PageQuery},
    validation::{ValidateInput, ValidationMode},
};

use super::{Forward, GatewayState};

pub async fn create_request(
    State(state): State<GatewayState>,
    SharerId(requester_id): SharerId,
    AppJson(input): AppJson<ItemRequestInput>,
) -> AppResult<Response> {
    input.validate_for(ValidationMode::Create)?;
    state
        .client
        .forward(Forward::new(Method::POST, "/requests").sharer(requester_id).json(&input))
        .await
}

pub async fn list_own_requests(
    State(state): State<GatewayState>,
    SharerId(requester_id): SharerId,
) -> AppResult<Response> {
    state
        .client
        .forward(Forward::new(Method::GET, "/requests").sharer(requester_id))
        .await
}

pub async fn list_other_requests(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    AppQuery(page): AppQuery<PageQuery>,
    RawQuery(query): RawQuery,
) -> AppResult<Response> {
    page.validate()?;
    state
        .client
        .forward(
            Forward::new(Method::GET, "/requests/all")
                .query(query.as_deref())
                .sharer(user_id),
        )
        .await
}

pub async fn get_request(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    AppPath(id): AppPath<i64>,
) -> AppResult<Response> {
    state
        .client
        .forward(Forward::new(Method::GET, format!("/requests/{}", id)).sharer(user_id))
        .await
}
