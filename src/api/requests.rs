//! Item request endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        request::{ItemRequestDetails, ItemRequestInput},
        PageQuery,
    },
    AppState,
};

use super::{AppJson, AppPath, AppQuery, SharerId};

/// Ask for an item nobody has listed yet
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Requester")
    ),
    request_body = ItemRequestInput,
    responses(
        (status = 201, description = "Request created", body = ItemRequestDetails),
        (status = 400, description = "Blank description", body = crate::error::ErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_request(
    State(state): State<AppState>,
    SharerId(requester_id): SharerId,
    AppJson(input): AppJson<ItemRequestInput>,
) -> AppResult<(StatusCode, Json<ItemRequestDetails>)> {
    let request = state.services.requests.create_request(requester_id, input).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// The acting user's requests with answers
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Requester")
    ),
    responses(
        (status = 200, description = "Own requests, newest first", body = Vec<ItemRequestDetails>),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_own_requests(
    State(state): State<AppState>,
    SharerId(requester_id): SharerId,
) -> AppResult<Json<Vec<ItemRequestDetails>>> {
    let requests = state.services.requests.list_own(requester_id).await?;
    Ok(Json(requests))
}

/// Requests of other users, in ID order
#[utoipa::path(
    get,
    path = "/requests/all",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Other users' requests", body = Vec<ItemRequestDetails>),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_other_requests(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    AppQuery(page): AppQuery<PageQuery>,
) -> AppResult<Json<Vec<ItemRequestDetails>>> {
    page.validate()?;
    let requests = state.services.requests.list_others(user_id, page).await?;
    Ok(Json(requests))
}

/// One request with answers
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user"),
        ("id" = i64, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request details", body = ItemRequestDetails),
        (status = 404, description = "Request or user not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_request(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<ItemRequestDetails>> {
    let request = state.services.requests.get_request(user_id, id).await?;
    Ok(Json(request))
}
