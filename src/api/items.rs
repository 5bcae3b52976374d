//! Item endpoints: listing, search and comments

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        comment::{CommentDetails, CommentInput},
        item::{Item, ItemDetails, ItemInput},
        PageQuery, SearchQuery,
    },
    AppState,
};

use super::{AppJson, AppPath, AppQuery, SharerId};

/// List the acting user's items
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Owner's items with bookings and comments", body = Vec<ItemDetails>),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_items(
    State(state): State<AppState>,
    SharerId(owner_id): SharerId,
    AppQuery(page): AppQuery<PageQuery>,
) -> AppResult<Json<Vec<ItemDetails>>> {
    page.validate()?;
    let items = state.services.items.list_owner_items(owner_id, page).await?;
    Ok(Json(items))
}

/// Search available items by name or description
#[utoipa::path(
    get,
    path = "/items/search",
    tag = "items",
    params(SearchQuery, PageQuery),
    responses(
        (status = 200, description = "Matching available items", body = Vec<Item>)
    )
)]
pub async fn search_items(
    State(state): State<AppState>,
    AppQuery(search): AppQuery<SearchQuery>,
    AppQuery(page): AppQuery<PageQuery>,
) -> AppResult<Json<Vec<Item>>> {
    page.validate()?;
    let items = state.services.items.search(&search.text, page).await?;
    Ok(Json(items))
}

/// Get an item with its comments
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user"),
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item details", body = ItemDetails),
        (status = 404, description = "Item or user not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    SharerId(user_id): SharerId,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<ItemDetails>> {
    let item = state.services.items.get_item(user_id, id).await?;
    Ok(Json(item))
}

/// List a new item
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Owner")
    ),
    request_body = ItemInput,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Owner or request not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    SharerId(owner_id): SharerId,
    AppJson(input): AppJson<ItemInput>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let item = state.services.items.create_item(owner_id, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Update an item
#[utoipa::path(
    patch,
    path = "/items/{id}",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Owner"),
        ("id" = i64, Path, description = "Item ID")
    ),
    request_body = ItemInput,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 403, description = "Not the owner", body = crate::error::ErrorResponse),
        (status = 404, description = "Item not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    SharerId(owner_id): SharerId,
    AppPath(id): AppPath<i64>,
    AppJson(input): AppJson<ItemInput>,
) -> AppResult<Json<Item>> {
    let item = state.services.items.update_item(owner_id, id, input).await?;
    Ok(Json(item))
}

/// Comment on a previously booked item
#[utoipa::path(
    post,
    path = "/items/{id}/comment",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i64, Header, description = "Author"),
        ("id" = i64, Path, description = "Item ID")
    ),
    request_body = CommentInput,
    responses(
        (status = 201, description = "Comment added", body = CommentDetails),
        (status = 400, description = "Blank text or no completed booking", body = crate::error::ErrorResponse),
        (status = 404, description = "Item or user not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_comment(
    State(state): State<AppState>,
    SharerId(author_id): SharerId,
    AppPath(id): AppPath<i64>,
    AppJson(input): AppJson<CommentInput>,
) -> AppResult<(StatusCode, Json<CommentDetails>)> {
    let comment = state.services.items.add_comment(author_id, id, input).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
