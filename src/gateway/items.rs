//! Gateway item endpoints: validated, then forwarded

use axum::{
    extract::{RawQuery, State},
    http::Method,
    response::Response,
};
use validator::Validate;

use crate::{
    api::{AppJson, AppPath, AppQuery, SharerId},
    error::AppResult,
    models::{comment::CommentInput, item::ItemInput, PageQuery, SearchQuery},
    validation::{ValidateInput, ValidationMode},
};

use super::{Forward, GatewayState};

pub async fn list_items(
    State(state): State<GatewayState>,
    SharerId(owner_id): SharerId,
    AppQuery(page): AppQuery<PageQuery>,
    RawQuery(query): RawQuery,
) -> AppResult<Response> {
    page.validate()?;
    state
        .client
        .forward(
            Forward::new(Method::GET, "/items")
                .query(query.as_deref())
                .sharer(owner_id),
        )
        .await
}

pub async fn search_items(
    State(state): State<GatewayState>,
    AppQuery(_search): AppQuery<SearchQuery>,
    AppQuery(page): AppQuery<PageQuery>,
    RawQuery(query): RawQuery,
) -> AppResult<Response> {
    page.validate()?;
    state
        .client
        .forward(Forward::new(Method::GET, "/items/search").query(query.as_deref()))
        .await
}

pub async fn get_item(
    State(state): State<GatewayState>,
    SharerId(user_id): SharerId,
    AppPath(id): AppPath<i64>,
) -> AppResult<Response> {
    state
        .client
        .forward(Forward::new(Method::GET, format!("/items/{}", id)).sharer(user_id))
        .await
}

pub async fn create_item(
    State(state): State<GatewayState>,
    SharerId(owner_id): SharerId,
    AppJson(input): AppJson<ItemInput>,
) -> AppResult<Response> {
    input.validate_for(ValidationMode::Create)?;
    state
        .client
        .forward(Forward::new(Method::POST, "/items").sharer(owner_id).json(&input))
        .await
}

pub async fn update_item(
    State(state): State<GatewayState>,
    SharerId(owner_id): SharerId,
    AppPath(id): AppPath<i64>,
    AppJson(input): AppJson<ItemInput>,
) -> AppResult<Response> {
    input.validate_for(ValidationMode::Update)?;
    state
        .client
        .forward(
            Forward::new(Method::PATCH, format!("/items/{}", id))
                .sharer(owner_id)
                .json(&input),
        )
        .await
}

pub async fn add_comment(
    State(state): State<GatewayState>,
    SharerId(author_id): SharerId,
    AppPath(id): AppPath<i64>,
    AppJson(input): AppJson<CommentInput>,
) -> AppResult<Response> {
    input.validate_for(ValidationMode::Create)?;
    state
        .client
        .forward(
            Forward::new(Method::POST, format!("/items/{}/comment", id))
                .sharer(author_id)
                .json(&input),
        )
        .await
}
