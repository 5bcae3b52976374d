//! Gateway user endpoints

use axum::{extract::State, http::Method, response::Response};

use crate::{
    api::{AppJson, AppPath},
    error::AppResult,
    models::user::UserInput,
    validation::{ValidateInput, ValidationMode},
};

use super::{Forward, GatewayState};

pub async fn list_users(State(state): State<GatewayState>) -> AppResult<Response> {
    state.client.forward(Forward::new(Method::GET, "/users")).await
}

pub async fn get_user(
    State(state): State<GatewayState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Response> {
    state
        .client
        .forward(Forward::new(Method::GET, format!("/users/{}", id)))
        .await
}

pub async fn create_user(
    State(state): State<GatewayState>,
    AppJson(input): AppJson<UserInput>,
) -> AppResult<Response> {
    input.validate_for(ValidationMode::Create)?;
    state
        .client
        .forward(Forward::new(Method::POST, "/users").json(&input))
        .await
}

pub async fn update_user(
    State(state): State<GatewayState>,
    AppPath(id): AppPath<i64>,
    AppJson(input): AppJson<UserInput>,
) -> AppResult<Response> {
    input.validate_for(ValidationMode::Update)?;
    state
        .client
        .forward(Forward::new(Method::PATCH, format!("/users/{}", id)).json(&input))
        .await
}
