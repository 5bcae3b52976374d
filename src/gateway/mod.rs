//! Validating gateway
//!
//! Exposes the same routes as the server. Each handler checks its input and
//! forwards the request unchanged; the server's answer is relayed as is.

pub mod bookings;
pub mod client;
pub mod items;
pub mod requests;
pub mod users;

use axum::{
    extract::State,
    http::Method,
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{api::health, error::AppResult};

pub use client::{Forward, ServerClient};

/// Gateway state shared across all handlers
#[derive(Clone)]
pub struct GatewayState {
    pub client: ServerClient,
}

impl GatewayState {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            client: ServerClient::new(server_url),
        }
    }
}

/// Ready when the server reports ready
async fn readiness_check(State(state): State<GatewayState>) -> AppResult<Response> {
    state.client.forward(Forward::new(Method::GET, "/ready")).await
}

/// Build the gateway router with all routes
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(readiness_check))
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/:id", get(users::get_user).patch(users::update_user))
        // Items
        .route("/items", get(items::list_items).post(items::create_item))
        .route("/items/search", get(items::search_items))
        .route("/items/:id", get(items::get_item).patch(items::update_item))
        .route("/items/:id/comment", post(items::add_comment))
        // Bookings
        .route("/bookings", get(bookings::list_bookings).post(bookings::create_booking))
        .route("/bookings/owner", get(bookings::list_owner_bookings))
        .route("/bookings/:id", get(bookings::get_booking).patch(bookings::decide_booking))
        // Item requests
        .route("/requests", get(requests::list_own_requests).post(requests::create_request))
        .route("/requests/all", get(requests::list_other_requests))
        .route("/requests/:id", get(requests::get_request))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
