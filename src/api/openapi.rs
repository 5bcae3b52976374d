//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, health, items, requests, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ShareIt API",
        version = "1.0.0",
        description = "Item sharing server REST API"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        // Items
        items::list_items,
        items::search_items,
        items::get_item,
        items::create_item,
        items::update_item,
        items::add_comment,
        // Bookings
        bookings::create_booking,
        bookings::decide_booking,
        bookings::get_booking,
        bookings::list_bookings,
        bookings::list_owner_bookings,
        // Item requests
        requests::create_request,
        requests::list_own_requests,
        requests::list_other_requests,
        requests::get_request,
    ),
    components(
        schemas(
            // Users
            crate::models::user::User,
            crate::models::user::UserShort,
            crate::models::user::UserInput,
            // Items
            crate::models::item::Item,
            crate::models::item::ItemShort,
            crate::models::item::ItemDetails,
            crate::models::item::ItemInput,
            crate::models::comment::CommentDetails,
            crate::models::comment::CommentInput,
            // Bookings
            crate::models::booking::BookingStatus,
            crate::models::booking::BookingShort,
            crate::models::booking::BookingDetails,
            crate::models::booking::BookingInput,
            // Item requests
            crate::models::request::ItemRequestDetails,
            crate::models::request::ItemRequestInput,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User management"),
        (name = "items", description = "Shareable items and comments"),
        (name = "bookings", description = "Booking requests and approval"),
        (name = "requests", description = "Requests for items not yet listed")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
