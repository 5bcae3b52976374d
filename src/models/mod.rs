//! Data models for ShareIt

pub mod booking;
pub mod comment;
pub mod item;
pub mod request;
pub mod user;

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use validator::Validate;

// Re-export commonly used types
pub use booking::{Booking, BookingDetails, BookingInput, BookingShort, BookingState, BookingStatus};
pub use comment::{Comment, CommentDetails, CommentInput};
pub use item::{Item, ItemDetails, ItemInput, ItemShort};
pub use request::{ItemRequest, ItemRequestDetails, ItemRequestInput};
pub use user::{User, UserInput, UserShort};

/// Current local time at the precision the database stores
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}

fn default_from() -> i64 {
    0
}

fn default_size() -> i64 {
    10
}

/// Offset/limit pagination parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based offset of the first row
    #[serde(default = "default_from")]
    #[validate(range(min = 0, message = "The offset must not be negative."))]
    pub from: i64,
    /// Maximum number of rows
    #[serde(default = "default_size")]
    #[validate(range(min = 1, message = "The page size must be positive."))]
    pub size: i64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            from: default_from(),
            size: default_size(),
        }
    }
}

/// `state` filter for booking lists
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StateQuery {
    pub state: Option<String>,
}

/// Free-text item search
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: String,
}

/// Owner decision on a booking
#[derive(Debug, Clone, Copy, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApprovalQuery {
    pub approved: bool,
}
