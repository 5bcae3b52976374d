//! ShareIt item sharing backend
//!
//! Two services share this crate: the server, which owns business rules and
//! persistence, and the gateway, which validates requests before forwarding
//! them to the server.

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Server state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
    pub pool: Pool<Postgres>,
}
