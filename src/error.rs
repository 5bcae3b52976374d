//! Error types for ShareIt services
//!
//! Every handler returns [`AppResult`]; the single [`IntoResponse`] impl below
//! is the only place where errors become HTTP responses.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::FieldViolation;

/// Separator between clauses of an error message
pub const CLAUSE_DELIMITER: char = '&';

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{}", join_violations(.0))]
    Validation(Vec<FieldViolation>),

    #[error("{0}")]
    Unsupported(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("{0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Render a message as one `- clause` line per delimited clause
pub fn breakdown(message: &str) -> String {
    message
        .split(CLAUSE_DELIMITER)
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .map(|clause| format!("- {}", clause))
        .collect::<Vec<_>>()
        .join("\n")
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldViolation::new(field, message)])
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Unsupported(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Upstream(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Name of the error kind reported in the `error` field
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "ValidationError",
            AppError::Unsupported(_) => "UnsupportedError",
            AppError::NotFound(_) => "NotFoundError",
            AppError::Forbidden(_) => "ForbiddenError",
            AppError::Conflict(_) => "ConflictError",
            AppError::Database(_) | AppError::Upstream(_) | AppError::Internal(_) => {
                "InternalError"
            }
        }
    }

    /// One `- clause` line per violation, or per delimited clause of the message
    ///
    /// Violations are never re-split, so user text inside a violation message
    /// stays on its own line.
    pub fn detail_lines(&self) -> String {
        match self {
            AppError::Validation(violations) => violations
                .iter()
                .map(|violation| format!("- {}", violation))
                .collect::<Vec<_>>()
                .join("\n"),
            _ => breakdown(&self.to_string()),
        }
    }

    /// Build the client-facing body; internal detail never leaves the process
    pub fn to_body(&self) -> ErrorResponse {
        match self {
            AppError::Unsupported(reason) => ErrorResponse {
                error: reason.clone(),
                message: None,
            },
            _ if self.status().is_server_error() => ErrorResponse {
                error: self.kind().to_string(),
                message: Some(breakdown(INTERNAL_MESSAGE)),
            },
            _ => ErrorResponse {
                error: self.kind().to_string(),
                message: Some(self.detail_lines()),
            },
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                let message = match db_err.constraint() {
                    Some("uq_user_email") => "The email is already registered.".to_string(),
                    Some(constraint) => format!("Duplicate value violates {}", constraint),
                    None => "Duplicate value".to_string(),
                };
                return AppError::Conflict(message);
            }
        }
        AppError::Database(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation("body", rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::validation("query", rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::validation("path", rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Validation(_) => {
                tracing::warn!(
                    "Exception: {}, Validation error(s): \n{}",
                    self.kind(),
                    self.detail_lines()
                );
            }
            AppError::Unsupported(_) => {
                tracing::warn!(
                    "Exception: {}, Unsupported error(s): \n{}",
                    self.kind(),
                    self.detail_lines()
                );
            }
            _ if status.is_server_error() => {
                tracing::error!(
                    "Exception: {}, message(s): \n{}",
                    self.kind(),
                    breakdown(&format!("{:?}", self))
                );
            }
            _ => {
                tracing::warn!("Exception: {}, message(s): \n{}", self.kind(), self.detail_lines());
            }
        }

        (status, Json(self.to_body())).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
