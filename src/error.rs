//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every failure a request can hit maps onto exactly one variant, and every variant maps
//! onto exactly one HTTP status code.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can return
//! `Result<_, AppError>` directly. The body is always `{"error": <message>, "code": <kind>}`.
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error` and `bcrypt::BcryptError` allow the `?` operator
//! at every layer.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Signup with an identity that is already registered (HTTP 400).
    DuplicateIdentity,
    /// Login failed (HTTP 401).
    ///
    /// Covers both an unknown identity and a wrong password; callers must not be
    /// able to tell the two apart.
    InvalidCredentials,
    /// Bearer token missing, malformed, wrongly signed or expired (HTTP 401).
    Unauthenticated(String),
    /// The token's subject no longer resolves to a stored user (HTTP 404).
    UserNotFound,
    /// No task with that id is owned by the acting user (HTTP 404).
    ///
    /// A task owned by somebody else is reported exactly like a missing one.
    TaskNotFound,
    /// Malformed or invalid request input (HTTP 422).
    ValidationError(String),
    /// Storage failure (HTTP 500). The message is logged, never sent to the client.
    DatabaseError(String),
    /// Any other unexpected server-side failure (HTTP 500).
    InternalServerError(String),
}

impl AppError {
    /// Stable machine-readable name of the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::DuplicateIdentity => "duplicate_identity",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::Unauthenticated(_) => "unauthenticated",
            AppError::UserNotFound => "user_not_found",
            AppError::TaskNotFound => "task_not_found",
            AppError::ValidationError(_) => "validation_error",
            AppError::DatabaseError(_) => "database_error",
            AppError::InternalServerError(_) => "internal_server_error",
        }
    }

    /// Message shown to the client.
    fn public_message(&self) -> String {
        match self {
            AppError::DuplicateIdentity => "Identity already registered".to_string(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::Unauthenticated(msg) => msg.clone(),
            AppError::UserNotFound => "User not found".to_string(),
            AppError::TaskNotFound => "Task not found".to_string(),
            AppError::ValidationError(msg) => msg.clone(),
            AppError::DatabaseError(_) => "Database error".to_string(),
            AppError::InternalServerError(_) => "Internal server error".to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::DuplicateIdentity => write!(f, "Duplicate Identity"),
            AppError::InvalidCredentials => write!(f, "Invalid Credentials"),
            AppError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            AppError::UserNotFound => write!(f, "User Not Found"),
            AppError::TaskNotFound => write!(f, "Task Not Found"),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateIdentity => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::UserNotFound | AppError::TaskNotFound => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.public_message(),
            "code": self.code(),
        }))
    }
}

/// Converts `sqlx::Error` into `AppError::DatabaseError`.
///
/// Missing rows are never surfaced through this conversion: the stores return
/// `Option` and the services decide which not-found kind applies.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        AppError::DatabaseError(error.to_string())
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Unauthenticated`.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthenticated(format!("Invalid token: {}", error))
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
