use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::{AuthServiceError, UserServiceError};

pub const MISSING_CREDENTIALS: &str = "Email and password are required.";
pub const WEAK_PASSWORD: &str = "Password must be at least 6 characters.";
pub const EMAIL_TAKEN: &str = "Email already registered.";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";
pub const REGISTRATION_FAILED: &str = "Registration failed.";
pub const LOGIN_FAILED: &str = "Login failed.";
pub const IMAGES_UNAVAILABLE: &str = "Unable to list images";

// Type alias for Result with our AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors surfaced over HTTP as `{ "error": "<message>" }`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(&'static str),

    #[error("Conflict: {0}")]
    Conflict(&'static str),

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The message is what the client sees; details are logged where the
    /// error is produced.
    #[error("Internal error: {0}")]
    Internal(&'static str),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AppError::Validation(msg) | AppError::Conflict(msg) | AppError::Internal(msg) => msg,
            AppError::InvalidCredentials => INVALID_CREDENTIALS,
        }
    }
}

impl From<UserServiceError> for AppError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::MissingCredentials => AppError::Validation(MISSING_CREDENTIALS),
            UserServiceError::WeakPassword => AppError::Validation(WEAK_PASSWORD),
            UserServiceError::EmailTaken => AppError::Conflict(EMAIL_TAKEN),
            other => {
                tracing::error!("Registration failed: {}", other);
                AppError::Internal(REGISTRATION_FAILED)
            }
        }
    }
}

impl From<AuthServiceError> for AppError {
    fn from(err: AuthServiceError) -> Self {
        match err {
            AuthServiceError::MissingCredentials => AppError::Validation(MISSING_CREDENTIALS),
            AuthServiceError::InvalidCredentials => AppError::InvalidCredentials,
            other => {
                tracing::error!("Login failed: {}", other);
                AppError::Internal(LOGIN_FAILED)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.message() });
        (self.status(), Json(body)).into_response()
    }
}
