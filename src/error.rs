//! Error types for the lending desk

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Numeric error codes carried in every error response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    NoSuchUser = 4,
    NoSuchItem = 5,
    ItemNotAvailable = 7,
    Duplicate = 8,
    BadValue = 18,
    ItemAlreadyAvailable = 22,
    OverdueItems = 23,
}

/// Main application error type
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AppError {
    #[error("Username already exists: {0}")]
    UsernameExists(String),

    #[error("Invalid user category: {0}")]
    InvalidCategory(i64),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Please login first")]
    NotLoggedIn,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("{0} is not available for lending")]
    Unavailable(String),

    #[error("{0} is already available")]
    AlreadyAvailable(String),

    /// Lending is refused while the catalog holds an overdue item
    #[error("Overdue resource '{0}' must be returned before lending again")]
    OverdueBlock(String),

    #[error("Invalid item type: {0}")]
    InvalidVariant(i64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status and error code for this error
    pub fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::UsernameExists(_) => (StatusCode::CONFLICT, ErrorCode::Duplicate),
            AppError::InvalidCategory(_) | AppError::InvalidVariant(_) | AppError::Validation(_) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue)
            }
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, ErrorCode::NoSuchUser),
            AppError::NotLoggedIn => (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchItem),
            AppError::Unavailable(_) => (StatusCode::CONFLICT, ErrorCode::ItemNotAvailable),
            AppError::AlreadyAvailable(_) => (StatusCode::CONFLICT, ErrorCode::ItemAlreadyAvailable),
            AppError::OverdueBlock(_) => (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::OverdueItems),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Failure),
        }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
