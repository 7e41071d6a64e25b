//! Error types for the task and user services.
//!
//! `ServiceError` is what the stores, validators and lifecycle return;
//! `ApiError` is its HTTP rendering.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::handlers::response::ErrorBody;

/// Main error type for service operations.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    /// Connection pool errors
    #[error("Connection pool error: {0}")]
    Pool(String),

    /// Missing or malformed request fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// Path or query identifier is not an integer
    #[error("Invalid id: {0:?}")]
    InvalidId(String),

    /// Requested status is not one of the known values
    #[error("Invalid status: {0:?}")]
    InvalidStatus(String),

    #[error("Task not found: {0}")]
    TaskNotFound(i32),

    #[error("User not found: {0}")]
    UserNotFound(i32),

    /// The referenced user failed the existence check
    #[error("User does not exist: {0}")]
    UserDoesNotExist(i32),

    /// Internal error (unexpected)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error type for API operations (converts to HTTP responses).
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("internal server error")]
    InternalServerError,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(message) => ApiError::BadRequest(message),
            ServiceError::InvalidId(_) => ApiError::BadRequest("invalid id".to_string()),
            ServiceError::InvalidStatus(_) => ApiError::BadRequest("invalid status".to_string()),
            ServiceError::TaskNotFound(_) => ApiError::NotFound("task not found".to_string()),
            ServiceError::UserNotFound(_) => ApiError::NotFound("user not found".to_string()),
            ServiceError::UserDoesNotExist(_) => {
                ApiError::NotFound("user does not exist".to_string())
            }
            ServiceError::Database(e) => {
                log::error!("Database error: {}", e);
                ApiError::InternalServerError
            }
            ServiceError::Pool(e) => {
                log::error!("Pool error: {}", e);
                ApiError::InternalServerError
            }
            ServiceError::Internal(e) => {
                log::error!("Internal error: {}", e);
                ApiError::InternalServerError
            }
        }
    }
}

/// Result type alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
