// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use thiserror::Error;

/// Domain rejections produced by the mutation engine and the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostError {
    #[error("No post found with that ID")]
    PostNotFound,

    #[error("Comment does not exist")]
    CommentNotFound,

    #[error("User already liked this post")]
    AlreadyLiked,

    #[error("You have not yet liked this post")]
    NotLiked,

    #[error("User not authorized")]
    NotAuthorized,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Persistence failures. Never a domain outcome.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Outcome of a guarded store operation: the mutation was rejected, or the
/// store itself failed.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error(transparent)]
    Rejected(#[from] PostError),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<sqlx::Error> for UpdateError {
    fn from(err: sqlx::Error) -> Self {
        UpdateError::Storage(err.into())
    }
}

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable (store down)
    ServiceUnavailable(String),

    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    AuthError(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (e.g., duplicate like)
    Conflict(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::error!("Storage unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service temporarily unavailable".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::AuthError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// One status per rejection kind, shared by every route.
impl From<PostError> for AppError {
    fn from(err: PostError) -> Self {
        let msg = err.to_string();
        match err {
            PostError::PostNotFound | PostError::CommentNotFound => AppError::NotFound(msg),
            PostError::AlreadyLiked | PostError::NotLiked => AppError::Conflict(msg),
            PostError::NotAuthorized => AppError::Forbidden(msg),
            PostError::InvalidInput(_) => AppError::BadRequest(msg),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::ServiceUnavailable(err.to_string())
    }
}

impl From<UpdateError> for AppError {
    fn from(err: UpdateError) -> Self {
        match err {
            UpdateError::Rejected(e) => e.into(),
            UpdateError::Storage(e) => e.into(),
        }
    }
}
