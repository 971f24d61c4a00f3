//! Error types for the book API server

use std::any::Any;

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("json decoding : {0}")]
    JsonDecode(#[from] serde_json::Error),

    #[error("{0}")]
    BusinessRule(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error body carrying a single message
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body returned when a request body cannot be decoded
#[derive(Debug, Serialize, ToSchema)]
pub struct DecodeErrorResponse {
    pub error: String,
    pub status: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::BusinessRule(msg) => (StatusCode::BAD_REQUEST, msg),
            e @ AppError::JsonDecode(_) => {
                let status = StatusCode::BAD_REQUEST;
                let body = Json(DecodeErrorResponse {
                    error: e.to_string(),
                    status: status.as_u16(),
                });
                return (status, body).into_response();
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(MessageResponse { message })).into_response()
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        from_rejection(rejection.status(), rejection.body_text())
    }
}

fn from_rejection(status: StatusCode, text: String) -> AppError {
    if status.is_server_error() {
        AppError::Internal(text)
    } else {
        AppError::BadRequest(text)
    }
}

/// Turns a handler panic into a 500 response instead of dropping the connection
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
