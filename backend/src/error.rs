//! Error handling for the NurtureWise Agro dashboard
//!
//! Every failure is local to one request and recoverable by resubmitting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Session errors
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // Validation errors
    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Session flow errors
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    // External service errors
    #[error("Inference service error: {0}")]
    InferenceError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<shared::FieldError> for AppError {
    fn from(e: shared::FieldError) -> Self {
        AppError::validation(e.field, e.message)
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorDetail {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            field: None,
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::TokenExpired | AppError::InvalidToken | AppError::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidStateTransition(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InferenceError(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_)
            | AppError::DatabaseError(_)
            | AppError::Internal(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> ErrorDetail {
        match self {
            AppError::TokenExpired => ErrorDetail::new("TOKEN_EXPIRED", "Token has expired"),
            AppError::InvalidToken => ErrorDetail::new("INVALID_TOKEN", "Invalid token"),
            AppError::Unauthorized(message) => ErrorDetail::new("UNAUTHORIZED", message.clone()),
            AppError::Validation { field, message } => ErrorDetail {
                field: Some(field.clone()),
                ..ErrorDetail::new("VALIDATION_ERROR", message.clone())
            },
            AppError::NotFound(message) => ErrorDetail::new("NOT_FOUND", message.clone()),
            AppError::InvalidStateTransition(msg) => {
                ErrorDetail::new("INVALID_STATE_TRANSITION", msg.clone())
            }
            AppError::InferenceError(msg) => {
                ErrorDetail::new("INFERENCE_ERROR", format!("Inference service error: {}", msg))
            }
            AppError::Configuration(msg) => {
                ErrorDetail::new("CONFIGURATION_ERROR", format!("Configuration error: {}", msg))
            }
            AppError::DatabaseError(_) => {
                ErrorDetail::new("DATABASE_ERROR", "A database error occurred")
            }
            AppError::Internal(msg) => ErrorDetail::new("INTERNAL_ERROR", msg.clone()),
            AppError::InternalError(_) => {
                ErrorDetail::new("INTERNAL_ERROR", "An internal server error occurred")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: self.detail() })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
