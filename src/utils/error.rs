use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::store::StoreError;
use crate::utils::response::error as error_response;

/// A single violated field in a create payload.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("store error")]
    Store(#[from] StoreError),

    #[error("internal server error")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Store(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::Validation(violations) => {
                warn!(?violations, "Request failed validation");
            }
            AppError::Unauthorized(msg) | AppError::Forbidden(msg) | AppError::NotFound(msg) => {
                warn!(error = ?self, message = %msg, "Request rejected");
            }
            AppError::Store(e) => {
                error!(error = ?e, "Store error");
            }
            AppError::Internal(msg) => {
                error!(message = %msg, "Internal error");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        // Log internal details
        self.log();

        // Only expose high-level messages to the client; validation
        // additionally reports which fields were violated
        let (public_message, details) = match &self {
            AppError::Validation(violations) => (
                "One or more fields failed validation".to_string(),
                serde_json::to_value(violations).ok(),
            ),
            AppError::Unauthorized(msg) | AppError::Forbidden(msg) | AppError::NotFound(msg) => {
                (msg.clone(), None)
            }
            AppError::Store(_) => ("A database error occurred".to_string(), None),
            AppError::Internal(_) => ("Internal server error".to_string(), None),
        };

        error_response(code, public_message, details, status)
    }
}
