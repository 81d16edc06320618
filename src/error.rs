//! Application error type and its HTTP mapping.
//!
//! Every failure that can reach a caller is an [`AppError`]. Handlers return
//! `Result<_, AppError>` and axum renders the error through [`IntoResponse`]
//! as:
//!
//! ```json
//! { "error": { "code": "conflict", "message": "Shortcode already in use", "details": { "shortcode": "abc123" } } }
//! ```
//!
//! | Variant      | Status | Code               |
//! |--------------|--------|--------------------|
//! | `Validation` | 400    | `validation_error` |
//! | `NotFound`   | 404    | `not_found`        |
//! | `Conflict`   | 409    | `conflict`         |
//! | `Expired`    | 410    | `expired`          |
//! | `Capacity`   | 500    | `capacity_error`   |
//! | `Internal`   | 500    | `internal_error`   |

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Expired { message: String, details: Value },
    #[error("{message}")]
    Capacity { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn expired(message: impl Into<String>, details: Value) -> Self {
        Self::Expired {
            message: message.into(),
            details,
        }
    }
    pub fn capacity(message: impl Into<String>, details: Value) -> Self {
        Self::Capacity {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Expired { .. } => StatusCode::GONE,
            Self::Capacity { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into the payload sent to clients.
    ///
    /// Internal errors are reduced to a generic message; their details only
    /// ever reach the server log.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            Self::Validation { message, details } => ErrorInfo {
                code: "validation_error",
                message: message.clone(),
                details: details.clone(),
            },
            Self::NotFound { message, details } => ErrorInfo {
                code: "not_found",
                message: message.clone(),
                details: details.clone(),
            },
            Self::Conflict { message, details } => ErrorInfo {
                code: "conflict",
                message: message.clone(),
                details: details.clone(),
            },
            Self::Expired { message, details } => ErrorInfo {
                code: "expired",
                message: message.clone(),
                details: details.clone(),
            },
            Self::Capacity { message, details } => ErrorInfo {
                code: "capacity_error",
                message: message.clone(),
                details: details.clone(),
            },
            Self::Internal { .. } => ErrorInfo {
                code: "internal_error",
                message: "Internal Server Error".to_string(),
                details: json!({}),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Internal { message, details } = &self {
            tracing::error!(%details, "internal error: {}", message);
        }

        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
        AppError::bad_request(
            "Request validation failed",
            json!({ "fields": fields, "errors": errors.to_string() }),
        )
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Malformed JSON body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
