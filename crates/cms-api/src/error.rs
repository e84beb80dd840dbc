//! # API Error Types
//!
//! [`AppError`] maps store, content, and compile failures to HTTP status
//! codes and a uniform JSON body:
//!
//! ```json
//! {"error": {"code": "VALIDATION_ERROR", "message": "...", "details": {...}}}
//! ```
//!
//! Content rejections carry the validator's machine code in `details`.
//! Internal error messages are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

use cms_compile::CompileError;
use cms_entity::{StoreError, TemplateError};
use cms_schema::ContentError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional context, present only for some client errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Template content rejected by the content schema (422).
    #[error("invalid template content: {0}")]
    InvalidContent(ContentError),

    /// Request body or path identifier could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing or invalid bearer token (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error (500). Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) | Self::InvalidContent(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR")
            }
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        let Self::InvalidContent(err) = self else {
            return None;
        };
        let mut details = json!({ "reason": err.code() });
        match err {
            ContentError::UnknownKey(key) | ContentError::MissingRequiredKey(key) => {
                details["key"] = json!(key);
            }
            ContentError::InvalidName(kind) => {
                details["found"] = json!(kind);
            }
            ContentError::NotAnObject => {}
        }
        Some(details)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::InvalidContent(err) => err.to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ContentError> for AppError {
    fn from(err: ContentError) -> Self {
        Self::InvalidContent(err)
    }
}

impl From<TemplateError> for AppError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::InvalidContent(content) => Self::InvalidContent(content),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::TemplateNotFound(_) | StoreError::LayoutNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            StoreError::Rejected(template) => template.into(),
        }
    }
}

impl From<CompileError> for AppError {
    fn from(err: CompileError) -> Self {
        match err {
            CompileError::InvalidLayout { .. } => Self::Validation(err.to_string()),
            CompileError::LayoutMismatch { .. }
            | CompileError::Serialization(_)
            | CompileError::Merge(_) => Self::Internal(err.to_string()),
        }
    }
}
