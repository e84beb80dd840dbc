//! # Request Extraction & Validation
//!
//! [`Validate`] for request DTOs and helpers that turn JSON body and path
//! rejections into [`AppError::BadRequest`].

use std::str::FromStr;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;

use cms_core::IdentifierError;

use crate::error::AppError;

/// Business-rule checks beyond what deserialization enforces.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and run its [`Validate`] checks.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate().map_err(AppError::Validation)?;
    Ok(value)
}

/// Parse a record identifier from the path.
///
/// Malformed identifiers become [`AppError::BadRequest`] with the usual
/// error body instead of axum's plain-text rejection.
pub fn extract_id<T>(result: Result<Path<String>, PathRejection>) -> Result<T, AppError>
where
    T: FromStr<Err = IdentifierError>,
{
    let Path(raw) = result.map_err(|err| AppError::BadRequest(err.body_text()))?;
    raw.parse()
        .map_err(|err: IdentifierError| AppError::BadRequest(err.to_string()))
}
