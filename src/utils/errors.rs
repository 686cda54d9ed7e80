use std::collections::BTreeMap;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application error translated into an HTTP response at the boundary.
///
/// Controllers and services return `AppError` for every failure path;
/// the `IntoResponse` impl maps each variant onto the API's error body
/// (`{"message": ...}`, plus `requiredFields` for validation failures).
#[derive(Debug)]
pub enum AppError {
    /// Missing required fields, reported per field. HTTP 400.
    Validation {
        message: String,
        required_fields: BTreeMap<String, bool>,
    },
    /// Malformed request body or parameters. HTTP 400.
    BadRequest(String),
    /// Duplicate natural key or email. HTTP 400, message names the field.
    Conflict(String),
    /// Lookup by key or id found nothing. HTTP 404.
    NotFound(String),
    /// Credential mismatch or missing/invalid token. HTTP 401.
    Unauthorized(String),
    /// Unexpected store or codec failure. HTTP 500, message only.
    Internal(Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>, required_fields: BTreeMap<String, bool>) -> Self {
        Self::Validation {
            message: message.into(),
            required_fields,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::Internal(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation {
                message,
                required_fields,
            } => (
                StatusCode::BAD_REQUEST,
                json!({ "message": message, "requiredFields": required_fields }),
            ),
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, json!({ "message": message }))
            }
            AppError::Conflict(message) => (StatusCode::BAD_REQUEST, json!({ "message": message })),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "message": message })),
            AppError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, json!({ "message": message }))
            }
            AppError::Internal(error) => {
                tracing::error!(error = %error, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": error.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
