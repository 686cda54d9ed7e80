//! Request body extraction and required-field reporting.
//!
//! Writes are validated before they reach the store: the controller runs
//! [`check_required`] against the entity's required-field list and answers
//! `400 {"message": "Missing required fields", "requiredFields": {...}}`
//! when the report fails, enumerating every required field with a presence
//! flag.
//!
//! Presence is truthy presence: an empty string or a numeric zero counts
//! as missing, matching the console's historical behavior.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::errors::AppError;

/// A required field, as (struct field name, wire name), e.g.
/// `("user_id", "userId")`. Reports always use the wire name.
pub type RequiredField = (&'static str, &'static str);

/// Per-field presence report for a write payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldReport {
    pub is_valid: bool,
    /// Every required field of the entity, mapped to whether it was present.
    pub required_fields: BTreeMap<String, bool>,
}

impl FieldReport {
    /// Converts a failed report into the standard validation error.
    pub fn into_error(self) -> AppError {
        AppError::validation("Missing required fields", self.required_fields)
    }
}

/// Checks a payload against its entity's required-field list.
///
/// Field-level rules on the DTO (`required`, `length(min = 1)`,
/// `range(min = 1)`) decide presence; the report maps each required
/// field's wire name to the outcome.
pub fn check_required<T: Validate>(dto: &T, required: &[RequiredField]) -> FieldReport {
    let failed = dto.validate().err();

    let mut is_valid = true;
    let mut required_fields = BTreeMap::new();
    for (field, wire) in required {
        let present = failed
            .as_ref()
            .is_none_or(|errors| !errors.field_errors().contains_key(*field));
        if !present {
            is_valid = false;
        }
        required_fields.insert((*wire).to_string(), present);
    }

    FieldReport {
        is_valid,
        required_fields,
    }
}

/// JSON body extractor with readable rejection messages.
///
/// Maps axum's deserialization rejections onto the API error body so a
/// malformed payload answers `400 {"message": ...}` instead of a plain
/// text response.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let error_msg = rejection.body_text();

                if error_msg.contains("missing field") {
                    let field = error_msg
                        .split("missing field `")
                        .nth(1)
                        .and_then(|s| s.split('`').next())
                        .unwrap_or("unknown");
                    return AppError::bad_request(format!("{} is required", field));
                }

                if error_msg.contains("invalid type") {
                    return AppError::bad_request("Invalid field type in request");
                }

                if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
                    return AppError::bad_request(
                        "Missing 'Content-Type: application/json' header",
                    );
                }

                AppError::bad_request("Invalid request body")
            })?;

        Ok(JsonBody(value))
    }
}
