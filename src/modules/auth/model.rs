use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::users::model::User;
use crate::validator::RequiredField;

/// Required fields for registration, checked before any write.
pub const REQUIRED_REGISTER_FIELDS: &[RequiredField] = &[
    ("user_id", "userId"),
    ("first_name", "firstName"),
    ("last_name", "lastName"),
    ("email", "email"),
    ("password", "password"),
];

// JWT claims; `sub` carries the user's natural key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

/// Registration payload.
///
/// Required fields are optional at the type level so a missing value is
/// reported through the field report instead of a deserialization error.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDto {
    #[validate(required, length(min = 1))]
    pub user_id: Option<String>,
    #[validate(required, length(min = 1))]
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    #[validate(required, length(min = 1))]
    pub last_name: Option<String>,
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub user: User,
    pub access_token: String,
}
