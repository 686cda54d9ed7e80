//! User entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A registered user, as returned by the API.
///
/// The stored password hash is deliberately absent: queries select only
/// these columns, so the hash can never leak into a response.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub user_id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub role: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Partial update payload.
///
/// The allow-list of mutable fields; `userId` is not part of it, so a
/// payload attempting to change the natural key is ignored rather than
/// applied. A provided password is re-hashed before storage.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub message: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serializes_camel_case_without_password() {
        let user = User {
            id: Uuid::new_v4(),
            user_id: "u1".to_string(),
            first_name: "Ana".to_string(),
            middle_name: None,
            last_name: "Cruz".to_string(),
            email: "ana@x.com".to_string(),
            role: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["firstName"], "Ana");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_update_dto_ignores_natural_key() {
        let dto: UpdateUserDto =
            serde_json::from_str(r#"{"userId":"u2","firstName":"Maya"}"#).unwrap();
        assert_eq!(dto.first_name.as_deref(), Some("Maya"));
        // No userId field exists on the DTO; the key in the payload is dropped.
        assert!(dto.email.is_none());
    }
}
