use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::User;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};
use crate::validator::check_required;

use super::model::{LoginDto, LoginResponse, REQUIRED_REGISTER_FIELDS, RegisterDto};

const USER_COLUMNS: &str =
    "id, user_id, first_name, middle_name, last_name, email, role, created_at, updated_at";

pub struct AuthService;

impl AuthService {
    /// Registers a new user.
    ///
    /// The existence pre-check gives a friendly error naming the colliding
    /// field; the unique index is the authoritative check, so a violation
    /// surfacing from the insert itself is reported as the same conflict
    /// even when the pre-check passed.
    #[instrument(skip(db, dto))]
    pub async fn register(db: &PgPool, dto: RegisterDto) -> Result<User, AppError> {
        let report = check_required(&dto, REQUIRED_REGISTER_FIELDS);
        if !report.is_valid {
            return Err(report.into_error());
        }
        let (Some(user_id), Some(first_name), Some(last_name), Some(email), Some(password)) =
            (dto.user_id, dto.first_name, dto.last_name, dto.email, dto.password)
        else {
            return Err(AppError::bad_request("Missing required fields"));
        };
        let email = email.to_lowercase();

        let existing = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 OR user_id = $2"
        ))
        .bind(&email)
        .bind(&user_id)
        .fetch_optional(db)
        .await?;

        if let Some(existing) = existing {
            return Err(AppError::conflict(if existing.email == email {
                "Email already in use"
            } else {
                "User ID already exists"
            }));
        }

        let hashed_password = hash_password(&password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (user_id, first_name, middle_name, last_name, email, password, role)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&user_id)
        .bind(&first_name)
        .bind(&dto.middle_name)
        .bind(&last_name)
        .bind(&email)
        .bind(&hashed_password)
        .bind(&dto.role)
        .fetch_one(db)
        .await
        .map_err(|e| duplicate_user_error(&e).unwrap_or_else(|| AppError::internal(e)))?;

        Ok(user)
    }

    /// Verifies credentials and issues an access token.
    ///
    /// An unknown email is "not found"; a wrong password is "invalid
    /// credentials". A malformed stored hash propagates as an internal
    /// error from the codec rather than being conflated with either.
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginDto,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            user_id: String,
            first_name: String,
            middle_name: Option<String>,
            last_name: String,
            email: String,
            password: String,
            role: Option<String>,
            created_at: chrono::DateTime<chrono::Utc>,
            updated_at: chrono::DateTime<chrono::Utc>,
        }

        let row = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, user_id, first_name, middle_name, last_name, email, password, role,
                    created_at, updated_at
             FROM users WHERE email = $1",
        )
        .bind(dto.email.to_lowercase())
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

        if !verify_password(&dto.password, &row.password)? {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        let access_token = create_access_token(&row.user_id, &row.email, jwt_config)?;

        Ok(LoginResponse {
            message: "Login successful".to_string(),
            user: User {
                id: row.id,
                user_id: row.user_id,
                first_name: row.first_name,
                middle_name: row.middle_name,
                last_name: row.last_name,
                email: row.email,
                role: row.role,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            access_token,
        })
    }
}

/// Maps a unique-constraint violation on the users table to the conflict
/// error naming the colliding field.
pub fn duplicate_user_error(e: &sqlx::Error) -> Option<AppError> {
    if let sqlx::Error::Database(db_err) = e {
        if db_err.is_unique_violation() {
            return Some(match db_err.constraint() {
                Some("users_email_key") => AppError::conflict("Email already in use"),
                Some("users_user_id_key") => AppError::conflict("User ID already exists"),
                _ => AppError::conflict("User already exists"),
            });
        }
    }
    None
}
