use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::service::duplicate_user_error;
use crate::modules::users::model::{UpdateUserDto, User};
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

const USER_COLUMNS: &str =
    "id, user_id, first_name, middle_name, last_name, email, role, created_at, updated_at";

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_users(db: &PgPool) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY last_name, first_name"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch users")
        .map_err(AppError::internal)?;

        Ok(users)
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, user_id: &str) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user")
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found("User not found"))?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn get_user_by_id(db: &PgPool, id: Uuid) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by id")
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found("User not found"))?;

        Ok(user)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_user(
        db: &PgPool,
        user_id: &str,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let existing = Self::get_user(db, user_id).await?;
        Self::apply_update(db, existing, dto).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update_user_by_id(
        db: &PgPool,
        id: Uuid,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let existing = Self::get_user_by_id(db, id).await?;
        Self::apply_update(db, existing, dto).await
    }

    /// Applies a partial update on top of the existing record.
    ///
    /// The natural key never changes; the row is addressed by storage id.
    async fn apply_update(
        db: &PgPool,
        existing: User,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let first_name = dto.first_name.unwrap_or(existing.first_name);
        let middle_name = dto.middle_name.or(existing.middle_name);
        let last_name = dto.last_name.unwrap_or(existing.last_name);
        let email = dto
            .email
            .map(|e| e.to_lowercase())
            .unwrap_or(existing.email);
        let role = dto.role.or(existing.role);

        let updated = if let Some(password) = dto.password {
            let hashed_password = hash_password(&password)?;
            sqlx::query_as::<_, User>(&format!(
                "UPDATE users
                 SET first_name = $1, middle_name = $2, last_name = $3, email = $4,
                     role = $5, password = $6, updated_at = now()
                 WHERE id = $7
                 RETURNING {USER_COLUMNS}"
            ))
            .bind(&first_name)
            .bind(&middle_name)
            .bind(&last_name)
            .bind(&email)
            .bind(&role)
            .bind(&hashed_password)
            .bind(existing.id)
            .fetch_one(db)
            .await
        } else {
            sqlx::query_as::<_, User>(&format!(
                "UPDATE users
                 SET first_name = $1, middle_name = $2, last_name = $3, email = $4,
                     role = $5, updated_at = now()
                 WHERE id = $6
                 RETURNING {USER_COLUMNS}"
            ))
            .bind(&first_name)
            .bind(&middle_name)
            .bind(&last_name)
            .bind(&email)
            .bind(&role)
            .bind(existing.id)
            .fetch_one(db)
            .await
        }
        .map_err(|e| duplicate_user_error(&e).unwrap_or_else(|| AppError::internal(e)))?;

        Ok(updated)
    }

    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, user_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(db)
            .await
            .context("Failed to delete user")
            .map_err(AppError::internal)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn delete_user_by_id(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete user by id")
            .map_err(AppError::internal)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }

        Ok(())
    }
}
