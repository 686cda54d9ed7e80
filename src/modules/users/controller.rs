use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::users::model::{UpdateUserDto, User, UserResponse};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::JsonBody;

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<User>>, AppError> {
    let users = UserService::get_users(&state.db).await?;
    Ok(Json(users))
}

/// Get a user by natural key
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(("user_id" = String, Path, description = "User natural key")),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<User>, AppError> {
    let user = UserService::get_user(&state.db, &user_id).await?;
    Ok(Json(user))
}

/// Get a user by storage id
#[utoipa::path(
    get,
    path = "/api/users/id/{id}",
    params(("id" = Uuid, Path, description = "User storage id")),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = UserService::get_user_by_id(&state.db, id).await?;
    Ok(Json(user))
}

/// Update a user by natural key
#[utoipa::path(
    put,
    path = "/api/users/{user_id}",
    params(("user_id" = String, Path, description = "User natural key")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Duplicate email", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(user_id): Path<String>,
    JsonBody(dto): JsonBody<UpdateUserDto>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::update_user(&state.db, &user_id, dto).await?;
    Ok(Json(UserResponse {
        message: "User updated successfully".to_string(),
        user,
    }))
}

/// Update a user by storage id
#[utoipa::path(
    put,
    path = "/api/users/id/{id}",
    params(("id" = Uuid, Path, description = "User storage id")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Duplicate email", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_user_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
    JsonBody(dto): JsonBody<UpdateUserDto>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::update_user_by_id(&state.db, id, dto).await?;
    Ok(Json(UserResponse {
        message: "User updated successfully".to_string(),
        user,
    }))
}

/// Delete a user by natural key
#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    params(("user_id" = String, Path, description = "User natural key")),
    responses(
        (status = 200, description = "User deleted successfully", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(user_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::delete_user(&state.db, &user_id).await?;
    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}

/// Delete a user by storage id
#[utoipa::path(
    delete,
    path = "/api/users/id/{id}",
    params(("id" = Uuid, Path, description = "User storage id")),
    responses(
        (status = 200, description = "User deleted successfully", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_user_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::delete_user_by_id(&state.db, id).await?;
    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
