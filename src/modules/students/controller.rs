use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::students::model::{
    CreateStudentDto, REQUIRED_STUDENT_FIELDS, Student, StudentResponse, UpdateStudentDto,
};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::{FieldReport, JsonBody, check_required};

/// List all student profiles
#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "List of students", body = Vec<Student>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = StudentService::get_students(&state.db).await?;
    Ok(Json(students))
}

/// Create a student profile
#[utoipa::path(
    post,
    path = "/api/students/profile",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student profile created successfully", body = StudentResponse),
        (status = 400, description = "Missing fields or duplicate student", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn create_student_profile(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    JsonBody(dto): JsonBody<CreateStudentDto>,
) -> Result<(StatusCode, Json<StudentResponse>), AppError> {
    let student = StudentService::create_student(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(StudentResponse {
            message: "Student profile created successfully".to_string(),
            student,
        }),
    ))
}

/// Get a student profile by natural key
#[utoipa::path(
    get,
    path = "/api/students/profile/{student_id}",
    params(("student_id" = String, Path, description = "Student natural key")),
    responses(
        (status = 200, description = "Student profile", body = Student),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student_profile(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(student_id): Path<String>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::get_student(&state.db, &student_id).await?;
    Ok(Json(student))
}

/// Get a student profile by storage id
#[utoipa::path(
    get,
    path = "/api/students/id/{id}",
    params(("id" = Uuid, Path, description = "Student storage id")),
    responses(
        (status = 200, description = "Student profile", body = Student),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::get_student_by_id(&state.db, id).await?;
    Ok(Json(student))
}

/// Update a student profile
#[utoipa::path(
    put,
    path = "/api/students/profile/{student_id}",
    params(("student_id" = String, Path, description = "Student natural key")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student profile updated successfully", body = StudentResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn update_student_profile(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(student_id): Path<String>,
    JsonBody(dto): JsonBody<UpdateStudentDto>,
) -> Result<Json<StudentResponse>, AppError> {
    let student = StudentService::update_student(&state.db, &student_id, dto).await?;
    Ok(Json(StudentResponse {
        message: "Student profile updated successfully".to_string(),
        student,
    }))
}

/// Delete a student profile
#[utoipa::path(
    delete,
    path = "/api/students/profile/{student_id}",
    params(("student_id" = String, Path, description = "Student natural key")),
    responses(
        (status = 200, description = "Student profile deleted successfully", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student_profile(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(student_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    StudentService::delete_student(&state.db, &student_id).await?;
    Ok(Json(MessageResponse {
        message: "Student profile deleted successfully".to_string(),
    }))
}

/// Dry-run validation of a student payload
///
/// Runs the same required-field checks as profile creation without
/// touching the store, so the console can validate a form ahead of the
/// real submit.
#[utoipa::path(
    post,
    path = "/api/students/test-create",
    request_body = CreateStudentDto,
    responses(
        (status = 200, description = "Payload is valid", body = FieldReport),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(dto))]
pub async fn test_create_student(
    _auth_user: AuthUser,
    JsonBody(dto): JsonBody<CreateStudentDto>,
) -> Result<Json<FieldReport>, AppError> {
    let report = check_required(&dto, REQUIRED_STUDENT_FIELDS);
    if !report.is_valid {
        return Err(report.into_error());
    }
    Ok(Json(report))
}
