use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginDto, LoginResponse, MessageResponse, RegisterDto, RegisterResponse,
};
use crate::modules::students::model::{
    CreateStudentDto, Student, StudentResponse, UpdateStudentDto,
};
use crate::modules::users::model::{UpdateUserDto, User, UserResponse};
use crate::validator::FieldReport;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::get_user_by_id,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::update_user_by_id,
        crate::modules::users::controller::delete_user,
        crate::modules::users::controller::delete_user_by_id,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::create_student_profile,
        crate::modules::students::controller::get_student_profile,
        crate::modules::students::controller::get_student_by_id,
        crate::modules::students::controller::update_student_profile,
        crate::modules::students::controller::delete_student_profile,
        crate::modules::students::controller::test_create_student,
    ),
    components(
        schemas(
            User,
            UserResponse,
            UpdateUserDto,
            RegisterDto,
            RegisterResponse,
            LoginDto,
            LoginResponse,
            Student,
            StudentResponse,
            CreateStudentDto,
            UpdateStudentDto,
            MessageResponse,
            ErrorResponse,
            FieldReport,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "User record management"),
        (name = "Students", description = "Student profile management")
    ),
    info(
        title = "Registrar API",
        version = "0.1.0",
        description = "Student Information System REST API built with Rust, Axum, and PostgreSQL.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
