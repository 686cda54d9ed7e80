//! Student entity and DTOs.
//!
//! Two schema variants coexist in the console's history
//! (`studentId/program/year/section` and `idNumber/course/year`). The
//! first shape is canonical here; the second is accepted at the wire
//! level through serde aliases on `studentId` and `program`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::validator::RequiredField;

/// A student profile, keyed by the caller-assigned `studentId`.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub student_id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub program: String,
    pub year: i32,
    pub section: String,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Required fields for profile creation, checked before any write.
pub const REQUIRED_STUDENT_FIELDS: &[RequiredField] = &[
    ("student_id", "studentId"),
    ("first_name", "firstName"),
    ("last_name", "lastName"),
    ("program", "program"),
    ("year", "year"),
    ("section", "section"),
];

/// Profile creation payload.
///
/// Required fields are optional at the type level so missing values are
/// reported through the field report instead of a deserialization error.
/// A `year` of zero is treated as missing, the same as the presence
/// checks the console has always applied.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentDto {
    #[validate(required, length(min = 1))]
    #[serde(alias = "idNumber")]
    pub student_id: Option<String>,
    #[validate(required, length(min = 1))]
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    #[validate(required, length(min = 1))]
    pub last_name: Option<String>,
    #[validate(required, length(min = 1))]
    #[serde(alias = "course")]
    pub program: Option<String>,
    #[validate(required, range(min = 1))]
    pub year: Option<i32>,
    #[validate(required, length(min = 1))]
    pub section: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
}

/// Partial update payload.
///
/// The allow-list of mutable fields; `studentId` is not part of it, so a
/// payload attempting to change the natural key is ignored rather than
/// applied.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentDto {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(alias = "course")]
    pub program: Option<String>,
    pub year: Option<i32>,
    pub section: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub message: String,
    pub student: Student,
}
