use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::model::{
    CreateStudentDto, REQUIRED_STUDENT_FIELDS, Student, UpdateStudentDto,
};
use crate::utils::errors::AppError;
use crate::validator::check_required;

const STUDENT_COLUMNS: &str = "id, student_id, first_name, middle_name, last_name, program, \
     year, section, date_of_birth, contact_number, address, created_at, updated_at";

pub struct StudentService;

impl StudentService {
    /// Creates a student profile.
    ///
    /// The existence pre-check gives a friendly duplicate error; the
    /// unique index on `student_id` is the authoritative check, so a
    /// violation surfacing from the insert itself is reported as the same
    /// conflict even when the pre-check passed.
    #[instrument(skip(db, dto))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        let report = check_required(&dto, REQUIRED_STUDENT_FIELDS);
        if !report.is_valid {
            return Err(report.into_error());
        }
        let (
            Some(student_id),
            Some(first_name),
            Some(last_name),
            Some(program),
            Some(year),
            Some(section),
        ) = (
            dto.student_id,
            dto.first_name,
            dto.last_name,
            dto.program,
            dto.year,
            dto.section,
        )
        else {
            return Err(AppError::bad_request("Missing required fields"));
        };

        let existing = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE student_id = $1"
        ))
        .bind(&student_id)
        .fetch_optional(db)
        .await
        .context("Failed to check for existing student")
        .map_err(AppError::internal)?;

        if existing.is_some() {
            return Err(AppError::conflict("Student profile already exists"));
        }

        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (student_id, first_name, middle_name, last_name, program,
                                   year, section, date_of_birth, contact_number, address)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(&student_id)
        .bind(&first_name)
        .bind(&dto.middle_name)
        .bind(&last_name)
        .bind(&program)
        .bind(year)
        .bind(&section)
        .bind(dto.date_of_birth)
        .bind(&dto.contact_number)
        .bind(&dto.address)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::conflict("Student profile already exists");
                }
            }
            AppError::internal(e)
        })?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn get_students(db: &PgPool) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students ORDER BY last_name, first_name"
        ))
        .fetch_all(db)
        .await
        .context("Failed to fetch students")
        .map_err(AppError::internal)?;

        Ok(students)
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, student_id: &str) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE student_id = $1"
        ))
        .bind(student_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch student")
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found("Student profile not found"))?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn get_student_by_id(db: &PgPool, id: Uuid) -> Result<Student, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch student by id")
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found("Student profile not found"))?;

        Ok(student)
    }

    /// Applies a partial update on top of the existing record.
    ///
    /// `student_id` never changes; the row is addressed by storage id.
    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        student_id: &str,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = Self::get_student(db, student_id).await?;

        let student = sqlx::query_as::<_, Student>(&format!(
            "UPDATE students
             SET first_name = $1, middle_name = $2, last_name = $3, program = $4,
                 year = $5, section = $6, date_of_birth = $7, contact_number = $8,
                 address = $9, updated_at = now()
             WHERE id = $10
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(dto.first_name.unwrap_or(existing.first_name))
        .bind(dto.middle_name.or(existing.middle_name))
        .bind(dto.last_name.unwrap_or(existing.last_name))
        .bind(dto.program.unwrap_or(existing.program))
        .bind(dto.year.unwrap_or(existing.year))
        .bind(dto.section.unwrap_or(existing.section))
        .bind(dto.date_of_birth.or(existing.date_of_birth))
        .bind(dto.contact_number.or(existing.contact_number))
        .bind(dto.address.or(existing.address))
        .bind(existing.id)
        .fetch_one(db)
        .await
        .context("Failed to update student")
        .map_err(AppError::internal)?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, student_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE student_id = $1")
            .bind(student_id)
            .execute(db)
            .await
            .context("Failed to delete student")
            .map_err(AppError::internal)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Student profile not found"));
        }

        Ok(())
    }
}
