use anyhow::Context;
use async_trait::async_trait;
use coursehub_core::{AppError, ListQuery, PaginatedList};
use tracing::instrument;

use super::model::{Student, StudentForm, StudentId, StudentSort};
use crate::store::{PgStore, map_write_error};

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn list(&self, query: &ListQuery<StudentSort>) -> Result<PaginatedList<Student>, AppError>;

    async fn find(&self, id: StudentId) -> Result<Option<Student>, AppError>;

    /// Case-insensitive lookup used to link a signed-in account to its student record.
    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, AppError>;

    async fn insert(&self, form: &StudentForm) -> Result<Student, AppError>;

    /// Returns `None` when no row with `id` was updated.
    async fn update(&self, id: StudentId, form: &StudentForm) -> Result<Option<Student>, AppError>;

    /// Returns `false` when no row with `id` existed.
    async fn delete(&self, id: StudentId) -> Result<bool, AppError>;
}

const STUDENT_COLUMNS: &str = "id, first_name, last_name, email, date_of_birth, enrollment_date";

const STUDENT_FILTER: &str =
    "($1::text IS NULL OR first_name ILIKE $1 OR last_name ILIKE $1 OR email ILIKE $1)";

fn order_by(sort: StudentSort) -> &'static str {
    match sort {
        StudentSort::LastNameAsc => "last_name ASC, id ASC",
        StudentSort::LastNameDesc => "last_name DESC, id DESC",
        StudentSort::EmailAsc => "email ASC, id ASC",
        StudentSort::EmailDesc => "email DESC, id DESC",
    }
}

#[async_trait]
impl StudentRepository for PgStore {
    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery<StudentSort>) -> Result<PaginatedList<Student>, AppError> {
        let pattern = query.like_pattern();

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM students WHERE {STUDENT_FILTER}"))
                .bind(&pattern)
                .fetch_one(self.pool())
                .await
                .context("Failed to count students")
                .map_err(AppError::database)?;

        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE {STUDENT_FILTER} ORDER BY {} LIMIT $2 OFFSET $3",
            order_by(query.sort)
        );
        let students = sqlx::query_as::<_, Student>(&sql)
            .bind(&pattern)
            .bind(query.page.limit())
            .bind(query.page.offset())
            .fetch_all(self.pool())
            .await
            .context("Failed to fetch students")
            .map_err(AppError::database)?;

        Ok(PaginatedList::new(students, total, query.page))
    }

    #[instrument(skip(self))]
    async fn find(&self, id: StudentId) -> Result<Option<Student>, AppError> {
        sqlx::query_as::<_, Student>(&format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .context("Failed to fetch student by ID")
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE LOWER(email) = LOWER($1) ORDER BY id LIMIT 1"
        ))
        .bind(email)
        .fetch_optional(self.pool())
        .await
        .context("Failed to fetch student by email")
        .map_err(AppError::database)
    }

    #[instrument(skip(self, form))]
    async fn insert(&self, form: &StudentForm) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            r#"
            INSERT INTO students (first_name, last_name, email, date_of_birth, enrollment_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {STUDENT_COLUMNS}
            "#
        ))
        .bind(&form.first_name)
        .bind(&form.last_name)
        .bind(&form.email)
        .bind(form.date_of_birth)
        .bind(form.enrollment_date)
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error)
    }

    #[instrument(skip(self, form))]
    async fn update(&self, id: StudentId, form: &StudentForm) -> Result<Option<Student>, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            r#"
            UPDATE students
            SET first_name = $1, last_name = $2, email = $3, date_of_birth = $4, enrollment_date = $5
            WHERE id = $6
            RETURNING {STUDENT_COLUMNS}
            "#
        ))
        .bind(&form.first_name)
        .bind(&form.last_name)
        .bind(&form.email)
        .bind(form.date_of_birth)
        .bind(form.enrollment_date)
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_write_error)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: StudentId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .context("Failed to delete student")
            .map_err(AppError::database)?;

        Ok(result.rows_affected() > 0)
    }
}
