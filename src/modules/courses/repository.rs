use anyhow::Context;
use async_trait::async_trait;
use coursehub_core::{AppError, ListQuery, PaginatedList};
use tracing::instrument;

use super::model::{Course, CourseForm, CourseId, CourseSort};
use crate::store::{PgStore, map_write_error};

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn list(&self, query: &ListQuery<CourseSort>) -> Result<PaginatedList<Course>, AppError>;

    async fn find(&self, id: CourseId) -> Result<Option<Course>, AppError>;

    async fn insert(&self, form: &CourseForm) -> Result<Course, AppError>;

    /// Returns `None` when no row with `id` was updated.
    async fn update(&self, id: CourseId, form: &CourseForm) -> Result<Option<Course>, AppError>;

    /// Deletes the course and, through the foreign key, its enrollments.
    async fn delete(&self, id: CourseId) -> Result<bool, AppError>;
}

const COURSE_COLUMNS: &str = "id, title, description, credits, start_date, end_date, is_active";

const COURSE_FILTER: &str = "($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1)";

fn order_by(sort: CourseSort) -> &'static str {
    match sort {
        CourseSort::TitleAsc => "title ASC, id ASC",
        CourseSort::TitleDesc => "title DESC, id DESC",
        CourseSort::CreditsAsc => "credits ASC, id ASC",
        CourseSort::CreditsDesc => "credits DESC, id DESC",
    }
}

#[async_trait]
impl CourseRepository for PgStore {
    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery<CourseSort>) -> Result<PaginatedList<Course>, AppError> {
        let pattern = query.like_pattern();

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM courses WHERE {COURSE_FILTER}"))
                .bind(&pattern)
                .fetch_one(self.pool())
                .await
                .context("Failed to count courses")
                .map_err(AppError::database)?;

        let sql = format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE {COURSE_FILTER} ORDER BY {} LIMIT $2 OFFSET $3",
            order_by(query.sort)
        );
        let courses = sqlx::query_as::<_, Course>(&sql)
            .bind(&pattern)
            .bind(query.page.limit())
            .bind(query.page.offset())
            .fetch_all(self.pool())
            .await
            .context("Failed to fetch courses")
            .map_err(AppError::database)?;

        Ok(PaginatedList::new(courses, total, query.page))
    }

    #[instrument(skip(self))]
    async fn find(&self, id: CourseId) -> Result<Option<Course>, AppError> {
        sqlx::query_as::<_, Course>(&format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .context("Failed to fetch course by ID")
            .map_err(AppError::database)
    }

    #[instrument(skip(self, form))]
    async fn insert(&self, form: &CourseForm) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            r#"
            INSERT INTO courses (title, description, credits, start_date, end_date, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COURSE_COLUMNS}
            "#
        ))
        .bind(&form.title)
        .bind(&form.description)
        .bind(form.credits)
        .bind(form.start_date)
        .bind(form.end_date)
        .bind(form.is_active)
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error)
    }

    #[instrument(skip(self, form))]
    async fn update(&self, id: CourseId, form: &CourseForm) -> Result<Option<Course>, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            r#"
            UPDATE courses
            SET title = $1, description = $2, credits = $3, start_date = $4, end_date = $5,
                is_active = $6
            WHERE id = $7
            RETURNING {COURSE_COLUMNS}
            "#
        ))
        .bind(&form.title)
        .bind(&form.description)
        .bind(form.credits)
        .bind(form.start_date)
        .bind(form.end_date)
        .bind(form.is_active)
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_write_error)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: CourseId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .context("Failed to delete course")
            .map_err(AppError::database)?;

        Ok(result.rows_affected() > 0)
    }
}
