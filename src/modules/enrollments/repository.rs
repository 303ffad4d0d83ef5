use anyhow::Context;
use async_trait::async_trait;
use coursehub_core::{AppError, ListQuery, PaginatedList};
use tracing::instrument;

use super::model::{
    CourseId, Enrollment, EnrollmentDetails, EnrollmentId, EnrollmentSort, NewEnrollment,
    StudentId,
};
use crate::store::{PgStore, map_write_error};

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn list(
        &self,
        query: &ListQuery<EnrollmentSort>,
    ) -> Result<PaginatedList<EnrollmentDetails>, AppError>;

    async fn find(&self, id: EnrollmentId) -> Result<Option<EnrollmentDetails>, AppError>;

    /// Inserts unless the `(student_id, course_id)` pair is already taken,
    /// in which case `None` is returned and nothing is written.
    async fn insert(&self, new: &NewEnrollment) -> Result<Option<Enrollment>, AppError>;

    /// Returns `None` when no row with `id` was updated.
    async fn update(
        &self,
        id: EnrollmentId,
        new: &NewEnrollment,
    ) -> Result<Option<Enrollment>, AppError>;

    async fn delete(&self, id: EnrollmentId) -> Result<bool, AppError>;

    /// The subset of `course_ids` the student is enrolled in.
    async fn enrolled_course_ids(
        &self,
        student_id: StudentId,
        course_ids: &[CourseId],
    ) -> Result<Vec<CourseId>, AppError>;
}

const ENROLLMENT_COLUMNS: &str =
    "id, student_id, course_id, grade, enrollment_date, is_completed";

const DETAILS_SELECT: &str = r#"
    SELECT e.id, e.student_id, e.course_id, e.grade, e.enrollment_date, e.is_completed,
           s.first_name AS student_first_name, s.last_name AS student_last_name,
           c.title AS course_title
    FROM enrollments e
    JOIN students s ON s.id = e.student_id
    JOIN courses c ON c.id = e.course_id
"#;

const DETAILS_FILTER: &str =
    "($1::text IS NULL OR s.first_name ILIKE $1 OR s.last_name ILIKE $1 OR c.title ILIKE $1)";

fn order_by(sort: EnrollmentSort) -> &'static str {
    match sort {
        EnrollmentSort::DateAsc => "e.enrollment_date ASC, e.id ASC",
        EnrollmentSort::DateDesc => "e.enrollment_date DESC, e.id DESC",
        EnrollmentSort::GradeAsc => "e.grade ASC NULLS LAST, e.id ASC",
        EnrollmentSort::GradeDesc => "e.grade DESC NULLS FIRST, e.id DESC",
    }
}

#[async_trait]
impl EnrollmentRepository for PgStore {
    #[instrument(skip(self))]
    async fn list(
        &self,
        query: &ListQuery<EnrollmentSort>,
    ) -> Result<PaginatedList<EnrollmentDetails>, AppError> {
        let pattern = query.like_pattern();

        let total: i64 = sqlx::query_scalar(&format!(
            r#"
            SELECT COUNT(*)
            FROM enrollments e
            JOIN students s ON s.id = e.student_id
            JOIN courses c ON c.id = e.course_id
            WHERE {DETAILS_FILTER}
            "#
        ))
        .bind(&pattern)
        .fetch_one(self.pool())
        .await
        .context("Failed to count enrollments")
        .map_err(AppError::database)?;

        let sql = format!(
            "{DETAILS_SELECT} WHERE {DETAILS_FILTER} ORDER BY {} LIMIT $2 OFFSET $3",
            order_by(query.sort)
        );
        let enrollments = sqlx::query_as::<_, EnrollmentDetails>(&sql)
            .bind(&pattern)
            .bind(query.page.limit())
            .bind(query.page.offset())
            .fetch_all(self.pool())
            .await
            .context("Failed to fetch enrollments")
            .map_err(AppError::database)?;

        Ok(PaginatedList::new(enrollments, total, query.page))
    }

    #[instrument(skip(self))]
    async fn find(&self, id: EnrollmentId) -> Result<Option<EnrollmentDetails>, AppError> {
        sqlx::query_as::<_, EnrollmentDetails>(&format!("{DETAILS_SELECT} WHERE e.id = $1"))
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .context("Failed to fetch enrollment by ID")
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn insert(&self, new: &NewEnrollment) -> Result<Option<Enrollment>, AppError> {
        // The unique constraint, not a prior lookup, decides whether the pair is taken.
        sqlx::query_as::<_, Enrollment>(&format!(
            r#"
            INSERT INTO enrollments (student_id, course_id, grade, enrollment_date, is_completed)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (student_id, course_id) DO NOTHING
            RETURNING {ENROLLMENT_COLUMNS}
            "#
        ))
        .bind(new.student_id)
        .bind(new.course_id)
        .bind(new.grade)
        .bind(new.enrollment_date)
        .bind(new.is_completed)
        .fetch_optional(self.pool())
        .await
        .map_err(map_write_error)
    }

    #[instrument(skip(self))]
    async fn update(
        &self,
        id: EnrollmentId,
        new: &NewEnrollment,
    ) -> Result<Option<Enrollment>, AppError> {
        sqlx::query_as::<_, Enrollment>(&format!(
            r#"
            UPDATE enrollments
            SET student_id = $1, course_id = $2, grade = $3, enrollment_date = $4,
                is_completed = $5
            WHERE id = $6
            RETURNING {ENROLLMENT_COLUMNS}
            "#
        ))
        .bind(new.student_id)
        .bind(new.course_id)
        .bind(new.grade)
        .bind(new.enrollment_date)
        .bind(new.is_completed)
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_write_error)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: EnrollmentId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .context("Failed to delete enrollment")
            .map_err(AppError::database)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn enrolled_course_ids(
        &self,
        student_id: StudentId,
        course_ids: &[CourseId],
    ) -> Result<Vec<CourseId>, AppError> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_scalar::<_, CourseId>(
            "SELECT course_id FROM enrollments WHERE student_id = $1 AND course_id = ANY($2) ORDER BY course_id",
        )
        .bind(student_id)
        .bind(course_ids)
        .fetch_all(self.pool())
        .await
        .context("Failed to fetch enrolled course ids")
        .map_err(AppError::database)
    }
}
