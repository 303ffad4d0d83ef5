use anyhow::anyhow;
use coursehub_core::{AppError, ListQuery, PaginatedList};
use tracing::{info, instrument};

use super::model::{Course, CourseForm, CourseId, CourseSort};
use super::repository::CourseRepository;
use crate::metrics::track_course_created;

pub struct CourseService;

impl CourseService {
    #[instrument(skip(repo))]
    pub async fn list(
        repo: &dyn CourseRepository,
        query: &ListQuery<CourseSort>,
    ) -> Result<PaginatedList<Course>, AppError> {
        repo.list(query).await
    }

    #[instrument(skip(repo))]
    pub async fn get(repo: &dyn CourseRepository, id: CourseId) -> Result<Course, AppError> {
        repo.find(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Course not found")))
    }

    #[instrument(skip(repo, form))]
    pub async fn create(repo: &dyn CourseRepository, form: CourseForm) -> Result<Course, AppError> {
        let course = repo.insert(&form).await?;
        track_course_created();
        info!(course_id = %course.id, title = %course.title, "Course created");
        Ok(course)
    }

    #[instrument(skip(repo, form))]
    pub async fn update(
        repo: &dyn CourseRepository,
        id: CourseId,
        form: CourseForm,
    ) -> Result<Course, AppError> {
        if form.id.is_some_and(|body_id| body_id != id) {
            return Err(AppError::not_found(anyhow!("Course not found")));
        }

        match repo.update(id, &form).await? {
            Some(course) => Ok(course),
            None if repo.find(id).await?.is_none() => {
                Err(AppError::not_found(anyhow!("Course not found")))
            }
            None => Err(AppError::internal(anyhow!(
                "Concurrency conflict while updating course {}",
                id
            ))),
        }
    }

    /// Removes the course together with its enrollments.
    #[instrument(skip(repo))]
    pub async fn delete(repo: &dyn CourseRepository, id: CourseId) -> Result<(), AppError> {
        if !repo.delete(id).await? {
            return Err(AppError::not_found(anyhow!("Course not found")));
        }
        info!(course_id = %id, "Course deleted");
        Ok(())
    }
}
