use anyhow::anyhow;
use coursehub_core::{AppError, ListQuery, PaginatedList};
use tracing::{info, instrument};

use super::model::{Student, StudentForm, StudentId, StudentSort};
use super::repository::StudentRepository;
use crate::metrics::track_student_created;

pub struct StudentService;

impl StudentService {
    #[instrument(skip(repo))]
    pub async fn list(
        repo: &dyn StudentRepository,
        query: &ListQuery<StudentSort>,
    ) -> Result<PaginatedList<Student>, AppError> {
        repo.list(query).await
    }

    #[instrument(skip(repo))]
    pub async fn get(repo: &dyn StudentRepository, id: StudentId) -> Result<Student, AppError> {
        repo.find(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))
    }

    #[instrument(skip(repo, form))]
    pub async fn create(repo: &dyn StudentRepository, form: StudentForm) -> Result<Student, AppError> {
        let student = repo.insert(&form).await?;
        track_student_created();
        info!(student_id = %student.id, "Student created");
        Ok(student)
    }

    /// Replaces every editable field.
    ///
    /// A body id different from `id` is answered as not found. When the
    /// update touches no row, the row is looked up again: gone means 404,
    /// still present means the write conflicted and is a server error.
    #[instrument(skip(repo, form))]
    pub async fn update(
        repo: &dyn StudentRepository,
        id: StudentId,
        form: StudentForm,
    ) -> Result<Student, AppError> {
        if form.id.is_some_and(|body_id| body_id != id) {
            return Err(AppError::not_found(anyhow!("Student not found")));
        }

        match repo.update(id, &form).await? {
            Some(student) => Ok(student),
            None if repo.find(id).await?.is_none() => {
                Err(AppError::not_found(anyhow!("Student not found")))
            }
            None => Err(AppError::internal(anyhow!(
                "Concurrency conflict while updating student {}",
                id
            ))),
        }
    }

    #[instrument(skip(repo))]
    pub async fn delete(repo: &dyn StudentRepository, id: StudentId) -> Result<(), AppError> {
        if !repo.delete(id).await? {
            return Err(AppError::not_found(anyhow!("Student not found")));
        }
        info!(student_id = %id, "Student deleted");
        Ok(())
    }
}
