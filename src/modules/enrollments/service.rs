use anyhow::anyhow;
use coursehub_core::{AppError, ListQuery, PaginatedList};
use tracing::{info, instrument, warn};

use super::model::{
    CourseId, Enrollment, EnrollmentDetails, EnrollmentForm, EnrollmentId, EnrollmentSort,
    NewEnrollment,
};
use super::repository::EnrollmentRepository;
use crate::metrics::{track_duplicate_enrollment, track_enrollment_created};
use crate::modules::auth::model::Principal;
use crate::modules::courses::repository::CourseRepository;
use crate::modules::students::repository::StudentRepository;

pub const DUPLICATE_ENROLLMENT: &str = "Already enrolled in this course.";
pub const STUDENT_PROFILE_MISSING: &str = "Student not found.";

pub struct EnrollmentService;

impl EnrollmentService {
    #[instrument(skip(repo))]
    pub async fn list(
        repo: &dyn EnrollmentRepository,
        query: &ListQuery<EnrollmentSort>,
    ) -> Result<PaginatedList<EnrollmentDetails>, AppError> {
        repo.list(query).await
    }

    #[instrument(skip(repo))]
    pub async fn get(
        repo: &dyn EnrollmentRepository,
        id: EnrollmentId,
    ) -> Result<EnrollmentDetails, AppError> {
        repo.find(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Enrollment not found")))
    }

    #[instrument(skip(repo))]
    pub async fn create(
        repo: &dyn EnrollmentRepository,
        form: EnrollmentForm,
    ) -> Result<Enrollment, AppError> {
        let Some(enrollment) = repo.insert(&NewEnrollment::from_form(&form)).await? else {
            track_duplicate_enrollment();
            return Err(AppError::bad_request(anyhow!(DUPLICATE_ENROLLMENT)));
        };

        track_enrollment_created("admin");
        info!(enrollment_id = %enrollment.id, "Enrollment created");
        Ok(enrollment)
    }

    #[instrument(skip(repo))]
    pub async fn update(
        repo: &dyn EnrollmentRepository,
        id: EnrollmentId,
        form: EnrollmentForm,
    ) -> Result<Enrollment, AppError> {
        if form.id.is_some_and(|body_id| body_id != id) {
            return Err(AppError::not_found(anyhow!("Enrollment not found")));
        }

        match repo.update(id, &NewEnrollment::from_form(&form)).await? {
            Some(enrollment) => Ok(enrollment),
            None if repo.find(id).await?.is_none() => {
                Err(AppError::not_found(anyhow!("Enrollment not found")))
            }
            None => Err(AppError::internal(anyhow!(
                "Concurrency conflict while updating enrollment {}",
                id
            ))),
        }
    }

    #[instrument(skip(repo))]
    pub async fn delete(repo: &dyn EnrollmentRepository, id: EnrollmentId) -> Result<(), AppError> {
        if !repo.delete(id).await? {
            return Err(AppError::not_found(anyhow!("Enrollment not found")));
        }
        info!(enrollment_id = %id, "Enrollment deleted");
        Ok(())
    }

    /// Enrolls the signed-in user's student record in `course_id`.
    ///
    /// The student is found by the account email. The unique
    /// `(student_id, course_id)` constraint decides duplicates, so two
    /// concurrent requests cannot both succeed.
    #[instrument(skip(students, courses, enrollments))]
    pub async fn self_enroll(
        students: &dyn StudentRepository,
        courses: &dyn CourseRepository,
        enrollments: &dyn EnrollmentRepository,
        principal: &Principal,
        course_id: CourseId,
    ) -> Result<Enrollment, AppError> {
        let student = students
            .find_by_email(&principal.email)
            .await?
            .ok_or_else(|| AppError::bad_request(anyhow!(STUDENT_PROFILE_MISSING)))?;

        if courses.find(course_id).await?.is_none() {
            return Err(AppError::not_found(anyhow!("Course not found")));
        }

        let new = NewEnrollment::starting_now(student.id, course_id);
        let Some(enrollment) = enrollments.insert(&new).await? else {
            track_duplicate_enrollment();
            warn!(student_id = %student.id, course_id = %course_id, "Duplicate enrollment rejected");
            return Err(AppError::bad_request(anyhow!(DUPLICATE_ENROLLMENT)));
        };

        track_enrollment_created("self");
        info!(
            enrollment_id = %enrollment.id,
            student_id = %student.id,
            course_id = %course_id,
            "Student enrolled"
        );
        Ok(enrollment)
    }

    /// Which of `course_ids` the caller is enrolled in.
    ///
    /// Empty for anonymous callers and for accounts with no student record
    /// under their email. The account's role does not matter.
    #[instrument(skip(students, enrollments, course_ids))]
    pub async fn enrolled_course_ids(
        students: &dyn StudentRepository,
        enrollments: &dyn EnrollmentRepository,
        principal: Option<&Principal>,
        course_ids: &[CourseId],
    ) -> Result<Vec<CourseId>, AppError> {
        let Some(principal) = principal else {
            return Ok(Vec::new());
        };

        match students.find_by_email(&principal.email).await? {
            Some(student) => enrollments.enrolled_course_ids(student.id, course_ids).await,
            None => Ok(Vec::new()),
        }
    }
}
