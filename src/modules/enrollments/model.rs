//! Enrollment data models and DTOs.
//!
//! Re-exports enrollment models from the `coursehub-models` crate.

use chrono::{DateTime, Utc};

pub use coursehub_models::enrollments::*;
pub use coursehub_models::ids::{CourseId, EnrollmentId, StudentId};

/// Column values written by an insert or update.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEnrollment {
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub grade: Option<f64>,
    pub enrollment_date: DateTime<Utc>,
    pub is_completed: bool,
}

impl NewEnrollment {
    /// A fresh, ungraded enrollment starting now.
    pub fn starting_now(student_id: StudentId, course_id: CourseId) -> Self {
        Self {
            student_id,
            course_id,
            grade: None,
            enrollment_date: Utc::now(),
            is_completed: false,
        }
    }

    pub fn from_form(form: &EnrollmentForm) -> Self {
        Self {
            student_id: form.student_id,
            course_id: form.course_id,
            grade: form.grade,
            enrollment_date: form.enrollment_date.unwrap_or_else(Utc::now),
            is_completed: form.is_completed,
        }
    }
}
