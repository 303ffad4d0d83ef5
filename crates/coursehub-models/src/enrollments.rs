//! Enrollment domain models and DTOs.

use crate::ids::{CourseId, EnrollmentId, StudentId};
use chrono::{DateTime, Utc};
use coursehub_core::{ListQuery, PageMeta, PaginatedList, SortKey};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Link between a student and a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    /// Final grade on the 2.0 to 6.0 scale, absent until graded
    pub grade: Option<f64>,
    pub enrollment_date: DateTime<Utc>,
    pub is_completed: bool,
}

/// An enrollment joined with the names shown on list and detail pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EnrollmentDetails {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    pub grade: Option<f64>,
    pub enrollment_date: DateTime<Utc>,
    pub is_completed: bool,
    pub student_first_name: String,
    pub student_last_name: String,
    pub course_title: String,
}

impl EnrollmentDetails {
    pub fn enrollment(&self) -> Enrollment {
        Enrollment {
            id: self.id,
            student_id: self.student_id,
            course_id: self.course_id,
            grade: self.grade,
            enrollment_date: self.enrollment_date,
            is_completed: self.is_completed,
        }
    }
}

/// Body for creating or editing an enrollment as an administrator.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct EnrollmentForm {
    #[serde(default)]
    pub id: Option<EnrollmentId>,
    pub student_id: StudentId,
    pub course_id: CourseId,
    #[serde(default)]
    #[validate(range(min = 2.0, max = 6.0, message = "Grade must be between 2.0 and 6.0"))]
    pub grade: Option<f64>,
    /// Defaults to the time of the request
    #[serde(default)]
    pub enrollment_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_completed: bool,
}

/// A student's request to join a course.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SelfEnrollRequest {
    #[serde(alias = "courseId")]
    pub course_id: CourseId,
}

/// Orderings offered by the enrollment list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnrollmentSort {
    #[default]
    DateAsc,
    DateDesc,
    GradeAsc,
    GradeDesc,
}

impl SortKey for EnrollmentSort {
    fn from_param(param: &str) -> Self {
        match param {
            "date_desc" => Self::DateDesc,
            "Grade" => Self::GradeAsc,
            "grade_desc" => Self::GradeDesc,
            _ => Self::DateAsc,
        }
    }

    fn as_param(&self) -> &'static str {
        match self {
            Self::DateAsc => "",
            Self::DateDesc => "date_desc",
            Self::GradeAsc => "Grade",
            Self::GradeDesc => "grade_desc",
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedEnrollmentsResponse {
    pub data: Vec<EnrollmentDetails>,
    pub meta: PageMeta,
    pub search: Option<String>,
    pub sort_order: String,
}

impl PaginatedEnrollmentsResponse {
    pub fn new(list: PaginatedList<EnrollmentDetails>, query: &ListQuery<EnrollmentSort>) -> Self {
        Self {
            data: list.items,
            meta: list.meta,
            search: query.search.clone(),
            sort_order: query.sort.as_param().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(grade: Option<f64>) -> EnrollmentForm {
        EnrollmentForm {
            id: None,
            student_id: StudentId(1),
            course_id: CourseId(1),
            grade,
            enrollment_date: None,
            is_completed: false,
        }
    }

    #[test]
    fn test_grade_boundaries() {
        assert!(form(Some(1.9)).validate().is_err());
        assert!(form(Some(2.0)).validate().is_ok());
        assert!(form(Some(6.0)).validate().is_ok());
        assert!(form(Some(6.1)).validate().is_err());
        assert!(form(None).validate().is_ok());
    }

    #[test]
    fn test_form_defaults() {
        let f: EnrollmentForm = serde_json::from_str(r#"{"student_id":1,"course_id":2}"#).unwrap();
        assert_eq!(f.course_id, CourseId(2));
        assert!(f.grade.is_none());
        assert!(f.enrollment_date.is_none());
        assert!(!f.is_completed);
    }

    #[test]
    fn test_self_enroll_accepts_camel_case() {
        let req: SelfEnrollRequest = serde_json::from_str(r#"{"courseId":9}"#).unwrap();
        assert_eq!(req.course_id, CourseId(9));
    }

    #[test]
    fn test_sort_params() {
        assert_eq!(EnrollmentSort::from_param(""), EnrollmentSort::DateAsc);
        assert_eq!(EnrollmentSort::from_param("date_desc"), EnrollmentSort::DateDesc);
        assert_eq!(EnrollmentSort::from_param("Grade"), EnrollmentSort::GradeAsc);
        assert_eq!(EnrollmentSort::from_param("grade_desc"), EnrollmentSort::GradeDesc);
    }
}
