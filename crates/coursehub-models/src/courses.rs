//! Course domain models and DTOs.

use crate::ids::CourseId;
use crate::rules::not_blank;
use chrono::NaiveDate;
use coursehub_core::{ListQuery, PageMeta, PaginatedList, SortKey};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// A course offered by the school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub credits: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
}

/// Body for creating or editing a course.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
#[validate(schema(function = "validate_course_dates", skip_on_field_errors = false))]
pub struct CourseForm {
    #[serde(default)]
    pub id: Option<CourseId>,
    #[validate(
        length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"),
        custom(function = "not_blank", message = "Title is required")
    )]
    pub title: String,
    #[validate(
        length(min = 1, max = 500, message = "Description must be between 1 and 500 characters"),
        custom(function = "not_blank", message = "Description is required")
    )]
    pub description: String,
    #[validate(range(min = 1, max = 10, message = "Credits must be between 1 and 10"))]
    pub credits: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

fn validate_course_dates(form: &CourseForm) -> Result<(), ValidationError> {
    if form.end_date < form.start_date {
        return Err(ValidationError::new("date_order")
            .with_message("End date must not be before start date".into()));
    }
    Ok(())
}

impl From<Course> for CourseForm {
    fn from(course: Course) -> Self {
        Self {
            id: Some(course.id),
            title: course.title,
            description: course.description,
            credits: course.credits,
            start_date: course.start_date,
            end_date: course.end_date,
            is_active: course.is_active,
        }
    }
}

/// Orderings offered by the course list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CourseSort {
    #[default]
    TitleAsc,
    TitleDesc,
    CreditsAsc,
    CreditsDesc,
}

impl SortKey for CourseSort {
    fn from_param(param: &str) -> Self {
        match param {
            "title_desc" => Self::TitleDesc,
            "Credits" => Self::CreditsAsc,
            "credits_desc" => Self::CreditsDesc,
            _ => Self::TitleAsc,
        }
    }

    fn as_param(&self) -> &'static str {
        match self {
            Self::TitleAsc => "",
            Self::TitleDesc => "title_desc",
            Self::CreditsAsc => "Credits",
            Self::CreditsDesc => "credits_desc",
        }
    }
}

/// One page of courses.
///
/// `enrolled_course_ids` lists the caller's own enrollments on this page and
/// is empty unless the caller is signed in and has a student record.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCoursesResponse {
    pub data: Vec<Course>,
    pub meta: PageMeta,
    pub search: Option<String>,
    pub sort_order: String,
    pub enrolled_course_ids: Vec<CourseId>,
}

impl PaginatedCoursesResponse {
    pub fn new(
        list: PaginatedList<Course>,
        query: &ListQuery<CourseSort>,
        enrolled_course_ids: Vec<CourseId>,
    ) -> Self {
        Self {
            data: list.items,
            meta: list.meta,
            search: query.search.clone(),
            sort_order: query.sort.as_param().to_string(),
            enrolled_course_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(credits: i32) -> CourseForm {
        CourseForm {
            id: None,
            title: "Algebra I".into(),
            description: "Linear equations and inequalities".into(),
            credits,
            start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            is_active: true,
        }
    }

    #[test]
    fn test_credits_boundaries() {
        assert!(form(0).validate().is_err());
        assert!(form(1).validate().is_ok());
        assert!(form(10).validate().is_ok());
        assert!(form(11).validate().is_err());
    }

    #[test]
    fn test_credits_error_message() {
        let errors = form(11).validate().unwrap_err();
        let credits = &errors.field_errors()["credits"];
        assert_eq!(
            credits[0].message.as_deref(),
            Some("Credits must be between 1 and 10")
        );
    }

    #[test]
    fn test_text_length_limits() {
        let mut f = form(3);
        f.title = "t".repeat(101);
        assert!(f.validate().is_err());

        let mut f = form(3);
        f.description = "d".repeat(500);
        assert!(f.validate().is_ok());
        f.description = "d".repeat(501);
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_whitespace_only_text_is_rejected() {
        let mut f = form(3);
        f.title = "   ".into();
        f.description = "\t\n".into();
        let errors = f.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["title"][0].message.as_deref(), Some("Title is required"));
        assert_eq!(
            fields["description"][0].message.as_deref(),
            Some("Description is required")
        );
    }

    #[test]
    fn test_end_date_before_start_is_rejected() {
        let mut f = form(3);
        f.end_date = NaiveDate::from_ymd_opt(2025, 8, 31).unwrap();
        assert!(f.validate().is_err());

        f.end_date = f.start_date;
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_is_active_defaults_to_true() {
        let f: CourseForm = serde_json::from_str(
            r#"{"title":"Art","description":"Drawing","credits":2,
                "start_date":"2025-01-01","end_date":"2025-06-01"}"#,
        )
        .unwrap();
        assert!(f.is_active);
        assert!(f.id.is_none());
    }

    #[test]
    fn test_sort_params() {
        assert_eq!(CourseSort::from_param(""), CourseSort::TitleAsc);
        assert_eq!(CourseSort::from_param("title_desc"), CourseSort::TitleDesc);
        assert_eq!(CourseSort::from_param("Credits"), CourseSort::CreditsAsc);
        assert_eq!(CourseSort::from_param("credits_desc"), CourseSort::CreditsDesc);
        assert_eq!(CourseSort::from_param("credits"), CourseSort::TitleAsc);
    }
}
