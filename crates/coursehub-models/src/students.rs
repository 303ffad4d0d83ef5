//! Student domain models and DTOs.

use crate::ids::StudentId;
use crate::rules::not_blank;
use chrono::NaiveDate;
use coursehub_core::{ListQuery, PageMeta, PaginatedList, SortKey};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A student record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub enrollment_date: NaiveDate,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Body for creating or editing a student.
///
/// On edit the body may repeat the id from the path; a different id is
/// treated as a missing record.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct StudentForm {
    #[serde(default)]
    pub id: Option<StudentId>,
    #[validate(
        length(min = 1, max = 50, message = "First name must be between 1 and 50 characters"),
        custom(function = "not_blank", message = "First name is required")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, max = 50, message = "Last name must be between 1 and 50 characters"),
        custom(function = "not_blank", message = "Last name is required")
    )]
    pub last_name: String,
    #[validate(
        email(message = "Email must be a valid email address"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub enrollment_date: NaiveDate,
}

impl From<Student> for StudentForm {
    fn from(student: Student) -> Self {
        Self {
            id: Some(student.id),
            first_name: student.first_name,
            last_name: student.last_name,
            email: student.email,
            date_of_birth: student.date_of_birth,
            enrollment_date: student.enrollment_date,
        }
    }
}

/// Orderings offered by the student list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StudentSort {
    #[default]
    LastNameAsc,
    LastNameDesc,
    EmailAsc,
    EmailDesc,
}

impl SortKey for StudentSort {
    fn from_param(param: &str) -> Self {
        match param {
            "name_desc" => Self::LastNameDesc,
            "Email" => Self::EmailAsc,
            "email_desc" => Self::EmailDesc,
            _ => Self::LastNameAsc,
        }
    }

    fn as_param(&self) -> &'static str {
        match self {
            Self::LastNameAsc => "",
            Self::LastNameDesc => "name_desc",
            Self::EmailAsc => "Email",
            Self::EmailDesc => "email_desc",
        }
    }
}

/// One page of students together with the filter that produced it.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<Student>,
    pub meta: PageMeta,
    pub search: Option<String>,
    pub sort_order: String,
}

impl PaginatedStudentsResponse {
    pub fn new(list: PaginatedList<Student>, query: &ListQuery<StudentSort>) -> Self {
        Self {
            data: list.items,
            meta: list.meta,
            search: query.search.clone(),
            sort_order: query.sort.as_param().to_string(),
        }
    }
}
