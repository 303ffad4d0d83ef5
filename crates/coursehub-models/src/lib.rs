//! # Coursehub Models
//!
//! Domain models and DTOs for the coursehub API: database entities, typed
//! ids, request bodies with their validation rules, and list responses.
//!
//! # Modules
//!
//! - [`accounts`]: Identity accounts, roles and the request principal
//! - [`auth`]: Register/login DTOs
//! - [`courses`]: Courses
//! - [`enrollments`]: Enrollments and self-enrollment
//! - [`ids`]: Strongly-typed ids
//! - [`params`]: Shared list query parameters
//! - [`students`]: Students

pub mod accounts;
pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod ids;
pub mod params;
mod rules;
pub mod students;

// Re-export commonly used types at crate root for convenience
pub use accounts::{Account, AccountRecord, ManageRolesView, Principal, Role, UpdateRoleRequest};
pub use auth::{LoginRequest, LoginResponse, RegisterRequest};
pub use courses::{Course, CourseForm, CourseSort, PaginatedCoursesResponse};
pub use enrollments::{
    Enrollment, EnrollmentDetails, EnrollmentForm, EnrollmentSort, PaginatedEnrollmentsResponse,
    SelfEnrollRequest,
};
pub use ids::{AccountId, CourseId, EnrollmentId, StudentId};
pub use params::ListParams;
pub use students::{PaginatedStudentsResponse, Student, StudentForm, StudentSort};
