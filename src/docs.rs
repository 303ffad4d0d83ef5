use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use coursehub_core::PageMeta;
use coursehub_models::{
    Account, Course, CourseForm, Enrollment, EnrollmentDetails, EnrollmentForm, LoginRequest,
    LoginResponse, ManageRolesView, PaginatedCoursesResponse, PaginatedEnrollmentsResponse,
    PaginatedStudentsResponse, Principal, RegisterRequest, Role, SelfEnrollRequest, Student,
    StudentForm, UpdateRoleRequest,
};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::me,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::students::controller::list_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::enrollments::controller::list_enrollments,
        crate::modules::enrollments::controller::get_enrollment,
        crate::modules::enrollments::controller::create_enrollment,
        crate::modules::enrollments::controller::update_enrollment,
        crate::modules::enrollments::controller::delete_enrollment,
        crate::modules::enrollments::controller::self_enroll,
        crate::modules::roles::controller::list_users,
        crate::modules::roles::controller::manage_roles,
        crate::modules::roles::controller::update_roles,
    ),
    components(
        schemas(
            Account,
            Role,
            Principal,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            ManageRolesView,
            UpdateRoleRequest,
            Course,
            CourseForm,
            PaginatedCoursesResponse,
            Student,
            StudentForm,
            PaginatedStudentsResponse,
            Enrollment,
            EnrollmentDetails,
            EnrollmentForm,
            SelfEnrollRequest,
            PaginatedEnrollmentsResponse,
            PageMeta,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Account registration and login"),
        (name = "Courses", description = "Course catalogue"),
        (name = "Students", description = "Student records"),
        (name = "Enrollments", description = "Enrollments and self-enrollment"),
        (name = "Roles", description = "Role administration")
    ),
    info(
        title = "Coursehub API",
        version = "0.1.0",
        description = "Students, courses and enrollments behind role-gated JSON endpoints.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
