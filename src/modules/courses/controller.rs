use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use coursehub_core::AppError;
use tracing::instrument;

use super::model::{Course, CourseForm, CourseId, CourseSort, PaginatedCoursesResponse};
use super::service::CourseService;
use crate::middleware::auth::{MaybeAuthUser, RequireAdmin, RequireMember};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::enrollments::service::EnrollmentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;
use coursehub_models::ListParams;

/// List courses
///
/// Open to anonymous callers. Signed-in students also receive the ids of the
/// listed courses they are enrolled in.
#[utoipa::path(
    get,
    path = "/api/courses",
    params(ListParams),
    responses(
        (status = 200, description = "One page of courses", body = PaginatedCoursesResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
    MaybeAuthUser(principal): MaybeAuthUser,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedCoursesResponse>, AppError> {
    let query = params.into_query::<CourseSort>();
    let page = CourseService::list(state.courses.as_ref(), &query).await?;

    let course_ids: Vec<CourseId> = page.items.iter().map(|c| c.id).collect();
    let enrolled = EnrollmentService::enrolled_course_ids(
        state.students.as_ref(),
        state.enrollments.as_ref(),
        principal.as_ref(),
        &course_ids,
    )
    .await?;

    Ok(Json(PaginatedCoursesResponse::new(page, &query, enrolled)))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = Course),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _member))]
pub async fn get_course(
    State(state): State<AppState>,
    _member: RequireMember,
    Path(id): Path<CourseId>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::get(state.courses.as_ref(), id).await?;
    Ok(Json(course))
}

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CourseForm,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _admin))]
pub async fn create_course(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(form): ValidatedJson<CourseForm>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = CourseService::create(state.courses.as_ref(), form).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    request_body = CourseForm,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _admin))]
pub async fn update_course(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<CourseId>,
    ValidatedJson(form): ValidatedJson<CourseForm>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::update(state.courses.as_ref(), id, form).await?;
    Ok(Json(course))
}

/// Delete a course and its enrollments
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _admin))]
pub async fn delete_course(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<CourseId>,
) -> Result<StatusCode, AppError> {
    CourseService::delete(state.courses.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
