use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use coursehub_core::AppError;
use tracing::instrument;

use super::model::{
    Enrollment, EnrollmentDetails, EnrollmentForm, EnrollmentId, EnrollmentSort,
    PaginatedEnrollmentsResponse, SelfEnrollRequest,
};
use super::service::EnrollmentService;
use crate::middleware::auth::{RequireAdmin, RequireMember, RequireStudentRole};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;
use coursehub_models::ListParams;

#[utoipa::path(
    get,
    path = "/api/enrollments",
    params(ListParams),
    responses(
        (status = 200, description = "One page of enrollments", body = PaginatedEnrollmentsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, _member))]
pub async fn list_enrollments(
    State(state): State<AppState>,
    _member: RequireMember,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedEnrollmentsResponse>, AppError> {
    let query = params.into_query::<EnrollmentSort>();
    let page = EnrollmentService::list(state.enrollments.as_ref(), &query).await?;
    Ok(Json(PaginatedEnrollmentsResponse::new(page, &query)))
}

#[utoipa::path(
    get,
    path = "/api/enrollments/{id}",
    params(("id" = i64, Path, description = "Enrollment ID")),
    responses(
        (status = 200, description = "Enrollment details", body = EnrollmentDetails),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Enrollment not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, _member))]
pub async fn get_enrollment(
    State(state): State<AppState>,
    _member: RequireMember,
    Path(id): Path<EnrollmentId>,
) -> Result<Json<EnrollmentDetails>, AppError> {
    let enrollment = EnrollmentService::get(state.enrollments.as_ref(), id).await?;
    Ok(Json(enrollment))
}

#[utoipa::path(
    post,
    path = "/api/enrollments",
    request_body = EnrollmentForm,
    responses(
        (status = 201, description = "Enrollment created", body = Enrollment),
        (status = 400, description = "Duplicate enrollment or unknown student/course", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, _admin))]
pub async fn create_enrollment(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(form): ValidatedJson<EnrollmentForm>,
) -> Result<(StatusCode, Json<Enrollment>), AppError> {
    let enrollment = EnrollmentService::create(state.enrollments.as_ref(), form).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

#[utoipa::path(
    put,
    path = "/api/enrollments/{id}",
    params(("id" = i64, Path, description = "Enrollment ID")),
    request_body = EnrollmentForm,
    responses(
        (status = 200, description = "Enrollment updated", body = Enrollment),
        (status = 400, description = "Duplicate enrollment or unknown student/course", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Enrollment not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, _admin))]
pub async fn update_enrollment(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<EnrollmentId>,
    ValidatedJson(form): ValidatedJson<EnrollmentForm>,
) -> Result<Json<Enrollment>, AppError> {
    let enrollment = EnrollmentService::update(state.enrollments.as_ref(), id, form).await?;
    Ok(Json(enrollment))
}

#[utoipa::path(
    delete,
    path = "/api/enrollments/{id}",
    params(("id" = i64, Path, description = "Enrollment ID")),
    responses(
        (status = 204, description = "Enrollment deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Enrollment not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, _admin))]
pub async fn delete_enrollment(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<EnrollmentId>,
) -> Result<StatusCode, AppError> {
    EnrollmentService::delete(state.enrollments.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Enroll the signed-in student in a course
#[utoipa::path(
    post,
    path = "/api/enrollments/enroll",
    request_body = SelfEnrollRequest,
    responses(
        (status = 201, description = "Enrolled", body = Enrollment),
        (status = 400, description = "Already enrolled, or no student record for this account", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - students only", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Enrollments"
)]
#[instrument(skip(state, student))]
pub async fn self_enroll(
    State(state): State<AppState>,
    RequireStudentRole(student): RequireStudentRole,
    Json(request): Json<SelfEnrollRequest>,
) -> Result<(StatusCode, Json<Enrollment>), AppError> {
    let enrollment = EnrollmentService::self_enroll(
        state.students.as_ref(),
        state.courses.as_ref(),
        state.enrollments.as_ref(),
        &student.0,
        request.course_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}
