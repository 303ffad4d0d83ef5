use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use coursehub_core::AppError;
use tracing::instrument;

use super::model::{PaginatedStudentsResponse, Student, StudentForm, StudentId, StudentSort};
use super::service::StudentService;
use crate::middleware::auth::{RequireAdmin, RequireMember};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;
use coursehub_models::ListParams;

#[utoipa::path(
    get,
    path = "/api/students",
    params(ListParams),
    responses(
        (status = 200, description = "One page of students", body = PaginatedStudentsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    let query = params.into_query::<StudentSort>();
    let page = StudentService::list(state.students.as_ref(), &query).await?;
    Ok(Json(PaginatedStudentsResponse::new(page, &query)))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _member))]
pub async fn get_student(
    State(state): State<AppState>,
    _member: RequireMember,
    Path(id): Path<StudentId>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::get(state.students.as_ref(), id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = StudentForm,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _admin))]
pub async fn create_student(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(form): ValidatedJson<StudentForm>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student = StudentService::create(state.students.as_ref(), form).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = i64, Path, description = "Student ID")),
    request_body = StudentForm,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _admin))]
pub async fn update_student(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<StudentId>,
    ValidatedJson(form): ValidatedJson<StudentForm>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::update(state.students.as_ref(), id, form).await?;
    Ok(Json(student))
}

/// Delete a student and their enrollments
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Admin only", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _admin))]
pub async fn delete_student(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<StudentId>,
) -> Result<StatusCode, AppError> {
    StudentService::delete(state.students.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
