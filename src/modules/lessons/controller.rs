use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use serde_json::{Value, json};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::lessons::model::{
    CreateLessonDto, LessonFilterParams, LessonWithUsers, PaginatedLessonsResponse,
    UpdateLessonDto,
};
use crate::modules::lessons::service::LessonService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

/// A paginated list of (all) lessons.
///
/// Searchable with `?search=TERM` across course, cluster, name, date,
/// weekday and duration fields; pageable with `?page=N&perPage=M`
/// (e.g. `/api/v1/lessons?search=ICT&page=2&perPage=15`).
#[utoipa::path(
    get,
    path = "/api/v1/lessons",
    params(
        ("search" = Option<String>, Query, description = "Substring to match against lesson fields"),
        ("page" = Option<i64>, Query, description = "1-indexed page number"),
        ("perPage" = Option<i64>, Query, description = "Page size override"),
    ),
    responses(
        (status = 200, description = "Lessons found", body = PaginatedLessonsResponse),
        (status = 404, description = "No lessons matched"),
    ),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<LessonFilterParams>,
) -> Result<Response, AppError> {
    let page = LessonService::get_lessons(&state.db, params).await?;

    if page.data.is_empty() {
        return Ok(ApiResponse::error(
            json!([]),
            "No Lessons Found",
            StatusCode::NOT_FOUND,
        ));
    }

    Ok(ApiResponse::success(page, "All lessons found successfully."))
}

/// Create a lesson. The union of `staff_ids` and `student_ids` becomes the
/// lesson's attached-user set.
#[utoipa::path(
    post,
    path = "/api/v1/lessons",
    request_body = CreateLessonDto,
    responses(
        (status = 201, description = "Lesson created", body = LessonWithUsers),
        (status = 400, description = "Validation failed"),
    ),
    tag = "Lessons"
)]
#[instrument(skip(state, dto))]
pub async fn store(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateLessonDto>,
) -> Result<Response, AppError> {
    let lesson = LessonService::create_lesson(&state.db, dto).await?;

    Ok(ApiResponse::success_with_status(
        lesson,
        "Lesson created successfully.",
        StatusCode::CREATED,
    ))
}

/// Fetch a single lesson with its staff and students.
#[utoipa::path(
    get,
    path = "/api/v1/lessons/{id}",
    params(("id" = Uuid, Path, description = "Lesson id")),
    responses(
        (status = 200, description = "Lesson found", body = LessonWithUsers),
        (status = 404, description = "Lesson not found"),
    ),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let lesson = LessonService::get_lesson(&state.db, id).await?;

    Ok(ApiResponse::success(lesson, "Lesson retrieved successfully."))
}

/// Update a lesson and re-sync its attached users.
#[utoipa::path(
    put,
    path = "/api/v1/lessons/{id}",
    params(("id" = Uuid, Path, description = "Lesson id")),
    request_body = UpdateLessonDto,
    responses(
        (status = 200, description = "Lesson updated", body = LessonWithUsers),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Lesson not found"),
    ),
    tag = "Lessons"
)]
#[instrument(skip(state, dto))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateLessonDto>,
) -> Result<Response, AppError> {
    let lesson = LessonService::update_lesson(&state.db, id, dto).await?;

    Ok(ApiResponse::success(lesson, "Lesson updated successfully."))
}

/// Delete a lesson; its join rows cascade.
#[utoipa::path(
    delete,
    path = "/api/v1/lessons/{id}",
    params(("id" = Uuid, Path, description = "Lesson id")),
    responses(
        (status = 200, description = "Lesson deleted"),
        (status = 404, description = "Lesson not found"),
    ),
    tag = "Lessons"
)]
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    LessonService::delete_lesson(&state.db, id).await?;

    Ok(ApiResponse::success(
        Value::Null,
        "Lesson deleted successfully.",
    ))
}
