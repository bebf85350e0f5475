use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::units::model::{
    CreateUnitDto, PaginatedUnitsResponse, Unit, UnitFilterParams, UpdateUnitDto,
};
use crate::modules::units::service::UnitService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

/// A paginated list of (all) units.
#[utoipa::path(
    get,
    path = "/api/v1/units",
    params(
        ("search" = Option<String>, Query, description = "Substring to match against unit fields"),
        ("page" = Option<i64>, Query, description = "1-indexed page number"),
        ("perPage" = Option<i64>, Query, description = "Page size override"),
    ),
    responses(
        (status = 200, description = "Units found", body = PaginatedUnitsResponse),
        (status = 404, description = "No units matched"),
    ),
    tag = "Units"
)]
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<UnitFilterParams>,
) -> Result<Response, AppError> {
    let page = UnitService::get_units(&state.db, params).await?;

    if page.data.is_empty() {
        return Ok(ApiResponse::error(
            json!([]),
            "No units found",
            StatusCode::NOT_FOUND,
        ));
    }

    Ok(ApiResponse::success(page, "All units found"))
}

/// Create a unit; omitted optional fields become explicit nulls.
#[utoipa::path(
    post,
    path = "/api/v1/units",
    request_body = CreateUnitDto,
    responses(
        (status = 201, description = "Unit created", body = Unit),
        (status = 400, description = "Validation failed"),
    ),
    tag = "Units"
)]
#[instrument(skip(state, dto))]
pub async fn store(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUnitDto>,
) -> Result<Response, AppError> {
    let unit = UnitService::create_unit(&state.db, dto).await?;

    Ok(ApiResponse::success_with_status(
        unit,
        "Unit created",
        StatusCode::CREATED,
    ))
}

/// Fetch a single unit by id.
#[utoipa::path(
    get,
    path = "/api/v1/units/{id}",
    params(("id" = Uuid, Path, description = "Unit id")),
    responses(
        (status = 200, description = "Unit found", body = Unit),
        (status = 404, description = "Unit not found"),
    ),
    tag = "Units"
)]
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    match UnitService::find_unit(&state.db, id).await? {
        Some(unit) => Ok(ApiResponse::success(unit, "Unit found")),
        None => Ok(ApiResponse::error(
            json!([]),
            "No unit found",
            StatusCode::NOT_FOUND,
        )),
    }
}

/// Update a unit; the row is replaced in full.
#[utoipa::path(
    put,
    path = "/api/v1/units/{id}",
    params(("id" = Uuid, Path, description = "Unit id")),
    request_body = UpdateUnitDto,
    responses(
        (status = 200, description = "Unit updated", body = Unit),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Unit not found"),
    ),
    tag = "Units"
)]
#[instrument(skip(state, dto))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateUnitDto>,
) -> Result<Response, AppError> {
    let unit = UnitService::update_unit(&state.db, id, dto).await?;

    Ok(ApiResponse::success(unit, "Unit updated"))
}

/// Delete a unit.
#[utoipa::path(
    delete,
    path = "/api/v1/units/{id}",
    params(("id" = Uuid, Path, description = "Unit id")),
    responses(
        (status = 200, description = "Unit deleted"),
        (status = 404, description = "Unit not found"),
    ),
    tag = "Units"
)]
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    if !UnitService::delete_unit(&state.db, id).await? {
        return Ok(ApiResponse::error(
            json!([]),
            "Unit not found",
            StatusCode::NOT_FOUND,
        ));
    }

    Ok(ApiResponse::success(json!([]), "Unit deleted"))
}
