use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::packages::model::{
    CreatePackageDto, Package, PackageFilterParams, PaginatedPackagesResponse, UpdatePackageDto,
};
use crate::modules::packages::service::PackageService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

/// A paginated list of (all) training packages.
#[utoipa::path(
    get,
    path = "/api/v1/packages",
    params(
        ("search" = Option<String>, Query, description = "Substring to match against package fields"),
        ("page" = Option<i64>, Query, description = "1-indexed page number"),
        ("perPage" = Option<i64>, Query, description = "Page size override"),
    ),
    responses(
        (status = 200, description = "Packages found", body = PaginatedPackagesResponse),
        (status = 404, description = "No packages matched"),
    ),
    tag = "Packages"
)]
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<PackageFilterParams>,
) -> Result<Response, AppError> {
    let page = PackageService::get_packages(&state.db, params).await?;

    if page.data.is_empty() {
        return Ok(ApiResponse::error(
            json!([]),
            "No packages found",
            StatusCode::NOT_FOUND,
        ));
    }

    Ok(ApiResponse::success(page, "All packages found"))
}

/// Create a training package.
#[utoipa::path(
    post,
    path = "/api/v1/packages",
    request_body = CreatePackageDto,
    responses(
        (status = 201, description = "Package created", body = Package),
        (status = 400, description = "Validation failed"),
    ),
    tag = "Packages"
)]
#[instrument(skip(state, dto))]
pub async fn store(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreatePackageDto>,
) -> Result<Response, AppError> {
    let package = PackageService::create_package(&state.db, dto).await?;

    Ok(ApiResponse::success_with_status(
        package,
        "Package created",
        StatusCode::CREATED,
    ))
}

/// Fetch a single package by id.
#[utoipa::path(
    get,
    path = "/api/v1/packages/{id}",
    params(("id" = Uuid, Path, description = "Package id")),
    responses(
        (status = 200, description = "Package found", body = Package),
        (status = 404, description = "Package not found"),
    ),
    tag = "Packages"
)]
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    match PackageService::find_package(&state.db, id).await? {
        Some(package) => Ok(ApiResponse::success(package, "Package found")),
        None => Ok(ApiResponse::error(
            json!([]),
            "No package found",
            StatusCode::NOT_FOUND,
        )),
    }
}

/// Update a package.
#[utoipa::path(
    put,
    path = "/api/v1/packages/{id}",
    params(("id" = Uuid, Path, description = "Package id")),
    request_body = UpdatePackageDto,
    responses(
        (status = 200, description = "Package updated", body = Package),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Package not found"),
    ),
    tag = "Packages"
)]
#[instrument(skip(state, dto))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdatePackageDto>,
) -> Result<Response, AppError> {
    let package = PackageService::update_package(&state.db, id, dto).await?;

    Ok(ApiResponse::success(package, "Package updated"))
}

/// Delete a package.
#[utoipa::path(
    delete,
    path = "/api/v1/packages/{id}",
    params(("id" = Uuid, Path, description = "Package id")),
    responses(
        (status = 200, description = "Package deleted"),
        (status = 404, description = "Package not found"),
    ),
    tag = "Packages"
)]
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    if !PackageService::delete_package(&state.db, id).await? {
        return Ok(ApiResponse::error(
            json!([]),
            "Package not found",
            StatusCode::NOT_FOUND,
        ));
    }

    Ok(ApiResponse::success(json!([]), "Package deleted"))
}
