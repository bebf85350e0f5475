use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use serde_json::{Value, json};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::users::model::{
    CreateUserDto, PaginatedUsersResponse, UpdateUserDto, User, UserFilterParams,
};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

/// A paginated list of (all) users.
///
/// Searchable with `?search=TERM` across name, pronoun and email fields;
/// pageable with `?page=N&perPage=M`. An empty page is a 404 error
/// envelope, not an empty success.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(
        ("search" = Option<String>, Query, description = "Substring to match against user fields"),
        ("page" = Option<i64>, Query, description = "1-indexed page number"),
        ("perPage" = Option<i64>, Query, description = "Page size override"),
    ),
    responses(
        (status = 200, description = "Users found", body = PaginatedUsersResponse),
        (status = 404, description = "No users matched"),
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<UserFilterParams>,
) -> Result<Response, AppError> {
    let page = UserService::get_users(&state.db, params).await?;

    if page.data.is_empty() {
        return Ok(ApiResponse::error(
            json!([]),
            "No Users Found",
            StatusCode::NOT_FOUND,
        ));
    }

    Ok(ApiResponse::success(page, "All Users Found"))
}

/// Create a new user. The Student role is assigned by default and
/// `preferred_name` falls back to `given_name`.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Validation failed"),
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn store(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<Response, AppError> {
    let user = UserService::create_user(&state.db, dto).await?;

    Ok(ApiResponse::success_with_status(
        user,
        "User created successfully",
        StatusCode::CREATED,
    ))
}

/// Fetch a single user by id.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found"),
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    match UserService::find_user(&state.db, id).await? {
        Some(user) => Ok(ApiResponse::success(user, "Specific User Found")),
        None => Ok(ApiResponse::error(
            json!([]),
            "Specific User Not Found",
            StatusCode::NOT_FOUND,
        )),
    }
}

/// Update a user. Email stays unique across users; the password is only
/// re-hashed when supplied.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "User not found"),
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateUserDto>,
) -> Result<Response, AppError> {
    let user = UserService::update_user(&state.db, id, dto).await?;

    Ok(ApiResponse::success(user, "User updated successfully"))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found"),
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    if !UserService::delete_user(&state.db, id).await? {
        return Ok(ApiResponse::error(
            json!([]),
            "Specific User Not Found",
            StatusCode::NOT_FOUND,
        ));
    }

    Ok(ApiResponse::success(
        Value::Array(vec![]),
        "User deleted successfully",
    ))
}
