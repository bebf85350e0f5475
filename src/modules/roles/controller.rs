use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use anyhow::anyhow;
use serde_json::Value;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::roles::model::{RoleAssignmentDto, RolesIndexResponse, UserRolesResponse};
use crate::modules::roles::service::RoleService;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

/// All roles and all users with their assigned roles.
#[utoipa::path(
    get,
    path = "/api/v1/roles",
    responses(
        (status = 200, description = "Roles and users retrieved", body = RolesIndexResponse),
        (status = 404, description = "No roles or users exist"),
    ),
    tag = "Roles"
)]
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    let response = RoleService::index(&state.db).await?;

    if response.roles.is_empty() && response.users.is_empty() {
        return Ok(ApiResponse::error(
            Value::Null,
            "No roles or users found",
            StatusCode::NOT_FOUND,
        ));
    }

    Ok(ApiResponse::success(
        response,
        "Roles and users retrieved successfully",
    ))
}

/// Assign a role (by name) to a user.
///
/// The role must already exist; the user must exist and be verified; the
/// role must not already be assigned.
#[utoipa::path(
    post,
    path = "/api/v1/roles/assign",
    request_body = RoleAssignmentDto,
    responses(
        (status = 200, description = "Role assigned"),
        (status = 400, description = "Unknown role or unverified user"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Role already assigned"),
    ),
    tag = "Roles"
)]
#[instrument(skip(state))]
pub async fn assign_role(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RoleAssignmentDto>,
) -> Result<Response, AppError> {
    RoleService::assign_role(&state.db, dto.user_id, &dto.role).await?;

    Ok(ApiResponse::success(
        Value::Null,
        "Role assigned to user successfully.",
    ))
}

/// Remove a role (by name) from a user.
#[utoipa::path(
    post,
    path = "/api/v1/roles/remove",
    request_body = RoleAssignmentDto,
    responses(
        (status = 200, description = "Role removed"),
        (status = 400, description = "Unknown role"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Role not currently assigned"),
    ),
    tag = "Roles"
)]
#[instrument(skip(state))]
pub async fn remove_role(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RoleAssignmentDto>,
) -> Result<Response, AppError> {
    RoleService::remove_role(&state.db, dto.user_id, &dto.role).await?;

    Ok(ApiResponse::success(
        Value::Null,
        "Role removed from user successfully.",
    ))
}

/// The roles assigned to a specific user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/roles",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User roles retrieved", body = UserRolesResponse),
        (status = 404, description = "User not found"),
    ),
    tag = "Roles"
)]
#[instrument(skip(state))]
pub async fn get_user_roles(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let user = UserService::find_user(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

    let roles = RoleService::roles_of(&state.db, id).await?;

    Ok(ApiResponse::success(
        UserRolesResponse {
            user: user.preferred_name,
            roles,
        },
        "User roles retrieved successfully",
    ))
}
