//! User data models and DTOs.
//!
//! [`User`] is the persisted entity (the password hash is selected only
//! where needed and never serialized). Creation and update DTOs carry the
//! validation rules of the registration contract: unique email, confirmed
//! password of at least 8 characters, and `preferred_name` falling back to
//! `given_name` when omitted.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A user in the system.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub given_name: String,
    pub family_name: String,
    pub preferred_name: String,
    pub pronouns: String,
    pub email: String,
    pub email_verified_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Abbreviated user representation embedded in lesson responses.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct UserSummary {
    pub id: Uuid,
    pub given_name: String,
    pub family_name: String,
    pub preferred_name: String,
    pub pronouns: String,
    pub email: String,
}

/// DTO for creating a new user.
///
/// New users receive the Student role. The password must match its
/// confirmation and is bcrypt-hashed before storage.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1, message = "family_name is required"))]
    pub family_name: String,
    #[validate(length(min = 1, message = "given_name is required"))]
    pub given_name: String,
    pub preferred_name: Option<String>,
    #[validate(length(min = 1, message = "pronouns is required"))]
    pub pronouns: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(
        length(min = 8, message = "password must be at least 8 characters"),
        must_match(other = "password_confirmation", message = "password confirmation does not match")
    )]
    pub password: String,
    pub password_confirmation: String,
}

/// DTO for updating a user.
///
/// The password is optional; when present it must be confirmed and is
/// re-hashed. When absent the stored hash is left untouched.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, message = "family_name is required"))]
    pub family_name: String,
    #[validate(length(min = 1, message = "given_name is required"))]
    pub given_name: String,
    pub preferred_name: Option<String>,
    #[validate(length(min = 1, message = "pronouns is required"))]
    pub pronouns: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(
        length(min = 8, message = "password must be at least 8 characters"),
        must_match(other = "password_confirmation", message = "password confirmation does not match")
    )]
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

/// Query parameters for the user listing.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UserFilterParams {
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: crate::utils::pagination::PaginationParams,
}

/// Paginated response containing users.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub data: Vec<User>,
    pub meta: crate::utils::pagination::PaginationMeta,
}
