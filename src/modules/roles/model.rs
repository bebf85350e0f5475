//! Role data models and DTOs.
//!
//! Roles are scoped to a guard (a single `"web"` guard here), so a role
//! name is unique per guard. Assignment is a two-state machine per
//! (user, role) pair: `Unassigned` and `Assigned`, with `assign`/`remove`
//! the only transitions.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A role within the "web" guard.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub guard_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for assigning or removing a role, identified by name.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct RoleAssignmentDto {
    pub user_id: Uuid,
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
}

/// A user together with the names of their assigned roles.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserWithRoles {
    pub id: Uuid,
    pub given_name: String,
    pub family_name: String,
    pub preferred_name: String,
    pub pronouns: String,
    pub email: String,
    pub roles: Vec<String>,
}

/// Payload of the roles index: every role plus every user with their roles.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RolesIndexResponse {
    pub roles: Vec<Role>,
    pub users: Vec<UserWithRoles>,
}

/// Payload of `GET /users/{id}/roles`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserRolesResponse {
    pub user: String,
    pub roles: Vec<String>,
}

/// Well-known roles seeded by migration with fixed IDs.
pub mod well_known {
    use uuid::Uuid;

    pub const SUPER_ADMIN: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000001);
    pub const ADMIN: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000002);
    pub const STAFF: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000003);
    pub const STUDENT: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000004);

    pub mod names {
        pub const SUPER_ADMIN: &str = "Super Admin";
        pub const ADMIN: &str = "Admin";
        pub const STAFF: &str = "Staff";
        pub const STUDENT: &str = "Student";
    }

    pub fn all() -> Vec<(Uuid, &'static str)> {
        vec![
            (SUPER_ADMIN, names::SUPER_ADMIN),
            (ADMIN, names::ADMIN),
            (STAFF, names::STAFF),
            (STUDENT, names::STUDENT),
        ]
    }
}
