use std::collections::HashMap;

use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::roles::model::{Role, RolesIndexResponse, UserWithRoles};
use crate::utils::errors::AppError;

/// The single guard within which role names are unique.
const GUARD: &str = "web";

pub struct RoleService;

impl RoleService {
    /// Every role plus every user with their assigned role names.
    #[instrument(skip(db))]
    pub async fn index(db: &PgPool) -> Result<RolesIndexResponse, AppError> {
        let roles = sqlx::query_as::<_, Role>(
            "SELECT id, name, guard_name, created_at, updated_at FROM roles ORDER BY name",
        )
        .fetch_all(db)
        .await?;

        let users = sqlx::query_as::<_, (Uuid, String, String, String, String, String)>(
            "SELECT id, given_name, family_name, preferred_name, pronouns, email
             FROM users ORDER BY created_at, id",
        )
        .fetch_all(db)
        .await?;

        let assignments = sqlx::query_as::<_, (Uuid, String)>(
            "SELECT ur.user_id, r.name
             FROM user_roles ur
             INNER JOIN roles r ON r.id = ur.role_id
             ORDER BY r.name",
        )
        .fetch_all(db)
        .await?;

        let mut names_by_user: HashMap<Uuid, Vec<String>> = HashMap::new();
        for (user_id, role_name) in assignments {
            names_by_user.entry(user_id).or_default().push(role_name);
        }

        let users = users
            .into_iter()
            .map(
                |(id, given_name, family_name, preferred_name, pronouns, email)| UserWithRoles {
                    id,
                    given_name,
                    family_name,
                    preferred_name,
                    pronouns,
                    email,
                    roles: names_by_user.remove(&id).unwrap_or_default(),
                },
            )
            .collect();

        Ok(RolesIndexResponse { roles, users })
    }

    /// Assigns `role_name` to the user.
    ///
    /// Preconditions, in order: the role must exist in the store (400),
    /// the user must exist (404) and be email-verified (400), and the pair
    /// must not already be assigned (409).
    #[instrument(skip(db))]
    pub async fn assign_role(db: &PgPool, user_id: Uuid, role_name: &str) -> Result<(), AppError> {
        let role = Self::find_role_by_name(db, role_name).await?;

        let user = sqlx::query_as::<_, (Uuid, Option<chrono::DateTime<chrono::Utc>>)>(
            "SELECT id, email_verified_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        if user.1.is_none() {
            return Err(AppError::bad_request(anyhow!(
                "This user is not verified yet."
            )));
        }

        if Self::has_role(db, user_id, role.id).await? {
            return Err(AppError::conflict(anyhow!(
                "This role is already assigned to the user."
            )));
        }

        sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(role.id)
            .execute(db)
            .await?;

        Ok(())
    }

    /// Removes `role_name` from the user.
    ///
    /// The role must exist (400) and the user must exist (404); removing a
    /// role that is not currently assigned is a conflict (409).
    #[instrument(skip(db))]
    pub async fn remove_role(db: &PgPool, user_id: Uuid, role_name: &str) -> Result<(), AppError> {
        let role = Self::find_role_by_name(db, role_name).await?;

        let user_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(user_id)
                .fetch_one(db)
                .await?;

        if !user_exists {
            return Err(AppError::not_found(anyhow!("User not found")));
        }

        if !Self::has_role(db, user_id, role.id).await? {
            return Err(AppError::conflict(anyhow!(
                "This role is not assigned to the user."
            )));
        }

        sqlx::query("DELETE FROM user_roles WHERE user_id = $1 AND role_id = $2")
            .bind(user_id)
            .bind(role.id)
            .execute(db)
            .await?;

        Ok(())
    }

    /// Role names currently assigned to the user. Pure read.
    #[instrument(skip(db))]
    pub async fn roles_of(db: &PgPool, user_id: Uuid) -> Result<Vec<String>, AppError> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT r.name
             FROM roles r
             INNER JOIN user_roles ur ON ur.role_id = r.id
             WHERE ur.user_id = $1
             ORDER BY r.name",
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(names)
    }

    async fn find_role_by_name(db: &PgPool, name: &str) -> Result<Role, AppError> {
        sqlx::query_as::<_, Role>(
            "SELECT id, name, guard_name, created_at, updated_at
             FROM roles WHERE name = $1 AND guard_name = $2",
        )
        .bind(name)
        .bind(GUARD)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::bad_request(anyhow!("The selected role is invalid.")))
    }

    async fn has_role(db: &PgPool, user_id: Uuid, role_id: Uuid) -> Result<bool, AppError> {
        let has = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM user_roles WHERE user_id = $1 AND role_id = $2)",
        )
        .bind(user_id)
        .bind(role_id)
        .fetch_one(db)
        .await?;

        Ok(has)
    }
}
