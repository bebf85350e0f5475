use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::roles::model::well_known;
use crate::modules::users::model::{
    CreateUserDto, PaginatedUsersResponse, UpdateUserDto, User, UserFilterParams,
};
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;
use crate::utils::password::hash_password;

const USER_COLUMNS: &str = "id, given_name, family_name, preferred_name, pronouns, email, \
                            email_verified_at, created_at, updated_at";

/// Fields the list endpoint searches with an OR-chained substring match.
const SEARCHABLE_FIELDS: [&str; 5] = [
    "given_name",
    "family_name",
    "preferred_name",
    "pronouns",
    "email",
];

pub const DEFAULT_PER_PAGE: i64 = 6;

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_users(
        db: &PgPool,
        params: UserFilterParams,
    ) -> Result<PaginatedUsersResponse, AppError> {
        let per_page = params.pagination.per_page(DEFAULT_PER_PAGE);
        let page = params.pagination.page();
        let offset = params.pagination.offset(DEFAULT_PER_PAGE);

        let mut count_query = String::from("SELECT COUNT(*) FROM users");
        let mut data_query = format!("SELECT {USER_COLUMNS} FROM users");

        let pattern = params
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));

        if pattern.is_some() {
            let clauses: Vec<String> = SEARCHABLE_FIELDS
                .iter()
                .map(|field| format!("{field} ILIKE $1"))
                .collect();
            let where_clause = format!(" WHERE ({})", clauses.join(" OR "));
            count_query.push_str(&where_clause);
            data_query.push_str(&where_clause);
        }

        data_query.push_str(" ORDER BY created_at, id");
        data_query.push_str(&format!(" LIMIT {} OFFSET {}", per_page, offset));

        let (total, users) = if let Some(pattern) = &pattern {
            let total = sqlx::query_scalar::<_, i64>(&count_query)
                .bind(pattern)
                .fetch_one(db)
                .await?;
            let users = sqlx::query_as::<_, User>(&data_query)
                .bind(pattern)
                .fetch_all(db)
                .await?;
            (total, users)
        } else {
            let total = sqlx::query_scalar::<_, i64>(&count_query)
                .fetch_one(db)
                .await?;
            let users = sqlx::query_as::<_, User>(&data_query).fetch_all(db).await?;
            (total, users)
        };

        Ok(PaginatedUsersResponse {
            data: users,
            meta: PaginationMeta::new(total, per_page, page),
        })
    }

    #[instrument(skip(db, dto))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let email_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(&dto.email)
        .fetch_one(db)
        .await?;

        if email_taken {
            return Err(AppError::bad_request(anyhow!(
                "The email has already been taken."
            )));
        }

        let preferred_name = dto
            .preferred_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| dto.given_name.clone());
        let password_hash = hash_password(&dto.password)?;

        let mut tx = db.begin().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (given_name, family_name, preferred_name, pronouns, email, password)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.given_name)
        .bind(&dto.family_name)
        .bind(&preferred_name)
        .bind(&dto.pronouns)
        .bind(&dto.email)
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow!("The email has already been taken."));
            }
            AppError::from(e)
        })?;

        // Every user created through the API starts as a Student.
        sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2)")
            .bind(user.id)
            .bind(well_known::STUDENT)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn find_user(db: &PgPool, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_user(db: &PgPool, id: Uuid, dto: UpdateUserDto) -> Result<User, AppError> {
        let existing = Self::find_user(db, id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Specific User Not Found")))?;

        let email_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND id <> $2)",
        )
        .bind(&dto.email)
        .bind(id)
        .fetch_one(db)
        .await?;

        if email_taken {
            return Err(AppError::bad_request(anyhow!(
                "The email has already been taken."
            )));
        }

        let preferred_name = dto
            .preferred_name
            .filter(|name| !name.is_empty())
            .unwrap_or(existing.preferred_name);

        // Only re-hash when a new password was supplied.
        let password_hash = match dto.password.as_deref().filter(|p| !p.is_empty()) {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET given_name = $1,
                 family_name = $2,
                 preferred_name = $3,
                 pronouns = $4,
                 email = $5,
                 password = COALESCE($6, password),
                 updated_at = NOW()
             WHERE id = $7
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.given_name)
        .bind(&dto.family_name)
        .bind(&preferred_name)
        .bind(&dto.pronouns)
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(id)
        .fetch_one(db)
        .await?;

        Ok(user)
    }

    /// Returns true when a row was deleted.
    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
