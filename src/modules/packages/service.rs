use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::packages::model::{
    CreatePackageDto, Package, PackageFilterParams, PaginatedPackagesResponse, UpdatePackageDto,
};
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

const PACKAGE_COLUMNS: &str = "id, national_code, title, tga_status, created_at, updated_at";

pub const DEFAULT_PER_PAGE: i64 = 10;

pub struct PackageService;

impl PackageService {
    #[instrument(skip(db))]
    pub async fn get_packages(
        db: &PgPool,
        params: PackageFilterParams,
    ) -> Result<PaginatedPackagesResponse, AppError> {
        let per_page = params.pagination.per_page(DEFAULT_PER_PAGE);
        let page = params.pagination.page();
        let offset = params.pagination.offset(DEFAULT_PER_PAGE);

        let mut count_query = String::from("SELECT COUNT(*) FROM packages");
        let mut data_query = format!("SELECT {PACKAGE_COLUMNS} FROM packages");

        let pattern = params
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));

        if pattern.is_some() {
            let where_clause =
                " WHERE (national_code ILIKE $1 OR title ILIKE $1 OR tga_status ILIKE $1)";
            count_query.push_str(where_clause);
            data_query.push_str(where_clause);
        }

        data_query.push_str(" ORDER BY created_at, id");
        data_query.push_str(&format!(" LIMIT {} OFFSET {}", per_page, offset));

        let (total, packages) = if let Some(pattern) = &pattern {
            let total = sqlx::query_scalar::<_, i64>(&count_query)
                .bind(pattern)
                .fetch_one(db)
                .await?;
            let packages = sqlx::query_as::<_, Package>(&data_query)
                .bind(pattern)
                .fetch_all(db)
                .await?;
            (total, packages)
        } else {
            let total = sqlx::query_scalar::<_, i64>(&count_query)
                .fetch_one(db)
                .await?;
            let packages = sqlx::query_as::<_, Package>(&data_query)
                .fetch_all(db)
                .await?;
            (total, packages)
        };

        Ok(PaginatedPackagesResponse {
            data: packages,
            meta: PaginationMeta::new(total, per_page, page),
        })
    }

    #[instrument(skip(db, dto))]
    pub async fn create_package(db: &PgPool, dto: CreatePackageDto) -> Result<Package, AppError> {
        let package = sqlx::query_as::<_, Package>(&format!(
            "INSERT INTO packages (national_code, title, tga_status)
             VALUES ($1, $2, $3)
             RETURNING {PACKAGE_COLUMNS}"
        ))
        .bind(&dto.national_code)
        .bind(&dto.title)
        .bind(&dto.tga_status)
        .fetch_one(db)
        .await?;

        Ok(package)
    }

    #[instrument(skip(db))]
    pub async fn find_package(db: &PgPool, id: Uuid) -> Result<Option<Package>, AppError> {
        let package = sqlx::query_as::<_, Package>(&format!(
            "SELECT {PACKAGE_COLUMNS} FROM packages WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(package)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_package(
        db: &PgPool,
        id: Uuid,
        dto: UpdatePackageDto,
    ) -> Result<Package, AppError> {
        let package = sqlx::query_as::<_, Package>(&format!(
            "UPDATE packages
             SET national_code = $1, title = $2, tga_status = $3, updated_at = NOW()
             WHERE id = $4
             RETURNING {PACKAGE_COLUMNS}"
        ))
        .bind(&dto.national_code)
        .bind(&dto.title)
        .bind(&dto.tga_status)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("No package found")))?;

        Ok(package)
    }

    /// Returns true when a row was deleted.
    #[instrument(skip(db))]
    pub async fn delete_package(db: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM packages WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
