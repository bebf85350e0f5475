use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::units::model::{
    CreateUnitDto, PaginatedUnitsResponse, Unit, UnitFilterParams, UpdateUnitDto,
};
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

const UNIT_COLUMNS: &str = "id, unit, national_code, aqf_level, title, tga_status, state_code, \
                            nominal_hours, \"type\", qa, created_at, updated_at";

pub const DEFAULT_PER_PAGE: i64 = 10;

pub struct UnitService;

impl UnitService {
    #[instrument(skip(db))]
    pub async fn get_units(
        db: &PgPool,
        params: UnitFilterParams,
    ) -> Result<PaginatedUnitsResponse, AppError> {
        let per_page = params.pagination.per_page(DEFAULT_PER_PAGE);
        let page = params.pagination.page();
        let offset = params.pagination.offset(DEFAULT_PER_PAGE);

        let mut count_query = String::from("SELECT COUNT(*) FROM units");
        let mut data_query = format!("SELECT {UNIT_COLUMNS} FROM units");

        let pattern = params
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));

        if pattern.is_some() {
            let where_clause = " WHERE (unit ILIKE $1 \
                 OR national_code ILIKE $1 \
                 OR aqf_level ILIKE $1 \
                 OR title ILIKE $1 \
                 OR tga_status ILIKE $1 \
                 OR state_code ILIKE $1 \
                 OR CAST(nominal_hours AS TEXT) ILIKE $1 \
                 OR \"type\" ILIKE $1 \
                 OR qa ILIKE $1)";
            count_query.push_str(where_clause);
            data_query.push_str(where_clause);
        }

        data_query.push_str(" ORDER BY created_at, id");
        data_query.push_str(&format!(" LIMIT {} OFFSET {}", per_page, offset));

        let (total, units) = if let Some(pattern) = &pattern {
            let total = sqlx::query_scalar::<_, i64>(&count_query)
                .bind(pattern)
                .fetch_one(db)
                .await?;
            let units = sqlx::query_as::<_, Unit>(&data_query)
                .bind(pattern)
                .fetch_all(db)
                .await?;
            (total, units)
        } else {
            let total = sqlx::query_scalar::<_, i64>(&count_query)
                .fetch_one(db)
                .await?;
            let units = sqlx::query_as::<_, Unit>(&data_query).fetch_all(db).await?;
            (total, units)
        };

        Ok(PaginatedUnitsResponse {
            data: units,
            meta: PaginationMeta::new(total, per_page, page),
        })
    }

    /// Optional fields absent from the request land as explicit NULLs.
    #[instrument(skip(db, dto))]
    pub async fn create_unit(db: &PgPool, dto: CreateUnitDto) -> Result<Unit, AppError> {
        let unit = sqlx::query_as::<_, Unit>(&format!(
            "INSERT INTO units (unit, national_code, aqf_level, title, tga_status, state_code, nominal_hours, \"type\", qa)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {UNIT_COLUMNS}"
        ))
        .bind(&dto.unit)
        .bind(&dto.national_code)
        .bind(&dto.aqf_level)
        .bind(&dto.title)
        .bind(&dto.tga_status)
        .bind(&dto.state_code)
        .bind(dto.nominal_hours)
        .bind(&dto.r#type)
        .bind(&dto.qa)
        .fetch_one(db)
        .await?;

        Ok(unit)
    }

    #[instrument(skip(db))]
    pub async fn find_unit(db: &PgPool, id: Uuid) -> Result<Option<Unit>, AppError> {
        let unit = sqlx::query_as::<_, Unit>(&format!(
            "SELECT {UNIT_COLUMNS} FROM units WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(unit)
    }

    /// Full replacement: every column is set, optional ones to NULL when
    /// absent from the request.
    #[instrument(skip(db, dto))]
    pub async fn update_unit(db: &PgPool, id: Uuid, dto: UpdateUnitDto) -> Result<Unit, AppError> {
        let unit = sqlx::query_as::<_, Unit>(&format!(
            "UPDATE units
             SET unit = $1,
                 national_code = $2,
                 aqf_level = $3,
                 title = $4,
                 tga_status = $5,
                 state_code = $6,
                 nominal_hours = $7,
                 \"type\" = $8,
                 qa = $9,
                 updated_at = NOW()
             WHERE id = $10
             RETURNING {UNIT_COLUMNS}"
        ))
        .bind(&dto.unit)
        .bind(&dto.national_code)
        .bind(&dto.aqf_level)
        .bind(&dto.title)
        .bind(&dto.tga_status)
        .bind(&dto.state_code)
        .bind(dto.nominal_hours)
        .bind(&dto.r#type)
        .bind(&dto.qa)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("No unit found")))?;

        Ok(unit)
    }

    /// Returns true when a row was deleted.
    #[instrument(skip(db))]
    pub async fn delete_unit(db: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM units WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
