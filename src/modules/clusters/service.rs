use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::clusters::model::{Cluster, ClusterForm};
use crate::modules::units::model::Unit;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

const CLUSTER_COLUMNS: &str = "id, code, title, qualification, qualification_code, \
                               unit_1, unit_2, unit_3, unit_4, unit_5, unit_6, unit_7, unit_8, \
                               created_at, updated_at";

pub const DEFAULT_PER_PAGE: i64 = 6;

pub struct ClusterService;

impl ClusterService {
    #[instrument(skip(db))]
    pub async fn get_clusters(
        db: &PgPool,
        page: i64,
    ) -> Result<(Vec<Cluster>, PaginationMeta), AppError> {
        let page = page.max(1);
        let offset = (page - 1) * DEFAULT_PER_PAGE;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clusters")
            .fetch_one(db)
            .await?;

        let clusters = sqlx::query_as::<_, Cluster>(&format!(
            "SELECT {CLUSTER_COLUMNS} FROM clusters
             ORDER BY code
             LIMIT {DEFAULT_PER_PAGE} OFFSET {offset}"
        ))
        .fetch_all(db)
        .await?;

        Ok((
            clusters,
            PaginationMeta::new(total, DEFAULT_PER_PAGE, page),
        ))
    }

    #[instrument(skip(db))]
    pub async fn find_cluster(db: &PgPool, id: Uuid) -> Result<Option<Cluster>, AppError> {
        let cluster = sqlx::query_as::<_, Cluster>(&format!(
            "SELECT {CLUSTER_COLUMNS} FROM clusters WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(cluster)
    }

    #[instrument(skip(db, form))]
    pub async fn create_cluster(db: &PgPool, form: ClusterForm) -> Result<Cluster, AppError> {
        let cluster = sqlx::query_as::<_, Cluster>(&format!(
            "INSERT INTO clusters (code, title, qualification, qualification_code,
                                   unit_1, unit_2, unit_3, unit_4, unit_5, unit_6, unit_7, unit_8)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {CLUSTER_COLUMNS}"
        ))
        .bind(&form.code)
        .bind(&form.title)
        .bind(&form.qualification)
        .bind(&form.qualification_code)
        .bind(&form.unit_1)
        .bind(&form.unit_2)
        .bind(&form.unit_3)
        .bind(&form.unit_4)
        .bind(&form.unit_5)
        .bind(&form.unit_6)
        .bind(&form.unit_7)
        .bind(&form.unit_8)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow!("The code has already been taken"));
            }
            AppError::from(e)
        })?;

        Ok(cluster)
    }

    #[instrument(skip(db, form))]
    pub async fn update_cluster(
        db: &PgPool,
        id: Uuid,
        form: ClusterForm,
    ) -> Result<Cluster, AppError> {
        let cluster = sqlx::query_as::<_, Cluster>(&format!(
            "UPDATE clusters
             SET code = $1, title = $2, qualification = $3, qualification_code = $4,
                 unit_1 = $5, unit_2 = $6, unit_3 = $7, unit_4 = $8,
                 unit_5 = $9, unit_6 = $10, unit_7 = $11, unit_8 = $12,
                 updated_at = NOW()
             WHERE id = $13
             RETURNING {CLUSTER_COLUMNS}"
        ))
        .bind(&form.code)
        .bind(&form.title)
        .bind(&form.qualification)
        .bind(&form.qualification_code)
        .bind(&form.unit_1)
        .bind(&form.unit_2)
        .bind(&form.unit_3)
        .bind(&form.unit_4)
        .bind(&form.unit_5)
        .bind(&form.unit_6)
        .bind(&form.unit_7)
        .bind(&form.unit_8)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow!("The code has already been taken"));
            }
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::not_found(anyhow!("Cluster not found")))?;

        Ok(cluster)
    }

    /// Returns true when a row was deleted.
    #[instrument(skip(db))]
    pub async fn delete_cluster(db: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM clusters WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Units whose national code matches one of the cluster's unit
    /// references, for the detail view.
    #[instrument(skip(db, cluster))]
    pub async fn units_for(db: &PgPool, cluster: &Cluster) -> Result<Vec<Unit>, AppError> {
        let codes: Vec<String> = cluster
            .unit_codes()
            .into_iter()
            .map(String::from)
            .collect();

        if codes.is_empty() {
            return Ok(vec![]);
        }

        let units = sqlx::query_as::<_, Unit>(
            "SELECT id, unit, national_code, aqf_level, title, tga_status, state_code, \
                    nominal_hours, \"type\", qa, created_at, updated_at
             FROM units
             WHERE national_code = ANY($1)
             ORDER BY national_code",
        )
        .bind(codes)
        .fetch_all(db)
        .await?;

        Ok(units)
    }
}
