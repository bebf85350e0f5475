use anyhow::anyhow;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::lessons::model::{
    CreateLessonDto, Lesson, LessonFilterParams, LessonWithUsers, PaginatedLessonsResponse,
    UpdateLessonDto,
};
use crate::modules::roles::model::well_known;
use crate::modules::users::model::UserSummary;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

const LESSON_COLUMNS: &str = "id, name, course_id, cluster_id, start_date, end_date, weekday, \
                              duration, start_time, created_at, updated_at";

pub const DEFAULT_PER_PAGE: i64 = 6;

pub struct LessonService;

impl LessonService {
    #[instrument(skip(db))]
    pub async fn get_lessons(
        db: &PgPool,
        params: LessonFilterParams,
    ) -> Result<PaginatedLessonsResponse, AppError> {
        let per_page = params.pagination.per_page(DEFAULT_PER_PAGE);
        let page = params.pagination.page();
        let offset = params.pagination.offset(DEFAULT_PER_PAGE);

        let mut count_query = String::from("SELECT COUNT(*) FROM lessons");
        let mut data_query = format!("SELECT {LESSON_COLUMNS} FROM lessons");

        let pattern = params
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));

        if pattern.is_some() {
            // Non-text columns are matched against their text rendering,
            // so a term like "2025" hits dates and "3" hits durations.
            let where_clause = " WHERE (course_id ILIKE $1 \
                 OR CAST(cluster_id AS TEXT) ILIKE $1 \
                 OR name ILIKE $1 \
                 OR CAST(start_date AS TEXT) ILIKE $1 \
                 OR CAST(end_date AS TEXT) ILIKE $1 \
                 OR weekday ILIKE $1 \
                 OR CAST(duration AS TEXT) ILIKE $1)";
            count_query.push_str(where_clause);
            data_query.push_str(where_clause);
        }

        data_query.push_str(" ORDER BY name ASC");
        data_query.push_str(&format!(" LIMIT {} OFFSET {}", per_page, offset));

        let (total, lessons) = if let Some(pattern) = &pattern {
            let total = sqlx::query_scalar::<_, i64>(&count_query)
                .bind(pattern)
                .fetch_one(db)
                .await?;
            let lessons = sqlx::query_as::<_, Lesson>(&data_query)
                .bind(pattern)
                .fetch_all(db)
                .await?;
            (total, lessons)
        } else {
            let total = sqlx::query_scalar::<_, i64>(&count_query)
                .fetch_one(db)
                .await?;
            let lessons = sqlx::query_as::<_, Lesson>(&data_query)
                .fetch_all(db)
                .await?;
            (total, lessons)
        };

        let mut data = Vec::with_capacity(lessons.len());
        for lesson in lessons {
            data.push(Self::with_users(db, lesson).await?);
        }

        Ok(PaginatedLessonsResponse {
            data,
            meta: PaginationMeta::new(total, per_page, page),
        })
    }

    /// Creates the lesson and syncs its attached users in one transaction,
    /// so a failed sync never leaves a half-written lesson behind.
    #[instrument(skip(db, dto))]
    pub async fn create_lesson(
        db: &PgPool,
        dto: CreateLessonDto,
    ) -> Result<LessonWithUsers, AppError> {
        let all_user_ids = union_ids(&dto.staff_ids, &dto.student_ids);

        let mut tx = db.begin().await?;

        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            "INSERT INTO lessons (name, course_id, cluster_id, start_date, end_date, weekday, duration, start_time)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {LESSON_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.course_id)
        .bind(dto.cluster_id)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .bind(&dto.weekday)
        .bind(dto.duration)
        .bind(dto.start_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_lesson_insert_error)?;

        Self::sync_users(&mut tx, lesson.id, &all_user_ids).await?;

        tx.commit().await?;

        Self::with_users(db, lesson).await
    }

    #[instrument(skip(db))]
    pub async fn get_lesson(db: &PgPool, id: Uuid) -> Result<LessonWithUsers, AppError> {
        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Lesson not found")))?;

        Self::with_users(db, lesson).await
    }

    /// Updates the scalar fields and re-syncs the attached users inside one
    /// transaction. The new id set replaces the old one exactly: missing
    /// links are added, stale ones removed, surviving ones left untouched.
    #[instrument(skip(db, dto))]
    pub async fn update_lesson(
        db: &PgPool,
        id: Uuid,
        dto: UpdateLessonDto,
    ) -> Result<LessonWithUsers, AppError> {
        let all_user_ids = union_ids(&dto.staff_ids, &dto.student_ids);

        let mut tx = db.begin().await?;

        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            "UPDATE lessons
             SET name = $1,
                 course_id = $2,
                 cluster_id = $3,
                 start_date = $4,
                 end_date = $5,
                 weekday = $6,
                 duration = $7,
                 start_time = $8,
                 updated_at = NOW()
             WHERE id = $9
             RETURNING {LESSON_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.course_id)
        .bind(dto.cluster_id)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .bind(&dto.weekday)
        .bind(dto.duration)
        .bind(dto.start_time)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_lesson_insert_error)?
        .ok_or_else(|| AppError::not_found(anyhow!("Lesson not found")))?;

        Self::sync_users(&mut tx, lesson.id, &all_user_ids).await?;

        tx.commit().await?;

        Self::with_users(db, lesson).await
    }

    #[instrument(skip(db))]
    pub async fn delete_lesson(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Lesson not found")));
        }

        Ok(())
    }

    /// Set-reconciles the join table against `user_ids`: rows outside the
    /// new set are deleted, missing ones inserted, existing ones kept.
    async fn sync_users(
        tx: &mut Transaction<'_, Postgres>,
        lesson_id: Uuid,
        user_ids: &[Uuid],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM lesson_user WHERE lesson_id = $1 AND user_id <> ALL($2)")
            .bind(lesson_id)
            .bind(user_ids.to_vec())
            .execute(&mut **tx)
            .await?;

        sqlx::query(
            "INSERT INTO lesson_user (lesson_id, user_id)
             SELECT $1, ids.user_id FROM UNNEST($2::uuid[]) AS ids(user_id)
             ON CONFLICT DO NOTHING",
        )
        .bind(lesson_id)
        .bind(user_ids.to_vec())
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                return AppError::bad_request(anyhow!("One or more user ids do not exist"));
            }
            AppError::from(e)
        })?;

        Ok(())
    }

    async fn with_users(db: &PgPool, lesson: Lesson) -> Result<LessonWithUsers, AppError> {
        let staff = Self::attached_users_with_role(db, lesson.id, well_known::STAFF).await?;
        let students = Self::attached_users_with_role(db, lesson.id, well_known::STUDENT).await?;

        Ok(LessonWithUsers {
            lesson,
            staff,
            students,
        })
    }

    async fn attached_users_with_role(
        db: &PgPool,
        lesson_id: Uuid,
        role_id: Uuid,
    ) -> Result<Vec<UserSummary>, AppError> {
        let users = sqlx::query_as::<_, UserSummary>(
            "SELECT u.id, u.given_name, u.family_name, u.preferred_name, u.pronouns, u.email
             FROM users u
             INNER JOIN lesson_user lu ON lu.user_id = u.id
             INNER JOIN user_roles ur ON ur.user_id = u.id AND ur.role_id = $2
             WHERE lu.lesson_id = $1
             ORDER BY u.family_name, u.given_name",
        )
        .bind(lesson_id)
        .bind(role_id)
        .fetch_all(db)
        .await?;

        Ok(users)
    }
}

/// Union of the two id lists with duplicates removed.
fn union_ids(staff_ids: &[Uuid], student_ids: &[Uuid]) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = staff_ids.iter().chain(student_ids.iter()).copied().collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

fn map_lesson_insert_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_foreign_key_violation()
    {
        return AppError::bad_request(anyhow!("The selected cluster does not exist"));
    }
    AppError::from(e)
}
