//! Lesson data models and DTOs.
//!
//! A lesson's attached users live in a single join table; the `staff` and
//! `students` arrays of a response are the attached users holding the
//! Staff or Student role. Create/update requests carry `staff_ids` and
//! `student_ids`, whose union replaces the attached set wholesale.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::users::model::UserSummary;

/// A lesson as persisted.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Lesson {
    pub id: Uuid,
    pub name: String,
    pub course_id: Option<String>,
    pub cluster_id: Option<Uuid>,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub weekday: String,
    pub duration: i32,
    pub start_time: chrono::NaiveTime,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// A lesson with its attached staff and students loaded.
#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct LessonWithUsers {
    #[serde(flatten)]
    pub lesson: Lesson,
    pub staff: Vec<UserSummary>,
    pub students: Vec<UserSummary>,
}

/// DTO for creating a lesson.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateLessonDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub course_id: Option<String>,
    pub cluster_id: Option<Uuid>,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    #[validate(length(min = 1, message = "weekday is required"))]
    pub weekday: String,
    #[validate(range(min = 1, message = "duration must be at least 1 hour"))]
    pub duration: i32,
    pub start_time: chrono::NaiveTime,
    #[serde(default)]
    pub staff_ids: Vec<Uuid>,
    #[serde(default)]
    pub student_ids: Vec<Uuid>,
}

/// DTO for updating a lesson. The scalar fields are replaced in full and
/// the attached-user set is re-synced from the id lists.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateLessonDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub course_id: Option<String>,
    pub cluster_id: Option<Uuid>,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    #[validate(length(min = 1, message = "weekday is required"))]
    pub weekday: String,
    #[validate(range(min = 1, message = "duration must be at least 1 hour"))]
    pub duration: i32,
    pub start_time: chrono::NaiveTime,
    #[serde(default)]
    pub staff_ids: Vec<Uuid>,
    #[serde(default)]
    pub student_ids: Vec<Uuid>,
}

/// Query parameters for the lesson listing.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LessonFilterParams {
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: crate::utils::pagination::PaginationParams,
}

/// Paginated response containing lessons with their users.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedLessonsResponse {
    pub data: Vec<LessonWithUsers>,
    pub meta: crate::utils::pagination::PaginationMeta,
}
