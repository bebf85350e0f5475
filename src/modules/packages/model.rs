//! Training-package reference data models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Package {
    pub id: Uuid,
    pub national_code: String,
    pub title: Option<String>,
    pub tga_status: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreatePackageDto {
    #[validate(length(min = 1, message = "national_code is required"))]
    pub national_code: String,
    pub title: Option<String>,
    pub tga_status: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdatePackageDto {
    #[validate(length(min = 1, message = "national_code is required"))]
    pub national_code: String,
    pub title: Option<String>,
    pub tga_status: Option<String>,
}

/// Query parameters for the package listing.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PackageFilterParams {
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: crate::utils::pagination::PaginationParams,
}

/// Paginated response containing packages.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedPackagesResponse {
    pub data: Vec<Package>,
    pub meta: crate::utils::pagination::PaginationMeta,
}
