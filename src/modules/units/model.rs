//! Unit-of-competency reference data models.
//!
//! Units are national training-register rows; everything except the
//! national code is optional, and absent optional fields are stored and
//! serialized as explicit nulls.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Unit {
    pub id: Uuid,
    pub unit: Option<String>,
    pub national_code: String,
    pub aqf_level: Option<String>,
    pub title: Option<String>,
    pub tga_status: Option<String>,
    pub state_code: Option<String>,
    pub nominal_hours: Option<i32>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub qa: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateUnitDto {
    pub unit: Option<String>,
    #[validate(length(min = 1, message = "national_code is required"))]
    pub national_code: String,
    pub aqf_level: Option<String>,
    pub title: Option<String>,
    pub tga_status: Option<String>,
    pub state_code: Option<String>,
    #[validate(range(min = 0, message = "nominal_hours must not be negative"))]
    pub nominal_hours: Option<i32>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub qa: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct UpdateUnitDto {
    pub unit: Option<String>,
    #[validate(length(min = 1, message = "national_code is required"))]
    pub national_code: String,
    pub aqf_level: Option<String>,
    pub title: Option<String>,
    pub tga_status: Option<String>,
    pub state_code: Option<String>,
    #[validate(range(min = 0, message = "nominal_hours must not be negative"))]
    pub nominal_hours: Option<i32>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub qa: Option<String>,
}

/// Query parameters for the unit listing.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UnitFilterParams {
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: crate::utils::pagination::PaginationParams,
}

/// Paginated response containing units.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedUnitsResponse {
    pub data: Vec<Unit>,
    pub meta: crate::utils::pagination::PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_unit_dto_minimal() {
        let dto: CreateUnitDto =
            serde_json::from_str(r#"{"national_code":"ICTICT443"}"#).unwrap();
        assert!(dto.validate().is_ok());
        assert!(dto.unit.is_none());
        assert!(dto.title.is_none());
        assert!(dto.nominal_hours.is_none());
    }

    #[test]
    fn test_create_unit_dto_empty_national_code_invalid() {
        let dto: CreateUnitDto = serde_json::from_str(r#"{"national_code":""}"#).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_unit_dto_negative_hours_invalid() {
        let dto: CreateUnitDto =
            serde_json::from_str(r#"{"national_code":"ICTICT443","nominal_hours":-5}"#).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_type_field_round_trips_as_type() {
        let dto: CreateUnitDto =
            serde_json::from_str(r#"{"national_code":"ICTICT443","type":"Core"}"#).unwrap();
        assert_eq!(dto.r#type.as_deref(), Some("Core"));
    }

    #[test]
    fn test_unit_serializes_absent_fields_as_null() {
        let unit = Unit {
            id: Uuid::new_v4(),
            unit: None,
            national_code: "ICTICT443".to_string(),
            aqf_level: None,
            title: None,
            tga_status: None,
            state_code: None,
            nominal_hours: None,
            r#type: None,
            qa: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let value = serde_json::to_value(&unit).unwrap();
        assert!(value["title"].is_null());
        assert!(value["tga_status"].is_null());
        assert!(value["nominal_hours"].is_null());
        assert!(value["type"].is_null());
    }
}
