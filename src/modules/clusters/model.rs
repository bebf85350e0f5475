//! Cluster data models and the form DTO with its pattern-constrained
//! fields.
//!
//! A cluster groups up to eight units of competency under a qualification.
//! `code` is unique and matches `[A-Z0-9-]{5,9}`; the unit references match
//! `[A-Z]{6}\d{3}` when present.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::utils::serde::deserialize_optional_string;

static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z0-9-]+$").unwrap());
static QUALIFICATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^ICT\d{5}$").unwrap());
static QUALIFICATION_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^AC\d{2}$").unwrap());
static UNIT_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]{6}\d{3}$").unwrap());

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Cluster {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    pub qualification: Option<String>,
    pub qualification_code: Option<String>,
    pub unit_1: Option<String>,
    pub unit_2: Option<String>,
    pub unit_3: Option<String>,
    pub unit_4: Option<String>,
    pub unit_5: Option<String>,
    pub unit_6: Option<String>,
    pub unit_7: Option<String>,
    pub unit_8: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Cluster {
    /// The unit-code references actually present on this cluster.
    pub fn unit_codes(&self) -> Vec<&str> {
        [
            &self.unit_1,
            &self.unit_2,
            &self.unit_3,
            &self.unit_4,
            &self.unit_5,
            &self.unit_6,
            &self.unit_7,
            &self.unit_8,
        ]
        .into_iter()
        .filter_map(|unit| unit.as_deref())
        .collect()
    }
}

/// The create/edit form. Empty form fields arrive as `""` and are read as
/// absent.
#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
pub struct ClusterForm {
    #[validate(
        length(min = 5, max = 9, message = "code must be 5 to 9 characters"),
        regex(path = *CODE_RE, message = "code may only contain A-Z, 0-9 and dashes")
    )]
    pub code: String,
    #[validate(length(min = 5, max = 255, message = "title must be 5 to 255 characters"))]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(regex(path = *QUALIFICATION_RE, message = "qualification must match ICT00000"))]
    pub qualification: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(regex(path = *QUALIFICATION_CODE_RE, message = "qualification_code must match AC00"))]
    pub qualification_code: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(regex(path = *UNIT_CODE_RE, message = "unit_1 must match AAAAAA000"))]
    pub unit_1: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(regex(path = *UNIT_CODE_RE, message = "unit_2 must match AAAAAA000"))]
    pub unit_2: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(regex(path = *UNIT_CODE_RE, message = "unit_3 must match AAAAAA000"))]
    pub unit_3: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(regex(path = *UNIT_CODE_RE, message = "unit_4 must match AAAAAA000"))]
    pub unit_4: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(regex(path = *UNIT_CODE_RE, message = "unit_5 must match AAAAAA000"))]
    pub unit_5: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(regex(path = *UNIT_CODE_RE, message = "unit_6 must match AAAAAA000"))]
    pub unit_6: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(regex(path = *UNIT_CODE_RE, message = "unit_7 must match AAAAAA000"))]
    pub unit_7: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(regex(path = *UNIT_CODE_RE, message = "unit_8 must match AAAAAA000"))]
    pub unit_8: Option<String>,
}

/// Flash messages carried across redirects via the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlashParams {
    pub success: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ClusterForm {
        ClusterForm {
            code: "AB-123456".to_string(),
            title: "Networking and Infrastructure".to_string(),
            qualification: Some("ICT40120".to_string()),
            qualification_code: Some("AC01".to_string()),
            unit_1: Some("ICTICT443".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_code_too_short_fails() {
        let mut form = valid_form();
        form.code = "AB12".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_code_max_length_nine_passes() {
        let mut form = valid_form();
        form.code = "AB-123456".to_string();
        assert_eq!(form.code.len(), 9);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_code_lowercase_fails() {
        let mut form = valid_form();
        form.code = "ab-123456".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_code_too_long_fails() {
        let mut form = valid_form();
        form.code = "AB-1234567".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_qualification_pattern() {
        let mut form = valid_form();
        form.qualification = Some("ICT401".to_string());
        assert!(form.validate().is_err());

        form.qualification = Some("ICT50220".to_string());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_unit_reference_pattern() {
        let mut form = valid_form();
        form.unit_3 = Some("ICTICT44".to_string());
        assert!(form.validate().is_err());

        form.unit_3 = Some("BSBCRT404".to_string());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_title_too_short_fails() {
        let mut form = valid_form();
        form.title = "Net".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_form_empty_optionals_deserialize_as_none() {
        let form: ClusterForm = serde_json::from_str(
            r#"{"code":"AB-123456","title":"Networking and Infrastructure","qualification":"","unit_1":""}"#,
        )
        .unwrap();
        assert!(form.qualification.is_none());
        assert!(form.unit_1.is_none());
    }

    #[test]
    fn test_unit_codes_skips_absent_slots() {
        let cluster = Cluster {
            id: Uuid::new_v4(),
            code: "AB-123456".to_string(),
            title: "Networking and Infrastructure".to_string(),
            qualification: None,
            qualification_code: None,
            unit_1: Some("ICTICT443".to_string()),
            unit_2: None,
            unit_3: Some("BSBCRT404".to_string()),
            unit_4: None,
            unit_5: None,
            unit_6: None,
            unit_7: None,
            unit_8: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        assert_eq!(cluster.unit_codes(), vec!["ICTICT443", "BSBCRT404"]);
    }
}
