use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Query-string integers arrive as strings; empty values read as absent.
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub total: i64,
    pub per_page: i64,
    pub page: i64,
    pub last_page: i64,
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(total: i64, per_page: i64, page: i64) -> Self {
        let last_page = ((total + per_page - 1) / per_page).max(1);
        Self {
            total,
            per_page,
            page,
            last_page,
            has_more: page * per_page < total,
        }
    }
}

/// Query-string pagination: 1-indexed `page` and a `perPage` override.
///
/// Values arrive as strings (`?page=2&perPage=15`); empty values fall back
/// to the defaults. `perPage` only takes effect when it is a positive
/// integer — each entity supplies its own default page size.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(
        default,
        rename = "perPage",
        deserialize_with = "deserialize_optional_i64"
    )]
    pub per_page: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self, default: i64) -> i64 {
        match self.per_page {
            Some(n) if n > 0 => n,
            _ => default,
        }
    }

    pub fn offset(&self, default_per_page: i64) -> i64 {
        (self.page() - 1) * self.per_page(default_per_page)
    }
}
