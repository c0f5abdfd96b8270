//! Wire schemas for the profile, clergy, institution and location endpoints.
//!
//! Every field the backend may omit is an `Option`; display fallbacks are
//! applied by the code that reads these, never by the schema.

use serde::{Deserialize, Serialize};

/// Label used when a nested location is missing at any depth
pub const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Province {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct City {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<Province>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct District {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<City>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Locality {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<District>,
}

impl Locality {
    /// City name through locality → district → city
    pub fn city_name(&self) -> Option<&str> {
        self.district
            .as_ref()?
            .city
            .as_ref()?
            .name
            .as_deref()
    }

    /// Province name through locality → district → city → province
    pub fn province_name(&self) -> Option<&str> {
        self.district
            .as_ref()?
            .city
            .as_ref()?
            .province
            .as_ref()?
            .name
            .as_deref()
    }
}

/// A member (umat) profile
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mandarin_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spiritual_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_qiudao: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_qing_kou: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<Locality>,
}

/// Clergy (dianchuanshi) record
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Dianchuanshi {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mandarin_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

/// Temple / venue
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Fotang {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fotang_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<Locality>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Institution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution_leader: Option<String>,
}

/// A conversion / registration record
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Qiudao {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qiu_dao_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qiu_dao_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qiu_dao_mandarin_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greg_qiu_dao_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dian_chuan_shi: Option<Dianchuanshi>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fotang: Option<Fotang>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yin_shi_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bao_shi_name: Option<String>,
}

/// One page of a paginated list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default, alias = "totalPages")]
    pub total_pages: Option<u64>,
    #[serde(default, alias = "currentPage")]
    pub current_page: Option<u64>,
}

/// Paging and search parameters for list endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub page: u64,
    pub limit: u64,
    pub search: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: None,
        }
    }
}

impl ListQuery {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "access_token")]
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locality_path_lookups() {
        let locality: Locality = serde_json::from_value(serde_json::json!({
            "name": "Kebon Jeruk",
            "district": {
                "name": "Kebon Jeruk",
                "city": { "name": "Jakarta Barat", "province": { "name": "DKI Jakarta" } }
            }
        }))
        .unwrap();

        assert_eq!(locality.city_name(), Some("Jakarta Barat"));
        assert_eq!(locality.province_name(), Some("DKI Jakarta"));

        let partial: Locality =
            serde_json::from_value(serde_json::json!({ "district": { "city": null } })).unwrap();
        assert_eq!(partial.city_name(), None);
        assert_eq!(partial.province_name(), None);
    }

    #[test]
    fn test_page_accepts_camel_case() {
        let page: Page<User> = serde_json::from_value(serde_json::json!({
            "data": [{ "user_id": 1, "full_name": "Budi" }],
            "total": 1,
            "totalPages": 1,
            "currentPage": 1
        }))
        .unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.total_pages, Some(1));
        assert_eq!(page.data[0].full_name.as_deref(), Some("Budi"));
    }

    #[test]
    fn test_list_query_pairs() {
        let query = ListQuery {
            page: 2,
            limit: 25,
            search: Some("  ".to_string()),
        };
        assert_eq!(
            query.to_query_pairs(),
            vec![("page", "2".to_string()), ("limit", "25".to_string())]
        );

        let query = ListQuery {
            search: Some("Budi".to_string()),
            ..ListQuery::default()
        };
        assert_eq!(query.to_query_pairs().last(), Some(&("search", "Budi".to_string())));
    }

    #[test]
    fn test_user_serialization_skips_missing_fields() {
        let user = User {
            full_name: Some("Siti".to_string()),
            ..User::default()
        };
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            serde_json::json!({ "full_name": "Siti" })
        );
    }
}
