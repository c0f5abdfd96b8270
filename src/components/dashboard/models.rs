use crate::api::models::User;
use crate::components::events::DisplayEvent;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Spiritual status counted as "TanZhu" (altar keeper)
pub const STATUS_TANZHU: &str = "TanZhu";

/// Spiritual status counted as "JiangShi" (lecturer)
pub const STATUS_JIANGSHI: &str = "JiangShi";

/// Payload of `/dashboard/stats`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DashboardStats {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub total_vihara: u64,
    #[serde(default)]
    pub total_dcs: u64,
    #[serde(default)]
    pub vihara_by_area: HashMap<String, u64>,
    #[serde(default)]
    pub dcs_by_area: HashMap<String, u64>,
}

/// Narrow the dashboard to one province or one city
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrillDown {
    Province(String),
    City(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardQuery {
    /// Area code, or `Nasional` for every area
    pub area: String,
    pub drill_down: Option<DrillDown>,
}

#[derive(Debug, Clone, Copy, Serialize, Default, PartialEq, Eq)]
pub struct GenderCounts {
    pub male: u64,
    pub female: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LocationCount {
    pub name: String,
    pub count: u64,
}

/// Aggregates for the selected area and drill-down
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub area: String,
    pub total_umat: u64,
    pub total_qiudao: u64,
    pub total_vihara: u64,
    pub total_dcs: u64,
    pub tanzhu_count: u64,
    pub jiangshi_count: u64,
    pub qing_kou_count: u64,
    pub gender: GenderCounts,
    /// Sorted by province name
    pub by_province: Vec<LocationCount>,
    /// Sorted by city name
    pub by_city: Vec<LocationCount>,
}

/// Everything the dashboard view shows
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    pub summary: DashboardSummary,
    pub events: Vec<DisplayEvent>,
}
