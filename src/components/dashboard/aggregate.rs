use super::models::{
    DashboardQuery, DashboardStats, DashboardSummary, DrillDown, GenderCounts, LocationCount,
    STATUS_JIANGSHI, STATUS_TANZHU,
};
use crate::api::models::{User, UNKNOWN_LABEL};
use crate::session::NATIONAL_AREA;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gender {
    Male,
    Female,
}

fn gender_bucket(gender: &str) -> Option<Gender> {
    match gender.trim().to_lowercase().as_str() {
        "male" | "m" | "l" | "laki-laki" | "pria" => Some(Gender::Male),
        "female" | "f" | "p" | "perempuan" | "wanita" => Some(Gender::Female),
        _ => None,
    }
}

fn province_of(user: &User) -> &str {
    user.locality
        .as_ref()
        .and_then(|locality| locality.province_name())
        .unwrap_or(UNKNOWN_LABEL)
}

fn city_of(user: &User) -> &str {
    user.locality
        .as_ref()
        .and_then(|locality| locality.city_name())
        .unwrap_or(UNKNOWN_LABEL)
}

/// The national scope, matched exactly like any other area
pub fn is_national(area: &str) -> bool {
    area == NATIONAL_AREA
}

/// Users in the selected area (exact match) and drill-down
pub fn filter_users<'a>(users: &'a [User], query: &DashboardQuery) -> Vec<&'a User> {
    users
        .iter()
        .filter(|user| is_national(&query.area) || user.area.as_deref() == Some(query.area.as_str()))
        .filter(|user| match &query.drill_down {
            None => true,
            Some(DrillDown::Province(name)) => province_of(user) == name,
            Some(DrillDown::City(name)) => city_of(user) == name,
        })
        .collect()
}

fn area_total(total: u64, by_area: &HashMap<String, u64>, area: &str) -> u64 {
    if is_national(area) {
        total
    } else {
        by_area.get(area).copied().unwrap_or(0)
    }
}

fn sorted_counts(counts: BTreeMap<String, u64>) -> Vec<LocationCount> {
    counts
        .into_iter()
        .map(|(name, count)| LocationCount { name, count })
        .collect()
}

/// Recompute the dashboard aggregates for `query` from the raw stats
pub fn aggregate(stats: &DashboardStats, query: &DashboardQuery) -> DashboardSummary {
    let users = filter_users(&stats.users, query);

    let mut gender = GenderCounts::default();
    let mut by_province: BTreeMap<String, u64> = BTreeMap::new();
    let mut by_city: BTreeMap<String, u64> = BTreeMap::new();
    let mut total_qiudao = 0;
    let mut tanzhu_count = 0;
    let mut jiangshi_count = 0;
    let mut qing_kou_count = 0;

    for user in &users {
        if user.is_qiudao == Some(true) {
            total_qiudao += 1;
        }
        if user.is_qing_kou == Some(true) {
            qing_kou_count += 1;
        }
        match user.spiritual_status.as_deref() {
            Some(STATUS_TANZHU) => tanzhu_count += 1,
            Some(STATUS_JIANGSHI) => jiangshi_count += 1,
            _ => {}
        }
        match user.gender.as_deref().and_then(gender_bucket) {
            Some(Gender::Male) => gender.male += 1,
            Some(Gender::Female) => gender.female += 1,
            None => {}
        }

        *by_province.entry(province_of(user).to_string()).or_insert(0) += 1;
        *by_city.entry(city_of(user).to_string()).or_insert(0) += 1;
    }

    DashboardSummary {
        area: query.area.clone(),
        total_umat: users.len() as u64,
        total_qiudao,
        total_vihara: area_total(stats.total_vihara, &stats.vihara_by_area, &query.area),
        total_dcs: area_total(stats.total_dcs, &stats.dcs_by_area, &query.area),
        tanzhu_count,
        jiangshi_count,
        qing_kou_count,
        gender,
        by_province: sorted_counts(by_province),
        by_city: sorted_counts(by_city),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stats() -> DashboardStats {
        serde_json::from_value(json!({
            "users": [
                {
                    "user_id": 1, "area": "Korwil_1", "gender": "Male",
                    "spiritual_status": "TanZhu", "is_qiudao": true, "is_qing_kou": true,
                    "locality": { "district": { "city": {
                        "name": "Medan", "province": { "name": "Sumatera Utara" } } } }
                },
                {
                    "user_id": 2, "area": "Korwil_1", "gender": "Female",
                    "spiritual_status": "JiangShi", "is_qiudao": true,
                    "locality": { "district": { "city": {
                        "name": "Binjai", "province": { "name": "Sumatera Utara" } } } }
                },
                {
                    "user_id": 3, "area": "Korwil_1", "gender": "female",
                    "spiritual_status": "Umat", "is_qiudao": false,
                    "locality": { "district": { "city": { "name": "Aceh Besar" } } }
                },
                {
                    "user_id": 4, "area": "Korwil_2", "gender": "Pria",
                    "locality": { "district": { "city": {
                        "name": "Jakarta Barat", "province": { "name": "DKI Jakarta" } } } }
                },
                { "user_id": 5, "area": "Korwil_2", "gender": "other" }
            ],
            "total_vihara": 40,
            "total_dcs": 12,
            "vihara_by_area": { "Korwil_1": 25, "Korwil_2": 15 },
            "dcs_by_area": { "Korwil_1": 8 }
        }))
        .unwrap()
    }

    fn query(area: &str, drill_down: Option<DrillDown>) -> DashboardQuery {
        DashboardQuery {
            area: area.to_string(),
            drill_down,
        }
    }

    #[test]
    fn test_national_scope() {
        let summary = aggregate(&stats(), &query("Nasional", None));

        assert_eq!(summary.total_umat, 5);
        assert_eq!(summary.total_qiudao, 2);
        assert_eq!(summary.total_vihara, 40);
        assert_eq!(summary.total_dcs, 12);
        assert_eq!(summary.tanzhu_count, 1);
        assert_eq!(summary.jiangshi_count, 1);
        assert_eq!(summary.qing_kou_count, 1);
        assert_eq!(summary.gender, GenderCounts { male: 2, female: 2 });
    }

    #[test]
    fn test_area_scope_uses_area_maps() {
        let summary = aggregate(&stats(), &query("Korwil_2", None));

        assert_eq!(summary.total_umat, 2);
        assert_eq!(summary.total_vihara, 15);
        // Missing from the per-area map
        assert_eq!(summary.total_dcs, 0);
    }

    #[test]
    fn test_breakdowns_sorted_with_unknown() {
        let summary = aggregate(&stats(), &query("Nasional", None));

        let provinces: Vec<(&str, u64)> = summary
            .by_province
            .iter()
            .map(|c| (c.name.as_str(), c.count))
            .collect();
        assert_eq!(
            provinces,
            vec![("DKI Jakarta", 1), ("Sumatera Utara", 2), ("Unknown", 2)]
        );

        let cities: Vec<&str> = summary.by_city.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            cities,
            vec!["Aceh Besar", "Binjai", "Jakarta Barat", "Medan", "Unknown"]
        );
    }

    #[test]
    fn test_drill_down() {
        let by_province = aggregate(
            &stats(),
            &query("Korwil_1", Some(DrillDown::Province("Sumatera Utara".to_string()))),
        );
        assert_eq!(by_province.total_umat, 2);
        assert_eq!(by_province.by_city.len(), 2);

        let by_city = aggregate(
            &stats(),
            &query("Nasional", Some(DrillDown::City("Medan".to_string()))),
        );
        assert_eq!(by_city.total_umat, 1);
        assert_eq!(by_city.gender.male, 1);

        let unknown = aggregate(
            &stats(),
            &query("Nasional", Some(DrillDown::Province("Unknown".to_string()))),
        );
        assert_eq!(unknown.total_umat, 2);
    }

    #[test]
    fn test_area_match_is_exact() {
        let summary = aggregate(&stats(), &query("korwil_1", None));
        assert_eq!(summary.total_umat, 0);
        assert!(summary.by_province.is_empty());

        // The national scope is matched exactly too
        assert!(is_national("Nasional"));
        assert!(!is_national("nasional"));
        let lowercase = aggregate(&stats(), &query("NASIONAL", None));
        assert_eq!(lowercase.total_umat, 0);
        assert_eq!(lowercase.total_vihara, 0);
    }
}
