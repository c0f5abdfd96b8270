use async_trait::async_trait;
use onemapan::components::dashboard::{
    DashboardApi, DashboardHandle, DashboardQuery, DashboardStats, DrillDown,
};
use onemapan::components::events::{DisplayOptions, Event};
use onemapan::error::{other_error, AppResult, Error};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock implementation of the dashboard endpoints for testing
#[derive(Debug, Default)]
pub struct MockDashboardApi {
    /// Answers for successive stats requests; an empty queue fails
    stats: Mutex<VecDeque<AppResult<DashboardStats>>>,
    events: Option<Vec<Event>>,
    stats_calls: AtomicUsize,
}

impl MockDashboardApi {
    pub fn new(stats: Vec<AppResult<DashboardStats>>, events: Option<Vec<Event>>) -> Self {
        Self {
            stats: Mutex::new(stats.into()),
            events,
            stats_calls: AtomicUsize::new(0),
        }
    }

    pub fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DashboardApi for MockDashboardApi {
    async fn fetch_stats(&self) -> AppResult<DashboardStats> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        self.stats
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(other_error("no more stats")))
    }

    async fn fetch_events(&self) -> AppResult<Vec<Event>> {
        self.events
            .clone()
            .ok_or_else(|| other_error("events endpoint unavailable"))
    }
}

fn sample_stats() -> DashboardStats {
    serde_json::from_value(json!({
        "users": [
            { "user_id": 1, "area": "Korwil_1", "gender": "Male", "is_qiudao": true,
              "locality": { "district": { "city": { "name": "Medan",
                "province": { "name": "Sumatera Utara" } } } } },
            { "user_id": 2, "area": "Korwil_2", "gender": "Female", "is_qing_kou": true }
        ],
        "total_vihara": 10,
        "total_dcs": 4,
        "vihara_by_area": { "Korwil_1": 6, "Korwil_2": 4 },
        "dcs_by_area": { "Korwil_1": 3, "Korwil_2": 1 }
    }))
    .unwrap()
}

fn sample_events() -> Vec<Event> {
    serde_json::from_value(json!([
        { "event_id": 1, "event_name": "Kebaktian", "is_recurring": true,
          "occurrences": [ { "occurrence_id": 5, "greg_occur_date": "2024-03-01T01:00:00Z" } ] },
        { "event_id": 2, "event_name": "Tanpa tanggal", "occurrences": [] }
    ]))
    .unwrap()
}

fn national() -> DashboardQuery {
    DashboardQuery {
        area: "Nasional".to_string(),
        drill_down: None,
    }
}

#[tokio::test]
async fn test_dashboard_loads_and_normalizes_events() {
    let api = Arc::new(MockDashboardApi::new(vec![Ok(sample_stats())], Some(sample_events())));
    let handle = DashboardHandle::new(api.clone(), DisplayOptions::default());

    let dashboard = handle.load(&national()).await.unwrap();

    assert_eq!(dashboard.summary.total_umat, 2);
    assert_eq!(dashboard.summary.total_vihara, 10);
    assert_eq!(dashboard.summary.qing_kou_count, 1);
    assert_eq!(dashboard.events.len(), 1);
    assert_eq!(dashboard.events[0].time, "08:00 - 00:00 WIB");
    assert_eq!(api.stats_calls(), 1);
}

#[tokio::test]
async fn test_events_failure_is_swallowed() {
    let api = Arc::new(MockDashboardApi::new(vec![Ok(sample_stats())], None));
    let handle = DashboardHandle::new(api, DisplayOptions::default());

    let query = DashboardQuery {
        area: "Korwil_1".to_string(),
        drill_down: Some(DrillDown::Province("Sumatera Utara".to_string())),
    };
    let dashboard = handle.load(&query).await.unwrap();

    assert!(dashboard.events.is_empty());
    assert_eq!(dashboard.summary.total_umat, 1);
    assert_eq!(dashboard.summary.total_dcs, 3);
}

#[tokio::test]
async fn test_stats_retried_once() {
    let api = Arc::new(MockDashboardApi::new(
        vec![Err(other_error("timeout")), Ok(sample_stats())],
        Some(Vec::new()),
    ));
    let handle = DashboardHandle::new(api.clone(), DisplayOptions::default());

    assert!(handle.load(&national()).await.is_ok());
    assert_eq!(api.stats_calls(), 2);
}

#[tokio::test]
async fn test_stats_failure_propagates() {
    let api = Arc::new(MockDashboardApi::new(
        vec![Err(other_error("timeout")), Err(other_error("timeout"))],
        Some(sample_events()),
    ));
    let handle = DashboardHandle::new(api.clone(), DisplayOptions::default());

    let result = handle.load(&national()).await;
    assert!(matches!(result, Err(Error::Other(_))));
    assert_eq!(api.stats_calls(), 2);
}
