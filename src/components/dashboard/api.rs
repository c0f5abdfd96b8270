use super::models::DashboardStats;
use crate::api::ApiClient;
use crate::components::events::Event;
use crate::error::AppResult;
use async_trait::async_trait;

/// Endpoints the dashboard reads
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// `GET /dashboard/stats`
    async fn fetch_stats(&self) -> AppResult<DashboardStats>;

    /// `GET /event`
    async fn fetch_events(&self) -> AppResult<Vec<Event>>;
}

#[async_trait]
impl DashboardApi for ApiClient {
    async fn fetch_stats(&self) -> AppResult<DashboardStats> {
        self.get_json("/dashboard/stats", &[]).await
    }

    async fn fetch_events(&self) -> AppResult<Vec<Event>> {
        self.get_json("/event", &[]).await
    }
}
