use super::models::{Event, EventFilter, EventPayload};
use crate::api::ApiClient;
use crate::error::AppResult;
use async_trait::async_trait;

/// Event endpoints of the backend
#[async_trait]
pub trait EventsApi: Send + Sync {
    /// `GET /event/filtered`
    async fn fetch_filtered(&self, filter: &EventFilter) -> AppResult<Vec<Event>>;

    /// `GET /event`
    async fn fetch_all(&self) -> AppResult<Vec<Event>>;

    /// `GET /event/{id}`
    async fn fetch_event(&self, id: i64) -> AppResult<Event>;

    /// `POST /event`
    async fn create_event(&self, payload: &EventPayload) -> AppResult<Event>;

    /// `PUT /event/{id}`
    async fn update_event(&self, id: i64, payload: &EventPayload) -> AppResult<Event>;

    /// `DELETE /event/{id}`
    async fn delete_event(&self, id: i64) -> AppResult<()>;
}

#[async_trait]
impl EventsApi for ApiClient {
    async fn fetch_filtered(&self, filter: &EventFilter) -> AppResult<Vec<Event>> {
        self.get_json("/event/filtered", &filter.to_query_pairs()).await
    }

    async fn fetch_all(&self) -> AppResult<Vec<Event>> {
        self.get_json("/event", &[]).await
    }

    async fn fetch_event(&self, id: i64) -> AppResult<Event> {
        self.get_json(&format!("/event/{}", id), &[]).await
    }

    async fn create_event(&self, payload: &EventPayload) -> AppResult<Event> {
        self.post_json("/event", payload).await
    }

    async fn update_event(&self, id: i64, payload: &EventPayload) -> AppResult<Event> {
        self.put_json(&format!("/event/{}", id), payload).await
    }

    async fn delete_event(&self, id: i64) -> AppResult<()> {
        self.delete(&format!("/event/{}", id)).await
    }
}
