use super::aggregate::aggregate;
use super::api::DashboardApi;
use super::models::{Dashboard, DashboardQuery, DashboardStats};
use crate::components::events::{normalize_events, DisplayOptions, Event};
use crate::error::AppResult;
use crate::session::Session;
use std::sync::Arc;
use tracing::{debug, warn};

/// Handle for loading the dashboard
#[derive(Clone)]
pub struct DashboardHandle {
    api: Arc<dyn DashboardApi>,
    options: DisplayOptions,
    session: Option<Session>,
}

impl DashboardHandle {
    pub fn new(api: Arc<dyn DashboardApi>, options: DisplayOptions) -> Self {
        Self {
            api,
            options,
            session: None,
        }
    }

    /// Scope requests to what this session may see
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Load stats and events and aggregate them for `query`.
    ///
    /// A stats failure (after one retry) is returned as an error; an events
    /// failure only empties the event list.
    pub async fn load(&self, query: &DashboardQuery) -> AppResult<Dashboard> {
        let query = self.scoped_query(query);
        debug!("Loading dashboard for area {}", query.area);

        let (stats, events) = tokio::join!(self.fetch_stats_with_retry(), self.fetch_events_or_empty());
        let stats = stats?;

        Ok(Dashboard {
            summary: aggregate(&stats, &query),
            events: normalize_events(&events, &self.options),
        })
    }

    /// Pin the area for sessions limited to their own area
    fn scoped_query(&self, query: &DashboardQuery) -> DashboardQuery {
        match &self.session {
            Some(session) => DashboardQuery {
                area: session.effective_area(&query.area),
                drill_down: query.drill_down.clone(),
            },
            None => query.clone(),
        }
    }

    async fn fetch_stats_with_retry(&self) -> AppResult<DashboardStats> {
        match self.api.fetch_stats().await {
            Ok(stats) => Ok(stats),
            Err(e) => {
                warn!("Dashboard stats request failed, retrying once: {}", e);
                self.api.fetch_stats().await
            }
        }
    }

    async fn fetch_events_or_empty(&self) -> Vec<Event> {
        match self.api.fetch_events().await {
            Ok(events) => events,
            Err(e) => {
                warn!("Failed to fetch dashboard events, showing none: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::dashboard::models::DrillDown;
    use crate::session::tests::token_for;

    #[test]
    fn test_regional_session_is_pinned() {
        struct NoApi;

        #[async_trait::async_trait]
        impl DashboardApi for NoApi {
            async fn fetch_stats(&self) -> AppResult<DashboardStats> {
                Ok(DashboardStats::default())
            }
            async fn fetch_events(&self) -> AppResult<Vec<Event>> {
                Ok(Vec::new())
            }
        }

        let session = Session::from_token(&token_for("Admin", "Korwil_3", "wilayah")).unwrap();
        let handle = DashboardHandle::new(Arc::new(NoApi), DisplayOptions::default())
            .with_session(session);

        let query = DashboardQuery {
            area: "Nasional".to_string(),
            drill_down: Some(DrillDown::City("Medan".to_string())),
        };
        let scoped = handle.scoped_query(&query);
        assert_eq!(scoped.area, "Korwil_3");
        assert_eq!(scoped.drill_down, query.drill_down);
    }
}
