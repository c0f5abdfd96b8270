use super::api::EventsApi;
use super::models::{DisplayEvent, Event, EventFilter, EventPayload};
use super::normalize::{normalize_events, DisplayOptions};
use crate::error::{validation_error, AppResult};
use std::sync::Arc;
use tracing::{info, warn};

/// Handle for fetching and managing events
#[derive(Clone)]
pub struct EventsHandle {
    api: Arc<dyn EventsApi>,
    options: DisplayOptions,
}

impl EventsHandle {
    pub fn new(api: Arc<dyn EventsApi>, options: DisplayOptions) -> Self {
        Self { api, options }
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    /// Display rows for the events matching `filter`.
    ///
    /// A failed request yields an empty list; the failure is only logged.
    /// Use [`EventsHandle::try_display_events`] to tell failure from "no events".
    pub async fn display_events(&self, filter: &EventFilter) -> Vec<DisplayEvent> {
        if let Err(e) = validate_filter(filter) {
            warn!("Rejected event filter, showing none: {}", e);
            return Vec::new();
        }

        match self.try_display_events(filter).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Failed to fetch filtered events, showing none: {}", e);
                Vec::new()
            }
        }
    }

    /// Display rows for the events matching `filter`, surfacing request errors
    pub async fn try_display_events(&self, filter: &EventFilter) -> AppResult<Vec<DisplayEvent>> {
        validate_filter(filter)?;

        let events = self.api.fetch_filtered(filter).await?;
        Ok(normalize_events(&events, &self.options))
    }

    /// All events, unfiltered and raw
    pub async fn all_events(&self) -> AppResult<Vec<Event>> {
        self.api.fetch_all().await
    }

    pub async fn event(&self, id: i64) -> AppResult<Event> {
        self.api.fetch_event(id).await
    }

    pub async fn create(&self, payload: &EventPayload) -> AppResult<Event> {
        validate_payload(payload)?;
        let event = self.api.create_event(payload).await?;
        info!("Created event {:?}", event.event_id);
        Ok(event)
    }

    pub async fn update(&self, id: i64, payload: &EventPayload) -> AppResult<Event> {
        validate_payload(payload)?;
        let event = self.api.update_event(id, payload).await?;
        info!("Updated event {}", id);
        Ok(event)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.api.delete_event(id).await?;
        info!("Deleted event {}", id);
        Ok(())
    }
}

fn validate_filter(filter: &EventFilter) -> AppResult<()> {
    match (filter.start_date, filter.end_date) {
        (Some(start), Some(end)) if end < start => {
            Err(validation_error("End date is before start date"))
        }
        _ => Ok(()),
    }
}

fn validate_payload(payload: &EventPayload) -> AppResult<()> {
    if payload.event_name.trim().is_empty() {
        return Err(validation_error("Event name is required"));
    }
    if payload.occurrences.is_empty() {
        return Err(validation_error("An event needs at least one occurrence"));
    }
    let ends_before_start = payload.occurrences.iter().any(|occurrence| {
        occurrence
            .greg_end_date
            .is_some_and(|end| end < occurrence.greg_occur_date)
    });
    if ends_before_start {
        return Err(validation_error("An occurrence ends before it starts"));
    }
    Ok(())
}
