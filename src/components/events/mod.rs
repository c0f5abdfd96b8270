pub mod api;
mod handle;
pub mod models;
pub mod normalize;

pub use api::EventsApi;
pub use handle::EventsHandle;
pub use models::{DisplayEvent, Event, EventFilter, EventPayload, Occurrence, OccurrencePayload};
pub use normalize::{normalize_events, DisplayOptions};
