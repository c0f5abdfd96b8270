pub mod dashboard;
pub mod events;

pub use dashboard::DashboardHandle;
pub use events::EventsHandle;
