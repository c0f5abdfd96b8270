pub mod aggregate;
pub mod api;
mod handle;
pub mod models;

pub use api::DashboardApi;
pub use handle::DashboardHandle;
pub use models::{Dashboard, DashboardQuery, DashboardStats, DashboardSummary, DrillDown};
