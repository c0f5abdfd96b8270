mod auth;
pub mod client;
pub mod models;
mod resources;

pub use client::ApiClient;
pub use models::{ListQuery, Page};
