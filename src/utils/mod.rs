pub mod role;
pub mod time;
