pub mod config;
pub mod models;
pub mod time_range;
