pub mod config;
pub mod engine;
pub mod models;
pub mod report;
pub mod store;
