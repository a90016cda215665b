pub mod analyzer;
pub mod collector;
pub mod config;
pub mod data;
pub mod error;
pub mod fetch;
pub mod output;
pub mod reports;
pub mod status;
pub mod store;
pub mod telemetry;
