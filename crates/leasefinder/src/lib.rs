pub mod catalog;
pub mod config;
pub mod configurator;
pub mod error;
pub mod telemetry;
