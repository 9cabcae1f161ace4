pub mod command;
pub mod config;
pub mod error;
pub mod tracing;
