//! CLI library components for the advising data pipeline.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
