//! Urlsweep: a bounded-parallel batch URL fetcher
//!
//! This crate fetches a batch of URLs over HTTP with a fixed concurrency
//! limit, classifies every outcome into a uniform result record, and streams
//! the records to an append-only JSONL sink as they complete.

pub mod config;
pub mod fetch;
pub mod input;
pub mod record;
pub mod sink;

use thiserror::Error;

/// Main error type for urlsweep operations
///
/// Per-URL fetch failures are never represented here: they are resolved into
/// result records with `status_code = 0` inside the fetch worker. Only
/// batch-terminal conditions (configuration, sink, client construction)
/// surface as errors.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Sink error: {0}")]
    Sink(#[from] sink::SinkError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for urlsweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use fetch::run_batch;
pub use record::{BatchSummary, FailureKind, FetchRecord};
pub use sink::{JsonlSink, ResultSink};
