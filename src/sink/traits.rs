//! Sink trait and error types

use crate::record::FetchRecord;
use thiserror::Error;

/// Errors that can occur during sink operations
///
/// These are the only fetch-path errors that are fatal to a batch: a sink
/// that cannot be opened aborts before any work is launched, and a write
/// failure aborts the remainder of the batch.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to open sink destination: {0}")]
    Open(std::io::Error),

    #[error("Failed to write record: {0}")]
    Write(std::io::Error),

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Trait for result sinks
///
/// The sink is the single writer of its destination: workers never hold the
/// output handle, and the coordinator serializes all writes through one
/// `&mut` reference, so records never interleave mid-write.
pub trait ResultSink {
    /// Appends one record
    ///
    /// Depending on configuration this may be a no-op for records that do
    /// not count as successes (see `persist-failures`); skipped records are
    /// still counted by the coordinator.
    fn write(&mut self, record: &FetchRecord) -> SinkResult<()>;

    /// Flushes any buffered output
    ///
    /// Called once after every record of a completed batch has been
    /// forwarded. Not called when the batch aborts on a write failure.
    fn finish(&mut self) -> SinkResult<()>;
}
