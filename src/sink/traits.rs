//! Record sink trait and error types
//!
//! Sinks receive every credit the extractors produce. Durable storage beyond
//! the shipped file writer is a collaborator concern; anything implementing
//! [`RecordSink`] can be plugged into the coordinator.

use crate::extract::Credit;
use thiserror::Error;

/// Errors that can occur while emitting records
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write record: {0}")]
    Write(String),

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Where extracted credits go
///
/// Implementations must be thread-safe. The coordinator calls `accept` once
/// per record from its routing loop; ownership of the record passes to the
/// sink at that point.
pub trait RecordSink: Send + Sync {
    /// Accepts one credit record
    fn accept(&self, credit: &Credit) -> SinkResult<()>;

    /// Flushes buffered output; called once when the run reaches its end
    fn finalize(&self) -> SinkResult<()> {
        Ok(())
    }
}
