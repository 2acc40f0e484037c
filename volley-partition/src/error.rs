//! Partition error types.

use thiserror::Error;

/// Result type for partition operations.
pub type PartitionResult<T> = Result<T, PartitionError>;

/// Partition operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionError {
    /// The requested worker count cannot produce a partition.
    #[error("invalid worker count: {workers} (need at least one worker)")]
    InvalidWorkerCount {
        /// The rejected worker count.
        workers: u32,
    },
}
