//! Queue error types

use core_kernel::PortError;
use thiserror::Error;

/// Errors raised by the in-process queue
#[derive(Debug, Error)]
pub enum QueueError {
    /// The bounded channel is at capacity
    #[error("Task queue is full")]
    QueueFull,

    /// The worker pool has shut down and no longer accepts tasks
    #[error("Task queue is closed")]
    QueueClosed,
}

impl From<QueueError> for PortError {
    fn from(err: QueueError) -> Self {
        match err {
            QueueError::QueueFull => PortError::internal("task queue full"),
            QueueError::QueueClosed => PortError::connection("task queue closed"),
        }
    }
}
