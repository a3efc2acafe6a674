//! Queue Infrastructure
//!
//! In-process implementation of the processing pipeline: a bounded mpsc
//! channel stands in for the broker, a worker pool drains it, and a
//! scheduler fires the overdue sweep on a fixed interval.
//!
//! Failed tasks are redelivered with exponential backoff while the
//! processor reports the failure as retriable, up to a configured attempt
//! cap. Everything shuts down through a shared cancellation token.

pub mod config;
pub mod error;
pub mod scheduler;
pub mod worker;

pub use config::QueueConfig;
pub use error::QueueError;
pub use scheduler::SweepScheduler;
pub use worker::{MpscTaskQueue, PaymentTask, WorkerPool};
