//! Worker pool and scheduler configuration

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the worker pool and the sweep scheduler
#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    /// Whether the worker pool starts at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Bounded channel capacity; enqueueing fails once it is full
    #[serde(default = "default_queue_size")]
    pub queue_size: usize,
    /// Number of tasks processed concurrently
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,
    /// Delivery attempts before a retriable failure is dropped
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Base delay for exponential backoff between redeliveries
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    /// Seconds between overdue sweeps
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_queue_size() -> usize {
    256
}

fn default_worker_count() -> usize {
    4
}

fn default_max_attempts() -> u32 {
    5
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_sweep_interval_secs() -> u64 {
    3600
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            queue_size: default_queue_size(),
            worker_count: default_worker_count(),
            max_attempts: default_max_attempts(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl QueueConfig {
    /// Backoff delay before redelivering a task on its next attempt
    ///
    /// Doubles per attempt already made: 100ms, 200ms, 400ms, ...
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
        Duration::from_millis(self.retry_base_delay_ms.saturating_mul(factor))
    }

    /// Interval between overdue sweeps
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}
