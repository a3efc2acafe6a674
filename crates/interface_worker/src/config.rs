//! Worker daemon configuration

use infra_queue::QueueConfig;
use serde::Deserialize;

/// Worker configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Bounded task channel capacity
    pub queue_size: usize,
    /// Concurrent task processors
    pub worker_count: usize,
    /// Delivery attempts before a retriable failure is dropped
    pub max_attempts: u32,
    /// Base delay for redelivery backoff
    pub retry_base_delay_ms: u64,
    /// Seconds between overdue sweeps
    pub sweep_interval_secs: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        let queue = QueueConfig::default();
        Self {
            database_url: "postgres://localhost/payables".to_string(),
            log_level: "info".to_string(),
            queue_size: queue.queue_size,
            worker_count: queue.worker_count,
            max_attempts: queue.max_attempts,
            retry_base_delay_ms: queue.retry_base_delay_ms,
            sweep_interval_secs: queue.sweep_interval_secs,
        }
    }
}

impl WorkerConfig {
    /// Loads configuration from `WORKER_`-prefixed environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("WORKER"))
            .build()?
            .try_deserialize()
    }

    /// The queue and scheduler slice of the configuration
    pub fn queue_config(&self) -> QueueConfig {
        QueueConfig {
            enabled: true,
            queue_size: self.queue_size,
            worker_count: self.worker_count,
            max_attempts: self.max_attempts,
            retry_base_delay_ms: self.retry_base_delay_ms,
            sweep_interval_secs: self.sweep_interval_secs,
        }
    }
}
