//! Worker pool over a bounded in-process channel
//!
//! The pool owns the receiving half of an mpsc channel and hands out
//! [`MpscTaskQueue`] senders, which implement the domain's `TaskQueue` port.
//! A dispatcher task drains the channel and runs each task on its own
//! spawned task, bounded by a semaphore sized to the worker count.
//!
//! When the processor reports a retriable failure the task is redelivered
//! after an exponential backoff, up to `max_attempts` deliveries; after
//! that the task is dropped and the payment stays pending with its error
//! note, visible to operators.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use core_kernel::{DomainPort, PaymentId, PortError, TaskId};
use domain_payment::{PaymentProcessor, TaskQueue};

use crate::config::QueueConfig;
use crate::error::QueueError;

/// One processing task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentTask {
    /// Task identity, stable across redeliveries
    pub task_id: TaskId,
    /// Payment to process
    pub payment_id: PaymentId,
    /// Delivery attempt, starting at 1
    pub attempt: u32,
}

impl PaymentTask {
    /// Creates a first-delivery task
    pub fn new(payment_id: PaymentId) -> Self {
        Self {
            task_id: TaskId::new(),
            payment_id,
            attempt: 1,
        }
    }

    /// The same task on its next delivery attempt
    pub fn next_attempt(&self) -> Self {
        Self {
            task_id: self.task_id,
            payment_id: self.payment_id,
            attempt: self.attempt + 1,
        }
    }
}

/// Sending half of the worker pool's channel
///
/// Cloneable; the lifecycle service holds one as its `TaskQueue` port.
#[derive(Debug, Clone)]
pub struct MpscTaskQueue {
    tx: mpsc::Sender<PaymentTask>,
}

impl DomainPort for MpscTaskQueue {}

#[async_trait]
impl TaskQueue for MpscTaskQueue {
    async fn enqueue_process(&self, payment_id: PaymentId) -> Result<(), PortError> {
        self.tx
            .try_send(PaymentTask::new(payment_id))
            .map_err(|err| match err {
                mpsc::error::TrySendError::Full(_) => QueueError::QueueFull,
                mpsc::error::TrySendError::Closed(_) => QueueError::QueueClosed,
            })?;
        Ok(())
    }
}

/// Pool of workers draining the payment task channel
pub struct WorkerPool {
    config: QueueConfig,
    processor: Arc<PaymentProcessor>,
    task_tx: mpsc::Sender<PaymentTask>,
    task_rx: Option<mpsc::Receiver<PaymentTask>>,
    shutdown: CancellationToken,
}

impl WorkerPool {
    /// Creates the pool and its channel
    pub fn new(config: QueueConfig, processor: Arc<PaymentProcessor>) -> Self {
        let (task_tx, task_rx) = mpsc::channel(config.queue_size);
        Self {
            config,
            processor,
            task_tx,
            task_rx: Some(task_rx),
            shutdown: CancellationToken::new(),
        }
    }

    /// Returns a queue handle for producers
    pub fn queue(&self) -> MpscTaskQueue {
        MpscTaskQueue {
            tx: self.task_tx.clone(),
        }
    }

    /// Returns the token that stops the dispatcher
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Starts the dispatcher, consuming the receiving half
    ///
    /// Tasks run concurrently up to the configured worker count. The
    /// returned handle resolves when the pool is shut down or every sender
    /// is dropped.
    pub fn start(mut self) -> JoinHandle<()> {
        let mut task_rx = match self.task_rx.take() {
            Some(rx) => rx,
            None => {
                // start() consumes self, so the receiver is always present
                return tokio::spawn(async {});
            }
        };

        if !self.config.enabled {
            info!("worker pool disabled by configuration");
            // Park the receiver so the channel stays open: producers can
            // still enqueue, nothing consumes until shutdown.
            let shutdown = self.shutdown.clone();
            return tokio::spawn(async move {
                shutdown.cancelled().await;
                drop(task_rx);
            });
        }

        info!(
            worker_count = self.config.worker_count,
            queue_size = self.config.queue_size,
            "starting worker pool"
        );

        let config = self.config.clone();
        let processor = self.processor.clone();
        let redeliver_tx = self.task_tx.clone();
        let shutdown = self.shutdown.clone();
        let permits = Arc::new(Semaphore::new(config.worker_count));

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        info!("worker pool shutting down");
                        break;
                    }
                    task = task_rx.recv() => {
                        let Some(task) = task else {
                            info!("task channel closed, worker pool exiting");
                            break;
                        };
                        let Ok(permit) = permits.clone().acquire_owned().await else {
                            break;
                        };
                        let processor = processor.clone();
                        let redeliver_tx = redeliver_tx.clone();
                        let config = config.clone();
                        tokio::spawn(async move {
                            run_task(&processor, &redeliver_tx, &config, task).await;
                            drop(permit);
                        });
                    }
                }
            }
        })
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Runs one delivery and redelivers on retriable failure
///
/// Redelivery happens on a detached timer so the worker slot is released
/// for the duration of the backoff.
async fn run_task(
    processor: &PaymentProcessor,
    redeliver_tx: &mpsc::Sender<PaymentTask>,
    config: &QueueConfig,
    task: PaymentTask,
) {
    match processor.process(task.payment_id).await {
        Ok(outcome) => {
            info!(
                task_id = %task.task_id,
                payment_id = %task.payment_id,
                attempt = task.attempt,
                ?outcome,
                "task completed"
            );
        }
        Err(err) if err.is_retriable() && task.attempt < config.max_attempts => {
            let delay = config.retry_delay(task.attempt);
            warn!(
                task_id = %task.task_id,
                payment_id = %task.payment_id,
                attempt = task.attempt,
                delay_ms = delay.as_millis() as u64,
                %err,
                "task failed, scheduling redelivery"
            );
            let redeliver_tx = redeliver_tx.clone();
            let next = task.next_attempt();
            let payment_id = next.payment_id;
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                if redeliver_tx.send(next).await.is_err() {
                    warn!(%payment_id, "queue closed, dropping redelivery");
                }
            });
        }
        Err(err) => {
            error!(
                task_id = %task.task_id,
                payment_id = %task.payment_id,
                attempt = task.attempt,
                %err,
                "task failed permanently"
            );
        }
    }
}
