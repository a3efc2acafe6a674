//! Periodic overdue sweep scheduler
//!
//! Runs the sweeper on a fixed interval, independent of the request path
//! and of the worker pool. A failed sweep is logged and the schedule keeps
//! going; the next tick retries naturally.

use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use domain_payment::OverdueSweeper;

/// Fires the overdue sweep every `interval`
pub struct SweepScheduler {
    sweeper: OverdueSweeper,
    interval: Duration,
    shutdown: CancellationToken,
}

impl SweepScheduler {
    /// Creates a scheduler over the given sweeper
    pub fn new(sweeper: OverdueSweeper, interval: Duration) -> Self {
        Self {
            sweeper,
            interval,
            shutdown: CancellationToken::new(),
        }
    }

    /// Returns the token that stops the schedule
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Starts the schedule
    ///
    /// The first sweep fires immediately, then once per interval. The
    /// returned handle resolves after shutdown.
    pub fn start(self) -> JoinHandle<()> {
        info!(interval_secs = self.interval.as_secs(), "starting sweep scheduler");

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("sweep scheduler shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        let today = Utc::now().date_naive();
                        match self.sweeper.sweep(today).await {
                            Ok(flagged) => {
                                info!(%today, flagged, "overdue sweep finished");
                            }
                            Err(err) => {
                                error!(%today, %err, "overdue sweep failed");
                            }
                        }
                    }
                }
            }
        })
    }
}

impl std::fmt::Debug for SweepScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SweepScheduler")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}
