//! Asynchronous payment processor
//!
//! Worker-side task that advances a payment from `Pending` through
//! `Processing` to `Paid`. Invoked by the task queue with at-least-once
//! delivery, so every transition is conditional: a redelivered task for a
//! payment that already settled (or was cancelled) is a logged no-op, never
//! a status overwrite.
//!
//! On settlement failure the payment is rolled back to `Pending` with an
//! error note and the failure is returned as retriable; retry scheduling and
//! backoff belong to the queue, not to this processor.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use core_kernel::PaymentId;

use crate::error::PaymentError;
use crate::payment::PaymentStatus;
use crate::ports::{PaymentStore, SettlementGateway, TransitionOutcome};

/// Outcome of one processing attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The payment was settled and marked paid
    Settled,
    /// The payment was not in a processable state; nothing was written.
    /// Carries the status found.
    Skipped(PaymentStatus),
}

/// Worker-side settlement task
pub struct PaymentProcessor {
    store: Arc<dyn PaymentStore>,
    gateway: Arc<dyn SettlementGateway>,
}

impl PaymentProcessor {
    /// Creates the processor with its injected collaborators
    pub fn new(store: Arc<dyn PaymentStore>, gateway: Arc<dyn SettlementGateway>) -> Self {
        Self { store, gateway }
    }

    /// Processes one payment
    ///
    /// Steps:
    /// 1. load the payment; a missing id is a permanent failure, there is
    ///    no record to roll back;
    /// 2. claim it with a conditional `Pending -> Processing` transition,
    ///    committed immediately so the intermediate state is visible;
    /// 3. settle through the gateway;
    /// 4. on success, conditionally mark `Processing -> Paid` with today's
    ///    date and the receipt reference;
    /// 5. on failure, roll back to `Pending`, record the error note, and
    ///    return a retriable `ProcessingFailure`.
    ///
    /// A stale status at step 2 or 4 (duplicate delivery, or a cancel that
    /// won the race) yields [`ProcessOutcome::Skipped`] and leaves the
    /// record untouched.
    pub async fn process(&self, payment_id: PaymentId) -> Result<ProcessOutcome, PaymentError> {
        let payment = match self.store.fetch(payment_id).await? {
            Some(payment) => payment,
            None => {
                error!(%payment_id, "processing task for unknown payment");
                return Err(PaymentError::PaymentNotFound(payment_id));
            }
        };

        match self
            .store
            .transition(payment_id, PaymentStatus::Pending, PaymentStatus::Processing)
            .await?
        {
            TransitionOutcome::Applied => {}
            TransitionOutcome::StaleStatus(actual) => {
                warn!(%payment_id, status = %actual, "skipping non-pending payment");
                return Ok(ProcessOutcome::Skipped(actual));
            }
        }

        match self.gateway.settle(&payment).await {
            Ok(receipt) => {
                let paid_date = Utc::now().date_naive();
                match self
                    .store
                    .mark_paid(
                        payment_id,
                        PaymentStatus::Processing,
                        paid_date,
                        Some(receipt.reference.clone()),
                    )
                    .await?
                {
                    TransitionOutcome::Applied => {
                        info!(%payment_id, reference = %receipt.reference, "payment settled");
                        Ok(ProcessOutcome::Settled)
                    }
                    TransitionOutcome::StaleStatus(actual) => {
                        // A cancel landed between settlement and the final
                        // write; the newer status wins.
                        warn!(%payment_id, status = %actual, "settled payment no longer processing");
                        Ok(ProcessOutcome::Skipped(actual))
                    }
                }
            }
            Err(settle_err) => {
                let note = format!("Processing error: {settle_err}");
                self.store
                    .rollback_to_pending(payment_id, &note)
                    .await?;
                warn!(%payment_id, error = %settle_err, "settlement failed, rolled back to pending");
                Err(PaymentError::ProcessingFailure(settle_err.to_string()))
            }
        }
    }
}

impl std::fmt::Debug for PaymentProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentProcessor").finish_non_exhaustive()
    }
}
