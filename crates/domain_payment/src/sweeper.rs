//! Overdue payment sweeper
//!
//! Periodic task that annotates pending payments past their due date. The
//! status is never changed; the note is overwritten on every run (idempotent
//! text, repeated write). Scheduling lives in `infra_queue`; this type only
//! knows how to run one sweep for a given day.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::error::PaymentError;
use crate::ports::PaymentStore;

/// Scans pending payments past due date and annotates them
pub struct OverdueSweeper {
    store: Arc<dyn PaymentStore>,
}

impl OverdueSweeper {
    /// Creates the sweeper with its injected store
    pub fn new(store: Arc<dyn PaymentStore>) -> Self {
        Self { store }
    }

    /// Annotates every pending payment whose due date is strictly before
    /// `today`; returns how many were annotated
    ///
    /// A store failure aborts the batch; records annotated before the
    /// failure keep their notes.
    pub async fn sweep(&self, today: NaiveDate) -> Result<usize, PaymentError> {
        let overdue = self.store.find_overdue(today).await?;

        for payment in &overdue {
            let note = format!("Payment overdue since {}", payment.due_date);
            self.store.annotate(payment.id, &note).await?;
        }

        if !overdue.is_empty() {
            info!(count = overdue.len(), %today, "annotated overdue payments");
        }
        Ok(overdue.len())
    }
}

impl std::fmt::Debug for OverdueSweeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverdueSweeper").finish_non_exhaustive()
    }
}
