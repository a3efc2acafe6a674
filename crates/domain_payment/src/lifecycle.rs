//! Payment lifecycle service
//!
//! Validates creation against the party directories, derives the monetary
//! fields, persists the record, and hands processing off to the task queue.
//! All collaborators are injected as port handles; the service holds no
//! ambient state.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use core_kernel::PaymentId;
use domain_party::{ClientPort, SupplierPort};

use crate::error::PaymentError;
use crate::patch::PaymentPatch;
use crate::payment::{Payment, PaymentDraft, PaymentStatus};
use crate::ports::{PaymentQuery, PaymentStore, TaskQueue, TransitionOutcome};
use crate::retention::{calculate_retention, net_value};

/// Application service for creating and mutating payments
pub struct PaymentService {
    store: Arc<dyn PaymentStore>,
    clients: Arc<dyn ClientPort>,
    suppliers: Arc<dyn SupplierPort>,
    queue: Arc<dyn TaskQueue>,
}

impl PaymentService {
    /// Creates the service with its injected collaborators
    pub fn new(
        store: Arc<dyn PaymentStore>,
        clients: Arc<dyn ClientPort>,
        suppliers: Arc<dyn SupplierPort>,
        queue: Arc<dyn TaskQueue>,
    ) -> Self {
        Self {
            store,
            clients,
            suppliers,
            queue,
        }
    }

    /// Creates a payment from a draft on behalf of `actor`
    ///
    /// The referenced supplier must exist; a referenced client must exist
    /// too, and when present its retention percentage drives the withheld
    /// amount, overriding the draft's own retention/net values. The
    /// record is persisted as `Pending` and, because it is pending, exactly
    /// one processing task is enqueued.
    ///
    /// # Errors
    ///
    /// `SupplierNotFound`/`ClientNotFound` when a reference is dangling;
    /// nothing is persisted in that case.
    pub async fn create(
        &self,
        draft: PaymentDraft,
        actor: &str,
    ) -> Result<Payment, PaymentError> {
        self.suppliers
            .find_supplier(draft.supplier_id)
            .await?
            .ok_or(PaymentError::SupplierNotFound(draft.supplier_id))?;

        let (retention_value, net) = match draft.client_id {
            Some(client_id) => {
                let client = self
                    .clients
                    .find_client(client_id)
                    .await?
                    .ok_or(PaymentError::ClientNotFound(client_id))?;
                let retention =
                    calculate_retention(draft.total_value, client.retention_percent);
                (retention, net_value(draft.total_value, retention))
            }
            None => {
                let retention = draft.retention_value;
                let net = draft
                    .net_value
                    .unwrap_or_else(|| net_value(draft.total_value, retention));
                (retention, net)
            }
        };

        let now = Utc::now();
        let payment = Payment {
            id: PaymentId::new_v7(),
            supplier_id: draft.supplier_id,
            client_id: draft.client_id,
            invoice_number: draft.invoice_number,
            issue_date: draft.issue_date,
            due_date: draft.due_date,
            total_value: draft.total_value,
            retention_value,
            net_value: net,
            status: PaymentStatus::Pending,
            paid_date: None,
            notes: draft.notes,
            processed_by: Some(actor.to_string()),
            receipt_url: None,
            created_at: now,
            updated_at: now,
        };

        self.store.insert(&payment).await?;

        if payment.status == PaymentStatus::Pending {
            self.queue.enqueue_process(payment.id).await?;
        }

        info!(payment_id = %payment.id, invoice = %payment.invoice_number, "payment created");
        Ok(payment)
    }

    /// Applies a partial update to a pending payment
    ///
    /// Retention is not recomputed, even when the total value or monetary
    /// fields change; the patch is applied verbatim.
    ///
    /// # Errors
    ///
    /// `PaymentNotFound` when absent; `InvalidState` unless the current
    /// status is `Pending`.
    pub async fn update(
        &self,
        id: PaymentId,
        patch: PaymentPatch,
    ) -> Result<Payment, PaymentError> {
        let mut payment = self
            .store
            .fetch(id)
            .await?
            .ok_or(PaymentError::PaymentNotFound(id))?;

        if !payment.status.can_update() {
            return Err(PaymentError::invalid_state(
                "only pending payments can be updated",
            ));
        }

        patch.apply(&mut payment);
        self.store.update(&payment).await?;

        debug!(payment_id = %id, "payment updated");
        Ok(payment)
    }

    /// Cancels a pending or processing payment
    ///
    /// Cancellation is a status transition, never a delete. The transition
    /// is conditional on the status observed here; if a concurrent worker
    /// moved the payment first, the cancel fails with `InvalidState` instead
    /// of overwriting the newer status.
    pub async fn cancel(&self, id: PaymentId) -> Result<Payment, PaymentError> {
        let payment = self
            .store
            .fetch(id)
            .await?
            .ok_or(PaymentError::PaymentNotFound(id))?;

        if !payment.status.can_cancel() {
            return Err(PaymentError::invalid_state(
                "only pending or processing payments can be cancelled",
            ));
        }

        match self
            .store
            .transition(id, payment.status, PaymentStatus::Cancelled)
            .await?
        {
            TransitionOutcome::Applied => {
                info!(payment_id = %id, "payment cancelled");
                self.get(id).await
            }
            TransitionOutcome::StaleStatus(actual) => Err(PaymentError::invalid_state(
                format!("payment moved to {actual} while cancelling"),
            )),
        }
    }

    /// Loads one payment
    pub async fn get(&self, id: PaymentId) -> Result<Payment, PaymentError> {
        self.store
            .fetch(id)
            .await?
            .ok_or(PaymentError::PaymentNotFound(id))
    }

    /// Lists payments matching the query
    pub async fn list(&self, query: &PaymentQuery) -> Result<Vec<Payment>, PaymentError> {
        Ok(self.store.list(query).await?)
    }

    /// Lists payments due on an exact date
    pub async fn find_by_due_date(
        &self,
        due_date: chrono::NaiveDate,
    ) -> Result<Vec<Payment>, PaymentError> {
        self.list(&PaymentQuery::by_due_date(due_date)).await
    }

    /// Lists payments in one status
    pub async fn find_by_status(
        &self,
        status: PaymentStatus,
    ) -> Result<Vec<Payment>, PaymentError> {
        self.list(&PaymentQuery::by_status(status)).await
    }
}

impl std::fmt::Debug for PaymentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentService").finish_non_exhaustive()
    }
}
