//! Payment domain ports
//!
//! The lifecycle service, processor, and sweeper reach the outside world
//! only through these traits. `infra_db` implements the store against
//! PostgreSQL; `infra_queue` implements the task queue over a worker pool;
//! the settlement gateway is stubbed (this system is not a payment gateway
//! integration).
//!
//! Status changes go through the conditional [`PaymentStore::transition`]
//! family: the store applies the new status only when the current status
//! still equals the expected one and reports [`TransitionOutcome::StaleStatus`]
//! otherwise. That single primitive closes both the duplicate-delivery and
//! the cancel-versus-processor races.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClientId, DomainPort, PaymentId, PortError, SupplierId};

use crate::payment::{Payment, PaymentStatus};

/// Result of a conditional status transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The status matched the expectation and the transition was applied
    Applied,
    /// The payment's status had already moved; nothing was written.
    /// Carries the status actually found.
    StaleStatus(PaymentStatus),
}

impl TransitionOutcome {
    /// Returns true if the transition was applied
    pub fn is_applied(&self) -> bool {
        matches!(self, TransitionOutcome::Applied)
    }
}

/// Filters for listing payments
#[derive(Debug, Clone, Default)]
pub struct PaymentQuery {
    /// Filter by status
    pub status: Option<PaymentStatus>,
    /// Filter by exact due date
    pub due_date: Option<NaiveDate>,
    /// Filter by due date range (inclusive start, exclusive end)
    pub due_from: Option<NaiveDate>,
    pub due_until: Option<NaiveDate>,
    /// Filter by supplier
    pub supplier_id: Option<SupplierId>,
    /// Filter by client
    pub client_id: Option<ClientId>,
    /// Limit results
    pub limit: Option<u32>,
    /// Offset for pagination
    pub offset: Option<u32>,
}

impl PaymentQuery {
    /// Creates a query matching one status
    pub fn by_status(status: PaymentStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Creates a query matching one due date
    pub fn by_due_date(due_date: NaiveDate) -> Self {
        Self {
            due_date: Some(due_date),
            ..Default::default()
        }
    }

    /// Adds pagination to the query
    pub fn paginate(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    /// Returns true if `payment` matches every present filter
    pub fn matches(&self, payment: &Payment) -> bool {
        self.status.is_none_or(|s| payment.status == s)
            && self.due_date.is_none_or(|d| payment.due_date == d)
            && self.due_from.is_none_or(|d| payment.due_date >= d)
            && self.due_until.is_none_or(|d| payment.due_date < d)
            && self.supplier_id.is_none_or(|s| payment.supplier_id == s)
            && self
                .client_id
                .is_none_or(|c| payment.client_id == Some(c))
    }
}

/// Durable store for payment records
#[async_trait]
pub trait PaymentStore: DomainPort {
    /// Persists a new payment
    async fn insert(&self, payment: &Payment) -> Result<(), PortError>;

    /// Loads a payment by id; `Ok(None)` when absent
    async fn fetch(&self, id: PaymentId) -> Result<Option<Payment>, PortError>;

    /// Writes the full record back (lifecycle updates of pending payments)
    async fn update(&self, payment: &Payment) -> Result<(), PortError>;

    /// Conditionally moves `id` from `expected` to `next`
    ///
    /// The write happens only when the stored status still equals
    /// `expected`; otherwise the current status is reported and the record
    /// is untouched.
    async fn transition(
        &self,
        id: PaymentId,
        expected: PaymentStatus,
        next: PaymentStatus,
    ) -> Result<TransitionOutcome, PortError>;

    /// Conditionally marks `id` paid, recording the settlement date and
    /// receipt reference in the same write
    async fn mark_paid(
        &self,
        id: PaymentId,
        expected: PaymentStatus,
        paid_date: NaiveDate,
        receipt_url: Option<String>,
    ) -> Result<TransitionOutcome, PortError>;

    /// Conditionally rolls a processing payment back to pending,
    /// overwriting notes with `error_note`
    async fn rollback_to_pending(
        &self,
        id: PaymentId,
        error_note: &str,
    ) -> Result<TransitionOutcome, PortError>;

    /// Overwrites the notes of `id` without touching status
    async fn annotate(&self, id: PaymentId, note: &str) -> Result<(), PortError>;

    /// Lists payments matching the query
    async fn list(&self, query: &PaymentQuery) -> Result<Vec<Payment>, PortError>;

    /// Returns pending payments with a due date strictly before `today`
    async fn find_overdue(&self, today: NaiveDate) -> Result<Vec<Payment>, PortError>;
}

/// Asynchronous task queue the lifecycle hands processing work to
///
/// Delivery is at-least-once with no ordering guarantee; the processor's
/// conditional transitions make redelivery harmless.
#[async_trait]
pub trait TaskQueue: DomainPort {
    /// Schedules one processing task for `payment_id`
    async fn enqueue_process(&self, payment_id: PaymentId) -> Result<(), PortError>;
}

/// Receipt returned by a successful settlement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementReceipt {
    /// External reference for the transfer
    pub reference: String,
    /// When the transfer completed
    pub settled_at: DateTime<Utc>,
}

/// External settlement step
///
/// Stands in for a real payment-gateway integration; actual fund transfer is
/// simulated. This call is the single failure point the queue's retry policy
/// guards.
#[async_trait]
pub trait SettlementGateway: DomainPort {
    /// Transfers the payment's net value to the supplier
    async fn settle(&self, payment: &Payment) -> Result<SettlementReceipt, PortError>;
}
