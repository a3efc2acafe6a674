//! In-memory port implementations
//!
//! Adapters backing the domain ports with plain `Mutex<HashMap>` state, for
//! tests that exercise services, workers, and schedulers without a database
//! or broker. The payment store honours the same conditional-transition
//! contract as the PostgreSQL adapter.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use core_kernel::{ClientId, DomainPort, PaymentId, PortError, SupplierId};
use domain_party::{Client, ClientPort, Supplier, SupplierPort};
use domain_payment::{
    Payment, PaymentQuery, PaymentStatus, PaymentStore, SettlementGateway,
    SettlementReceipt, TaskQueue, TransitionOutcome,
};

/// In-memory payment store
#[derive(Default)]
pub struct MemoryPaymentStore {
    payments: Mutex<HashMap<PaymentId, Payment>>,
}

impl MemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a payment outside the port, for assertions
    pub fn snapshot(&self, id: PaymentId) -> Option<Payment> {
        self.payments.lock().unwrap().get(&id).cloned()
    }

    /// Number of stored payments
    pub fn len(&self) -> usize {
        self.payments.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overwrites a payment outside the port, for test setup
    pub fn put(&self, payment: Payment) {
        self.payments.lock().unwrap().insert(payment.id, payment);
    }
}

impl DomainPort for MemoryPaymentStore {}

#[async_trait]
impl PaymentStore for MemoryPaymentStore {
    async fn insert(&self, payment: &Payment) -> Result<(), PortError> {
        self.payments
            .lock()
            .unwrap()
            .insert(payment.id, payment.clone());
        Ok(())
    }

    async fn fetch(&self, id: PaymentId) -> Result<Option<Payment>, PortError> {
        Ok(self.payments.lock().unwrap().get(&id).cloned())
    }

    async fn update(&self, payment: &Payment) -> Result<(), PortError> {
        let mut payments = self.payments.lock().unwrap();
        if !payments.contains_key(&payment.id) {
            return Err(PortError::not_found("Payment", payment.id));
        }
        payments.insert(payment.id, payment.clone());
        Ok(())
    }

    async fn transition(
        &self,
        id: PaymentId,
        expected: PaymentStatus,
        next: PaymentStatus,
    ) -> Result<TransitionOutcome, PortError> {
        let mut payments = self.payments.lock().unwrap();
        let payment = payments
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Payment", id))?;
        if payment.status != expected {
            return Ok(TransitionOutcome::StaleStatus(payment.status));
        }
        payment.status = next;
        payment.updated_at = Utc::now();
        Ok(TransitionOutcome::Applied)
    }

    async fn mark_paid(
        &self,
        id: PaymentId,
        expected: PaymentStatus,
        paid_date: NaiveDate,
        receipt_url: Option<String>,
    ) -> Result<TransitionOutcome, PortError> {
        let mut payments = self.payments.lock().unwrap();
        let payment = payments
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Payment", id))?;
        if payment.status != expected {
            return Ok(TransitionOutcome::StaleStatus(payment.status));
        }
        payment.status = PaymentStatus::Paid;
        payment.paid_date = Some(paid_date);
        payment.receipt_url = receipt_url;
        payment.updated_at = Utc::now();
        Ok(TransitionOutcome::Applied)
    }

    async fn rollback_to_pending(
        &self,
        id: PaymentId,
        error_note: &str,
    ) -> Result<TransitionOutcome, PortError> {
        let mut payments = self.payments.lock().unwrap();
        let payment = payments
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Payment", id))?;
        if payment.status != PaymentStatus::Processing {
            return Ok(TransitionOutcome::StaleStatus(payment.status));
        }
        payment.status = PaymentStatus::Pending;
        payment.notes = Some(error_note.to_string());
        payment.updated_at = Utc::now();
        Ok(TransitionOutcome::Applied)
    }

    async fn annotate(&self, id: PaymentId, note: &str) -> Result<(), PortError> {
        let mut payments = self.payments.lock().unwrap();
        let payment = payments
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Payment", id))?;
        payment.notes = Some(note.to_string());
        payment.updated_at = Utc::now();
        Ok(())
    }

    async fn list(&self, query: &PaymentQuery) -> Result<Vec<Payment>, PortError> {
        let payments = self.payments.lock().unwrap();
        let mut matching: Vec<Payment> = payments
            .values()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();
        matching.sort_by_key(|p| p.created_at);
        let offset = query.offset.unwrap_or(0) as usize;
        let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(matching.into_iter().skip(offset).take(limit).collect())
    }

    async fn find_overdue(&self, today: NaiveDate) -> Result<Vec<Payment>, PortError> {
        let payments = self.payments.lock().unwrap();
        Ok(payments
            .values()
            .filter(|p| p.is_overdue(today))
            .cloned()
            .collect())
    }
}

/// In-memory client directory
#[derive(Default)]
pub struct MemoryClientDirectory {
    clients: Mutex<HashMap<ClientId, Client>>,
}

impl MemoryClientDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a client
    pub fn put(&self, client: Client) {
        self.clients.lock().unwrap().insert(client.id, client);
    }
}

impl DomainPort for MemoryClientDirectory {}

#[async_trait]
impl ClientPort for MemoryClientDirectory {
    async fn find_client(&self, id: ClientId) -> Result<Option<Client>, PortError> {
        Ok(self.clients.lock().unwrap().get(&id).cloned())
    }
}

/// In-memory supplier directory
#[derive(Default)]
pub struct MemorySupplierDirectory {
    suppliers: Mutex<HashMap<SupplierId, Supplier>>,
}

impl MemorySupplierDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a supplier
    pub fn put(&self, supplier: Supplier) {
        self.suppliers.lock().unwrap().insert(supplier.id, supplier);
    }
}

impl DomainPort for MemorySupplierDirectory {}

#[async_trait]
impl SupplierPort for MemorySupplierDirectory {
    async fn find_supplier(&self, id: SupplierId) -> Result<Option<Supplier>, PortError> {
        Ok(self.suppliers.lock().unwrap().get(&id).cloned())
    }
}

/// Queue adapter that records every enqueued payment id
#[derive(Default)]
pub struct RecordingQueue {
    enqueued: Mutex<Vec<PaymentId>>,
}

impl RecordingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids enqueued so far, in order
    pub fn enqueued(&self) -> Vec<PaymentId> {
        self.enqueued.lock().unwrap().clone()
    }

    /// Number of enqueued tasks
    pub fn count(&self) -> usize {
        self.enqueued.lock().unwrap().len()
    }
}

impl DomainPort for RecordingQueue {}

#[async_trait]
impl TaskQueue for RecordingQueue {
    async fn enqueue_process(&self, payment_id: PaymentId) -> Result<(), PortError> {
        self.enqueued.lock().unwrap().push(payment_id);
        Ok(())
    }
}

/// Settlement gateway that fails a configurable number of leading calls
pub struct StubGateway {
    fail_first: usize,
    calls: AtomicUsize,
}

impl StubGateway {
    /// A gateway that settles every payment
    pub fn succeeding() -> Self {
        Self {
            fail_first: 0,
            calls: AtomicUsize::new(0),
        }
    }

    /// A gateway that fails the first `times` settlements, then succeeds
    pub fn failing(times: usize) -> Self {
        Self {
            fail_first: times,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of settlement attempts observed
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DomainPort for StubGateway {}

#[async_trait]
impl SettlementGateway for StubGateway {
    async fn settle(&self, payment: &Payment) -> Result<SettlementReceipt, PortError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.fail_first {
            return Err(PortError::connection("settlement endpoint unreachable"));
        }
        Ok(SettlementReceipt {
            reference: format!("SETTLE-{}", payment.id),
            settled_at: Utc::now(),
        })
    }
}
