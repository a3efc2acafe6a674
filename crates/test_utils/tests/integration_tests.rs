//! End-to-end lifecycle tests over the in-memory adapters
//!
//! These wire the lifecycle service, processor, and sweeper together the way
//! the worker binary does, replacing PostgreSQL and the broker with the
//! in-memory ports.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;

use core_kernel::Money;
use domain_payment::{
    OverdueSweeper, PaymentProcessor, PaymentService, PaymentStatus, ProcessOutcome,
};
use test_utils::{
    MemoryClientDirectory, MemoryPaymentStore, MemorySupplierDirectory, PartyFixtures,
    RecordingQueue, StubGateway, TestDraftBuilder,
};

struct World {
    store: Arc<MemoryPaymentStore>,
    queue: Arc<RecordingQueue>,
    service: PaymentService,
    client_id: core_kernel::ClientId,
    supplier_id: core_kernel::SupplierId,
}

fn world() -> World {
    let store = Arc::new(MemoryPaymentStore::new());
    let clients = Arc::new(MemoryClientDirectory::new());
    let suppliers = Arc::new(MemorySupplierDirectory::new());
    let queue = Arc::new(RecordingQueue::new());

    let client = PartyFixtures::client();
    let client_id = client.id;
    clients.put(client);

    let supplier = PartyFixtures::supplier();
    let supplier_id = supplier.id;
    suppliers.put(supplier);

    let service = PaymentService::new(store.clone(), clients, suppliers, queue.clone());

    World {
        store,
        queue,
        service,
        client_id,
        supplier_id,
    }
}

#[tokio::test]
async fn test_create_then_process_to_paid() {
    let w = world();
    let gateway = Arc::new(StubGateway::succeeding());
    let processor = PaymentProcessor::new(w.store.clone(), gateway);

    let payment = w
        .service
        .create(
            TestDraftBuilder::for_supplier(w.supplier_id)
                .with_client(w.client_id)
                .build(),
            "admin@example.com",
        )
        .await
        .unwrap();

    assert_eq!(payment.retention_value, Money::new(dec!(100.00)));
    assert_eq!(payment.net_value, Money::new(dec!(900.00)));

    // Drain the queue the way the worker pool does
    let enqueued = w.queue.enqueued();
    assert_eq!(enqueued, vec![payment.id]);
    let outcome = processor.process(enqueued[0]).await.unwrap();
    assert_eq!(outcome, ProcessOutcome::Settled);

    let settled = w.service.get(payment.id).await.unwrap();
    assert_eq!(settled.status, PaymentStatus::Paid);
    assert!(settled.paid_date.is_some());
    assert!(settled.receipt_url.is_some());
}

#[tokio::test]
async fn test_failed_settlement_is_retriable_until_it_succeeds() {
    let w = world();
    let gateway = Arc::new(StubGateway::failing(2));
    let processor = PaymentProcessor::new(w.store.clone(), gateway.clone());

    let payment = w
        .service
        .create(
            TestDraftBuilder::for_supplier(w.supplier_id).build(),
            "admin@example.com",
        )
        .await
        .unwrap();

    // First two deliveries fail and roll the payment back to pending
    for _ in 0..2 {
        let err = processor.process(payment.id).await.unwrap_err();
        assert!(err.is_retriable());
        let rolled_back = w.service.get(payment.id).await.unwrap();
        assert_eq!(rolled_back.status, PaymentStatus::Pending);
        assert!(rolled_back
            .notes
            .as_deref()
            .unwrap()
            .contains("Processing error"));
    }

    // Third delivery settles
    let outcome = processor.process(payment.id).await.unwrap();
    assert_eq!(outcome, ProcessOutcome::Settled);
    assert_eq!(gateway.calls(), 3);
    assert_eq!(
        w.service.get(payment.id).await.unwrap().status,
        PaymentStatus::Paid
    );
}

#[tokio::test]
async fn test_cancelled_payment_survives_late_task_delivery() {
    let w = world();
    let gateway = Arc::new(StubGateway::succeeding());
    let processor = PaymentProcessor::new(w.store.clone(), gateway);

    let payment = w
        .service
        .create(
            TestDraftBuilder::for_supplier(w.supplier_id).build(),
            "admin@example.com",
        )
        .await
        .unwrap();
    w.service.cancel(payment.id).await.unwrap();

    let outcome = processor.process(payment.id).await.unwrap();
    assert_eq!(outcome, ProcessOutcome::Skipped(PaymentStatus::Cancelled));
    assert_eq!(
        w.service.get(payment.id).await.unwrap().status,
        PaymentStatus::Cancelled
    );
}

#[tokio::test]
async fn test_sweeper_flags_overdue_payments_created_through_the_service() {
    let w = world();
    let today = Utc::now().date_naive();

    let overdue = w
        .service
        .create(
            TestDraftBuilder::for_supplier(w.supplier_id)
                .with_due_date(today - Duration::days(3))
                .build(),
            "admin@example.com",
        )
        .await
        .unwrap();
    let current = w
        .service
        .create(
            TestDraftBuilder::for_supplier(w.supplier_id)
                .with_due_date(today + Duration::days(3))
                .build(),
            "admin@example.com",
        )
        .await
        .unwrap();

    let sweeper = OverdueSweeper::new(w.store.clone());
    assert_eq!(sweeper.sweep(today).await.unwrap(), 1);

    let flagged = w.service.get(overdue.id).await.unwrap();
    assert_eq!(
        flagged.notes.as_deref(),
        Some(format!("Payment overdue since {}", overdue.due_date).as_str())
    );
    assert!(w.service.get(current.id).await.unwrap().notes.is_none());
}
