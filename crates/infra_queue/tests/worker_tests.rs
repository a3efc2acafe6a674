//! Worker pool and scheduler tests over the in-memory adapters

use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};

use domain_payment::{OverdueSweeper, PaymentProcessor, PaymentStatus, TaskQueue};
use infra_queue::{QueueConfig, SweepScheduler, WorkerPool};
use test_utils::{MemoryPaymentStore, StubGateway, TestPaymentBuilder};

/// Polls `check` until it passes or two seconds elapse
async fn wait_until(mut check: impl FnMut() -> bool) {
    for _ in 0..200 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within two seconds");
}

fn fast_config() -> QueueConfig {
    QueueConfig {
        worker_count: 2,
        retry_base_delay_ms: 5,
        ..QueueConfig::default()
    }
}

#[tokio::test]
async fn test_pool_settles_enqueued_payment() {
    let store = Arc::new(MemoryPaymentStore::new());
    let gateway = Arc::new(StubGateway::succeeding());
    let processor = Arc::new(PaymentProcessor::new(store.clone(), gateway));

    let pool = WorkerPool::new(fast_config(), processor);
    let queue = pool.queue();
    let shutdown = pool.shutdown_token();
    let handle = pool.start();

    let payment = TestPaymentBuilder::new().build();
    store.put(payment.clone());
    queue.enqueue_process(payment.id).await.unwrap();

    wait_until(|| store.snapshot(payment.id).map(|p| p.status) == Some(PaymentStatus::Paid))
        .await;

    shutdown.cancel();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_retriable_failure_is_redelivered_until_settled() {
    let store = Arc::new(MemoryPaymentStore::new());
    let gateway = Arc::new(StubGateway::failing(2));
    let processor = Arc::new(PaymentProcessor::new(store.clone(), gateway.clone()));

    let pool = WorkerPool::new(fast_config(), processor);
    let queue = pool.queue();
    let shutdown = pool.shutdown_token();
    let handle = pool.start();

    let payment = TestPaymentBuilder::new().build();
    store.put(payment.clone());
    queue.enqueue_process(payment.id).await.unwrap();

    wait_until(|| store.snapshot(payment.id).map(|p| p.status) == Some(PaymentStatus::Paid))
        .await;
    assert_eq!(gateway.calls(), 3);

    shutdown.cancel();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_attempt_cap_leaves_payment_pending_with_error_note() {
    let store = Arc::new(MemoryPaymentStore::new());
    let gateway = Arc::new(StubGateway::failing(100));
    let processor = Arc::new(PaymentProcessor::new(store.clone(), gateway.clone()));

    let config = QueueConfig {
        max_attempts: 2,
        ..fast_config()
    };
    let pool = WorkerPool::new(config, processor);
    let queue = pool.queue();
    let shutdown = pool.shutdown_token();
    let handle = pool.start();

    let payment = TestPaymentBuilder::new().build();
    store.put(payment.clone());
    queue.enqueue_process(payment.id).await.unwrap();

    wait_until(|| gateway.calls() == 2).await;
    // Give any stray redelivery a moment to show up
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(gateway.calls(), 2);

    let stalled = store.snapshot(payment.id).unwrap();
    assert_eq!(stalled.status, PaymentStatus::Pending);
    assert!(stalled.notes.as_deref().unwrap().contains("Processing error"));

    shutdown.cancel();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_full_queue_rejects_enqueue() {
    let store = Arc::new(MemoryPaymentStore::new());
    let processor = Arc::new(PaymentProcessor::new(
        store,
        Arc::new(StubGateway::succeeding()),
    ));

    let config = QueueConfig {
        queue_size: 1,
        ..QueueConfig::default()
    };
    // The pool is never started, so the single slot stays occupied
    let pool = WorkerPool::new(config, processor);
    let queue = pool.queue();

    let first = TestPaymentBuilder::new().build();
    let second = TestPaymentBuilder::new().build();
    queue.enqueue_process(first.id).await.unwrap();
    let err = queue.enqueue_process(second.id).await.unwrap_err();
    assert!(err.to_string().contains("full"));
}

#[tokio::test]
async fn test_disabled_pool_does_not_consume_tasks() {
    let store = Arc::new(MemoryPaymentStore::new());
    let gateway = Arc::new(StubGateway::succeeding());
    let processor = Arc::new(PaymentProcessor::new(store.clone(), gateway.clone()));

    let config = QueueConfig {
        enabled: false,
        ..fast_config()
    };
    let pool = WorkerPool::new(config, processor);
    let queue = pool.queue();
    let shutdown = pool.shutdown_token();
    let handle = pool.start();

    // The channel stays open while the pool is disabled: enqueueing works,
    // nothing consumes.
    let payment = TestPaymentBuilder::new().build();
    store.put(payment.clone());
    queue.enqueue_process(payment.id).await.unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(gateway.calls(), 0);
    assert_eq!(
        store.snapshot(payment.id).unwrap().status,
        PaymentStatus::Pending
    );

    shutdown.cancel();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_backoff_does_not_hold_a_worker_slot() {
    let store = Arc::new(MemoryPaymentStore::new());
    let gateway = Arc::new(StubGateway::failing(1));
    let processor = Arc::new(PaymentProcessor::new(store.clone(), gateway.clone()));

    // One worker and a backoff far longer than the test: if the failing
    // task held its slot through the backoff, the second payment could
    // never be processed.
    let config = QueueConfig {
        worker_count: 1,
        retry_base_delay_ms: 60_000,
        ..QueueConfig::default()
    };
    let pool = WorkerPool::new(config, processor);
    let queue = pool.queue();
    let shutdown = pool.shutdown_token();
    let handle = pool.start();

    let failing = TestPaymentBuilder::new().build();
    store.put(failing.clone());
    queue.enqueue_process(failing.id).await.unwrap();
    wait_until(|| gateway.calls() == 1).await;

    let second = TestPaymentBuilder::new().build();
    store.put(second.clone());
    queue.enqueue_process(second.id).await.unwrap();

    wait_until(|| store.snapshot(second.id).map(|p| p.status) == Some(PaymentStatus::Paid))
        .await;
    // The first payment is still waiting out its backoff
    assert_eq!(
        store.snapshot(failing.id).unwrap().status,
        PaymentStatus::Pending
    );

    shutdown.cancel();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_scheduler_flags_overdue_payments() {
    let store = Arc::new(MemoryPaymentStore::new());
    let today = Utc::now().date_naive();

    let overdue = TestPaymentBuilder::new()
        .with_due_date(today - ChronoDuration::days(2))
        .build();
    store.put(overdue.clone());

    let scheduler = SweepScheduler::new(
        OverdueSweeper::new(store.clone()),
        Duration::from_millis(50),
    );
    let shutdown = scheduler.shutdown_token();
    let handle = scheduler.start();

    wait_until(|| store.snapshot(overdue.id).map(|p| p.notes.is_some()) == Some(true)).await;
    assert!(store
        .snapshot(overdue.id)
        .unwrap()
        .notes
        .unwrap()
        .starts_with("Payment overdue since"));

    shutdown.cancel();
    handle.await.unwrap();
}
