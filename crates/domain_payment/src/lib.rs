//! Payment Domain - Invoice Payment Lifecycle
//!
//! This crate implements the heart of the payables system: the invoice
//! payment record, its status machine, the withholding-tax (retention)
//! calculation, and the services that drive a payment from creation to
//! settlement.
//!
//! # Lifecycle
//!
//! ```text
//! PENDING --(processor starts)--> PROCESSING --(settled)--> PAID (terminal)
//! PROCESSING --(settlement failure)--> PENDING (error note recorded)
//! PENDING | PROCESSING --(cancel)--> CANCELLED (terminal)
//! ```
//!
//! Every transition is conditional on the expected prior status
//! (compare-and-swap through [`ports::PaymentStore::transition`]), so a
//! redelivered processing task or a cancel racing an in-flight settlement can
//! never move a terminal payment.
//!
//! # Components
//!
//! - [`PaymentService`]: validates creation against the party directories,
//!   computes retention, persists, and enqueues exactly one processing task
//! - [`PaymentProcessor`]: worker-side settlement with rollback-and-reraise
//!   failure handling; retry scheduling is left to the task queue
//! - [`OverdueSweeper`]: hourly annotation of pending payments past due date

pub mod error;
pub mod lifecycle;
pub mod patch;
pub mod payment;
pub mod ports;
pub mod processor;
pub mod retention;
pub mod sweeper;

pub use error::PaymentError;
pub use lifecycle::PaymentService;
pub use patch::PaymentPatch;
pub use payment::{Payment, PaymentDraft, PaymentStatus};
pub use ports::{
    PaymentQuery, PaymentStore, SettlementGateway, SettlementReceipt, TaskQueue,
    TransitionOutcome,
};
pub use processor::{PaymentProcessor, ProcessOutcome};
pub use retention::{calculate_retention, net_value};
pub use sweeper::OverdueSweeper;
