//! Repository implementations for domain entities
//!
//! Repositories encapsulate the SQL and map between database rows and
//! domain types. Status changes are conditional updates keyed on the
//! expected current status, so callers can detect lost races from the
//! affected row count.

pub mod parties;
pub mod payments;

pub use parties::PartyRepository;
pub use payments::PaymentRepository;
