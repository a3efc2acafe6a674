//! Domain port adapters
//!
//! Each adapter implements a domain port over the repository layer,
//! translating rows to domain models and `DatabaseError` to `PortError`.

pub mod parties;
pub mod payments;

pub use parties::{PostgresClientDirectory, PostgresSupplierDirectory};
pub use payments::PostgresPaymentStore;
